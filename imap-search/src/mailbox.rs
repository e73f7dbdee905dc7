//! # Mailbox
//!
//! Minimal in-memory mailbox used to answer search queries, the way
//! a mock server would. Envelopes are addressed by their 1-based
//! sequence number, following insertion order.

use tracing::debug;

use crate::{Address, Result, SearchFilter, SearchParser};

/// The part of a stored message search filters look at.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Envelope {
    pub subject: String,
    pub to: Vec<Address>,
}

impl Envelope {
    pub fn new(subject: impl ToString, to: impl IntoIterator<Item = Address>) -> Self {
        Self {
            subject: subject.to_string(),
            to: to.into_iter().collect(),
        }
    }
}

/// The in-memory mailbox.
#[derive(Clone, Debug, Default)]
pub struct Mailbox {
    envelopes: Vec<Envelope>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the given envelope and returns its sequence number.
    pub fn store(&mut self, envelope: Envelope) -> usize {
        self.envelopes.push(envelope);
        self.envelopes.len()
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// Returns the sequence numbers of envelopes matching the filter.
    pub fn search(&self, filter: &SearchFilter) -> Vec<usize> {
        let seqs: Vec<usize> = self
            .envelopes
            .iter()
            .enumerate()
            .filter(|(_, envelope)| filter.matches(envelope))
            .map(|(i, _)| i + 1)
            .collect();

        debug!(%filter, hits = seqs.len(), "searched mailbox");
        seqs
    }

    /// Parses the raw argument of a `SEARCH` command with the default
    /// parser, then searches the mailbox.
    pub fn search_request(&self, request: impl AsRef<str>) -> Result<Vec<usize>> {
        let criteria = SearchParser::default().parse(request)?;
        Ok(self.search(&criteria.filter))
    }
}

impl FromIterator<Envelope> for Mailbox {
    fn from_iter<T: IntoIterator<Item = Envelope>>(iter: T) -> Self {
        Self {
            envelopes: iter.into_iter().collect(),
        }
    }
}
