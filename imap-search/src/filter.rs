//! # Search filter
//!
//! Module dedicated to the predicate produced by the search parser.
//! A [`SearchFilter`] is a tree of leaf matchers combined with
//! boolean operators, evaluated against one [`Envelope`] at a time.

use std::fmt;

use crate::{mailbox::Envelope, Address};

/// The search filter, built once per `SEARCH` command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchFilter {
    /// Matches every envelope.
    All,
    /// Matches envelopes whose subject contains the given text,
    /// ignoring case.
    Subject(String),
    /// Matches envelopes having the given address among their `To`
    /// recipients.
    To(Address),
    And(Box<SearchFilter>, Box<SearchFilter>),
    Or(Box<SearchFilter>, Box<SearchFilter>),
    Not(Box<SearchFilter>),
}

impl SearchFilter {
    pub fn and(left: SearchFilter, right: SearchFilter) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: SearchFilter, right: SearchFilter) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    pub fn not(filter: SearchFilter) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Checks whether the given envelope satisfies the filter.
    pub fn matches(&self, envelope: &Envelope) -> bool {
        match self {
            Self::All => true,
            Self::Subject(pattern) => envelope
                .subject
                .to_lowercase()
                .contains(&pattern.to_lowercase()),
            Self::To(addr) => envelope.to.iter().any(|to| to == addr),
            Self::And(left, right) => left.matches(envelope) && right.matches(envelope),
            Self::Or(left, right) => left.matches(envelope) || right.matches(envelope),
            Self::Not(filter) => !filter.matches(envelope),
        }
    }
}

/// Renders the filter back using IMAP search key syntax. Conjunctions
/// are rendered as parenthesized lists.
impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Subject(pattern) => write!(f, "SUBJECT {pattern:?}"),
            Self::To(addr) => write!(f, "TO {}", addr.addr),
            Self::And(left, right) => write!(f, "({left} {right})"),
            Self::Or(left, right) => write!(f, "OR {left} {right}"),
            Self::Not(filter) => write!(f, "NOT {filter}"),
        }
    }
}
