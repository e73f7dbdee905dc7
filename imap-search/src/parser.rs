//! # Search parser
//!
//! This module turns the raw argument of a `SEARCH` command into a
//! single [`SearchFilter`]. Tokens are processed in reverse command
//! order and reduced on one stack mixing literal values and already
//! built filters:
//!
//! - literals are pushed as they come;
//! - each supported [`SearchKey`] pops its operands and pushes the
//!   filter it builds;
//! - once all tokens are consumed, the remaining operands are folded
//!   into one conjunction, values left behind by unsupported keys are
//!   logged and discarded.
//!
//! All the state lives in the [`SearchParser::parse`] call, so
//! sessions can parse concurrently without sharing anything.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::{
    key::{self, OperandKind, Resolved, SearchKey},
    tokenizer, Address, Error, Result, SearchFilter, SearchParserConfig,
};

/// The outcome of a successful parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchCriteria {
    /// The filter to apply to every stored message.
    pub filter: SearchFilter,

    /// Tokens discarded during reduction, in command order. They come
    /// from search keys this parser does not implement.
    pub ignored: Vec<String>,
}

/// The search parser.
#[derive(Clone, Debug, Default)]
pub struct SearchParser {
    config: SearchParserConfig,
}

impl SearchParser {
    pub fn new(config: SearchParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchParserConfig {
        &self.config
    }

    /// Parses the given `SEARCH` argument line.
    pub fn parse(&self, request: impl AsRef<str>) -> Result<SearchCriteria> {
        let request = request.as_ref();
        debug!(request, "parse search request");

        self.config.validate()?;
        let tokens = tokenizer::tokenize(request, self.config.protect_all_quoted_phrases)?;
        let mut stack = OperandStack::new(&self.config);

        for token in tokens {
            match key::resolve(token) {
                Resolved::Literal(literal) => stack.push_literal(literal),
                Resolved::Key(key) => stack.build(key)?,
            }
        }

        let criteria = stack.reduce(request)?;
        debug!(filter = %criteria.filter, ignored = ?criteria.ignored, "built search filter");

        Ok(criteria)
    }
}

/// Parses the given `SEARCH` argument line with the default
/// configuration, discarding diagnostics.
pub fn parse_search(request: impl AsRef<str>) -> Result<SearchFilter> {
    Ok(SearchParser::default().parse(request)?.filter)
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Operand {
    Literal(String),
    Filter(SearchFilter),
    /// Binary combinator waiting for its left operand.
    Pending(SearchKey, SearchFilter),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "value `{literal}`"),
            Self::Filter(filter) => write!(f, "search filter `{filter}`"),
            Self::Pending(key, _) => write!(f, "unfinished {key}"),
        }
    }
}

struct OperandStack<'a> {
    config: &'a SearchParserConfig,
    operands: Vec<Operand>,
    /// Consecutive `SUBJECT` builds.
    subjects: usize,
    ignored: Vec<String>,
}

impl<'a> OperandStack<'a> {
    fn new(config: &'a SearchParserConfig) -> Self {
        Self {
            config,
            operands: Vec::new(),
            subjects: 0,
            ignored: Vec::new(),
        }
    }

    fn push_literal(&mut self, literal: String) {
        trace!(literal, "push literal");
        self.operands.push(Operand::Literal(literal));
    }

    /// Pushes a built filter, completing any combinator waiting for
    /// its left operand.
    fn push_filter(&mut self, mut filter: SearchFilter) {
        while let Some(Operand::Pending(key, right)) = self.operands.last() {
            trace!(%key, "complete deferred combinator");
            filter = combine(*key, filter, right.clone());
            self.operands.pop();
        }

        trace!(%filter, "push filter");
        self.operands.push(Operand::Filter(filter));
    }

    fn pop_literal(&mut self, key: SearchKey) -> Result<String> {
        match self.operands.pop() {
            Some(Operand::Literal(literal)) => Ok(literal),
            Some(operand) => Err(missing_operand(key, OperandKind::Literal, operand)),
            None => Err(missing_operand(key, OperandKind::Literal, "nothing")),
        }
    }

    fn pop_filter(&mut self, key: SearchKey) -> Result<SearchFilter> {
        match self.operands.pop() {
            Some(Operand::Filter(filter)) => Ok(filter),
            Some(operand) => Err(missing_operand(key, OperandKind::Filter, operand)),
            None => Err(missing_operand(key, OperandKind::Filter, "nothing")),
        }
    }

    /// Pops the top operand only if it is a built filter.
    fn pop_adjacent_filter(&mut self) -> Option<SearchFilter> {
        match self.operands.last() {
            Some(Operand::Filter(_)) => match self.operands.pop() {
                Some(Operand::Filter(filter)) => Some(filter),
                _ => None,
            },
            _ => None,
        }
    }

    fn build(&mut self, key: SearchKey) -> Result<()> {
        trace!(%key, arity = key.arity(), "build search key");

        match key {
            SearchKey::All => (),
            SearchKey::Subject => {
                let pattern = self.pop_literal(key)?;
                self.push_filter(SearchFilter::Subject(pattern));
                self.subjects += 1;

                if Some(self.subjects) == self.config.subject_fold_threshold {
                    self.fold_recent_filters();
                    self.subjects = 1;
                }
            }
            SearchKey::To => {
                let addr = Address::parse(self.pop_literal(key)?)?;
                self.subjects = 0;
                self.push_filter(SearchFilter::To(addr));
            }
            SearchKey::And | SearchKey::Or => {
                self.subjects = 0;
                let filter = self.pop_filter(key)?;

                match self.pop_adjacent_filter() {
                    Some(right) => self.push_filter(combine(key, filter, right)),
                    None => {
                        debug!(%key, "defer search key until its left operand is built");
                        self.operands.push(Operand::Pending(key, filter));
                    }
                }
            }
            SearchKey::Not => {
                self.subjects = 0;
                let mut filter = self.pop_filter(key)?;

                if let Some(adjacent) = self.pop_adjacent_filter() {
                    trace!("fold adjacent filter before negation");
                    filter = SearchFilter::and(filter, adjacent);
                }

                self.push_filter(SearchFilter::not(filter));
            }
        }

        Ok(())
    }

    /// Folds the two most recently built filters into a conjunction.
    fn fold_recent_filters(&mut self) {
        let Some(newer) = self.pop_adjacent_filter() else {
            return;
        };

        match self.pop_adjacent_filter() {
            Some(older) => {
                trace!("fold consecutive subject filters");
                self.operands
                    .push(Operand::Filter(SearchFilter::and(newer, older)));
            }
            None => self.operands.push(Operand::Filter(newer)),
        }
    }

    fn ignore(&mut self, literal: String) {
        if key::is_unsupported_key(&literal) {
            warn!(key = literal, "ignore unsupported search key");
        } else {
            warn!(value = literal, "ignore search value left unconsumed");
        }

        self.ignored.push(literal);
    }

    /// Reduces the remaining operands into one filter using implicit
    /// conjunction.
    fn reduce(mut self, request: &str) -> Result<SearchCriteria> {
        let max_steps = self
            .config
            .max_reduce_steps
            .unwrap_or(self.operands.len());
        let mut steps = 0;

        while self.operands.len() > 1 {
            if steps >= max_steps {
                return Err(Error::ReduceStepsExceededError(steps));
            }

            steps += 1;

            let (Some(first), Some(second)) = (self.operands.pop(), self.operands.pop()) else {
                break;
            };

            match (first, second) {
                (Operand::Filter(left), Operand::Filter(right)) => {
                    self.operands
                        .push(Operand::Filter(SearchFilter::and(left, right)));
                }
                (Operand::Pending(key, _), _) | (_, Operand::Pending(key, _)) => {
                    return Err(Error::DanglingCombinatorError(key));
                }
                (Operand::Literal(literal), other) | (other, Operand::Literal(literal)) => {
                    self.ignore(literal);
                    self.operands.push(other);
                }
            }
        }

        let filter = match self.operands.pop() {
            Some(Operand::Filter(filter)) => filter,
            Some(Operand::Pending(key, _)) => return Err(Error::DanglingCombinatorError(key)),
            Some(Operand::Literal(literal)) => {
                self.ignore(literal);
                return Err(Error::NoSupportedSearchCriteriaError(request.to_owned()));
            }
            // only ALL keys were given
            None => SearchFilter::All,
        };

        Ok(SearchCriteria {
            filter,
            ignored: self.ignored,
        })
    }
}

fn combine(key: SearchKey, left: SearchFilter, right: SearchFilter) -> SearchFilter {
    match key {
        SearchKey::Or => SearchFilter::or(left, right),
        _ => SearchFilter::and(left, right),
    }
}

fn missing_operand(key: SearchKey, expected: OperandKind, found: impl ToString) -> Error {
    Error::MissingOperandError(key, expected, found.to_string())
}
