//! # Error
//!
//! Module dedicated to search parsing errors. It contains an
//! [`Error`] enum based on [`thiserror::Error`] and a type alias
//! [`Result`].

use std::{io, string::FromUtf8Error};

use chumsky::error::Rich;
use thiserror::Error;

use crate::key::{OperandKind, SearchKey};

/// The global `Result` alias of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot lex search request `{1}`")]
    LexSearchRequestError(Vec<Rich<'static, char>>, String),
    #[error("cannot parse search: no search criteria")]
    NoSearchCriteriaError,
    #[error("cannot parse search `{0}`: no supported search criteria")]
    NoSupportedSearchCriteriaError(String),
    #[error("cannot build search key {0}: {1} expected, found {2}")]
    MissingOperandError(SearchKey, OperandKind, String),
    #[error("cannot build search key {0}: left operand never came")]
    DanglingCombinatorError(SearchKey),
    #[error("cannot parse recipient address `{1}`")]
    ParseAddressError(#[source] email_address::Error, String),
    #[error("cannot parse search: charset expected after CHARSET")]
    MissingCharsetError,
    #[error("cannot parse search: unsupported charset {0}")]
    UnsupportedCharsetError(String),
    #[error("invalid subject fold threshold {0}: at least 2 expected")]
    InvalidSubjectFoldThresholdError(usize),
    #[error("cannot reduce search stack: gave up after {0} steps")]
    ReduceStepsExceededError(usize),
    #[error("cannot read search request line")]
    ReadRequestLineError(#[source] io::Error),
    #[error("cannot parse search request line as string")]
    ParseRequestLineAsUtf8StringError(#[source] FromUtf8Error),
}

impl Error {
    /// Returns `true` when the error comes from the shape of the
    /// search keys rather than from their values.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingOperandError(..)
                | Self::DanglingCombinatorError(_)
                | Self::ReduceStepsExceededError(_)
        )
    }
}
