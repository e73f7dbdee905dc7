#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Rust library to parse the argument of an IMAP `SEARCH` command.
//!
//! The core concept of this library is to turn one request line into
//! one evaluable [`SearchFilter`], following these rules:
//!
//! 1. Supported search keys are `ALL`, `SUBJECT`, `TO`, `AND`, `OR`
//! and `NOT`.
//!
//! 2. Unsupported search keys never fail the command: their values
//! are logged, reported in [`SearchCriteria::ignored`] and discarded.
//!
//! 3. Structural errors (missing operands, empty criteria, invalid
//! addresses) always fail the command.
//!
//! The library also exposes a minimal in-memory [`Mailbox`] to
//! evaluate filters, the way a mock IMAP server would.
//!
//! ```
//! use imap_search::{Address, Envelope, Mailbox};
//!
//! let mailbox: Mailbox = [
//!     Envelope::new("test0Search", [Address::new_nameless("to2@localhost")]),
//!     Envelope::new("test0Search test1Search", [Address::new_nameless("to3@localhost")]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let seqs = mailbox
//!     .search_request("SUBJECT \"test0Search\" SUBJECT \"test1Search\"")
//!     .unwrap();
//!
//! assert_eq!(seqs, vec![2]);
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod filter;
pub mod key;
pub mod mailbox;
pub mod parser;
pub mod reader;
pub mod tokenizer;

#[doc(inline)]
pub use self::{
    address::Address,
    config::SearchParserConfig,
    error::{Error, Result},
    filter::SearchFilter,
    key::SearchKey,
    mailbox::{Envelope, Mailbox},
    parser::{parse_search, SearchCriteria, SearchParser},
    reader::read_search_request,
};

#[cfg(feature = "tokio")]
#[doc(inline)]
pub use self::reader::read_search_request_async;
