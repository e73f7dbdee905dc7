//! # Search key
//!
//! Module dedicated to the classification of tokens. A token either
//! names a supported [`SearchKey`] or is a literal value.

use std::fmt;

use crate::tokenizer::Token;

/// The supported search keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchKey {
    All,
    Subject,
    To,
    And,
    Or,
    Not,
}

/// The kind of operands a search key consumes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperandKind {
    Literal,
    Filter,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => write!(f, "value"),
            Self::Filter => write!(f, "search filter"),
        }
    }
}

impl SearchKey {
    const TABLE: [(&'static str, SearchKey); 6] = [
        ("ALL", SearchKey::All),
        ("SUBJECT", SearchKey::Subject),
        ("TO", SearchKey::To),
        ("AND", SearchKey::And),
        ("OR", SearchKey::Or),
        ("NOT", SearchKey::Not),
    ];

    /// Finds the search key named exactly by the given atom. Key
    /// names are upper case, `subject` is a literal.
    pub fn find(atom: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == atom)
            .map(|(_, key)| *key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Subject => "SUBJECT",
            Self::To => "TO",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    /// Number of operands the key pops from the stack.
    pub fn arity(&self) -> usize {
        match self {
            Self::All => 0,
            Self::Subject | Self::To | Self::Not => 1,
            Self::And | Self::Or => 2,
        }
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// IMAP4rev1 search keys recognized but not implemented. They are
/// treated as literals, this list only improves diagnostics.
const UNSUPPORTED_KEYS: &[&str] = &[
    "ANSWERED",
    "BCC",
    "BEFORE",
    "BODY",
    "CC",
    "DELETED",
    "DRAFT",
    "FLAGGED",
    "FROM",
    "HEADER",
    "KEYWORD",
    "LARGER",
    "NEW",
    "OLD",
    "ON",
    "RECENT",
    "SEEN",
    "SENTBEFORE",
    "SENTON",
    "SENTSINCE",
    "SENTDATE",
    "SINCE",
    "SMALLER",
    "TEXT",
    "UID",
    "UNANSWERED",
    "UNDELETED",
    "UNFLAGGED",
    "UNDRAFT",
    "UNKEYWORD",
    "UNSEEN",
];

/// Returns `true` if the literal is a known IMAP search key this
/// parser does not implement.
pub fn is_unsupported_key(literal: &str) -> bool {
    UNSUPPORTED_KEYS
        .iter()
        .any(|key| key.eq_ignore_ascii_case(literal))
}

/// The result of resolving one token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolved {
    Key(SearchKey),
    Literal(String),
}

/// Resolves the given token to either a supported search key or a
/// literal.
///
/// Quoted tokens are always literals. Atoms not naming a key lose
/// one leading and one trailing quote, left over from phrases split
/// on whitespace.
pub fn resolve(token: Token) -> Resolved {
    match token {
        Token::Quoted(phrase) => Resolved::Literal(phrase),
        Token::Atom(atom) => match SearchKey::find(&atom) {
            Some(key) => Resolved::Key(key),
            None => {
                let literal = atom.strip_prefix('"').unwrap_or(&atom);
                let literal = literal.strip_suffix('"').unwrap_or(literal);
                Resolved::Literal(literal.to_owned())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{is_unsupported_key, resolve, Resolved, SearchKey};
    use crate::tokenizer::Token;

    #[test]
    fn keys() {
        assert_eq!(resolve(Token::atom("SUBJECT")), Resolved::Key(SearchKey::Subject));
        assert_eq!(resolve(Token::atom("OR")), Resolved::Key(SearchKey::Or));
        assert_eq!(SearchKey::And.arity(), 2);
        assert_eq!(SearchKey::All.arity(), 0);
        assert_eq!(SearchKey::To.arity(), 1);
    }

    #[test]
    fn lower_case_keys_are_literals() {
        assert_eq!(resolve(Token::atom("or")), Resolved::Literal("or".into()));
        assert_eq!(resolve(Token::atom("Not")), Resolved::Literal("Not".into()));
        assert_eq!(resolve(Token::atom("all")), Resolved::Literal("all".into()));
    }

    #[test]
    fn literals() {
        assert_eq!(
            resolve(Token::atom("SENTDATE")),
            Resolved::Literal("SENTDATE".into())
        );
        assert_eq!(resolve(Token::atom("\"c")), Resolved::Literal("c".into()));
        assert_eq!(resolve(Token::atom("d\"")), Resolved::Literal("d".into()));
        assert_eq!(resolve(Token::atom("\"\"")), Resolved::Literal("".into()));
        assert_eq!(
            resolve(Token::atom("\"\"x\"\"")),
            Resolved::Literal("\"x\"".into())
        );
    }

    #[test]
    fn quoted_keys_are_literals() {
        assert_eq!(resolve(Token::quoted("TO")), Resolved::Literal("TO".into()));
        assert_eq!(resolve(Token::quoted("ALL")), Resolved::Literal("ALL".into()));
        assert_eq!(
            resolve(Token::quoted("\"x\" y")),
            Resolved::Literal("\"x\" y".into())
        );
    }

    #[test]
    fn unsupported() {
        assert!(is_unsupported_key("SENTDATE"));
        assert!(is_unsupported_key("from"));
        assert!(!is_unsupported_key("01-Jan-2020"));
        assert!(!is_unsupported_key("SUBJECT"));
    }
}
