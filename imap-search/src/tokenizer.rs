//! # Search tokenizer
//!
//! Module dedicated to splitting the raw argument of a `SEARCH`
//! command into tokens ready for stack reduction. Quoted phrases are
//! lexed with [`chumsky`].
//!
//! Tokens are returned in processing order, which is the reverse of
//! the command order: IMAP search keys are written before their
//! operands, so reversing lets operands land on the stack before the
//! key that consumes them.

use chumsky::prelude::*;
use tracing::trace;

use crate::{Error, Result};

pub(crate) type ParserError<'a> = extra::Err<Rich<'a, char>>;

const ALL: &str = "ALL";
const CHARSET: &str = "CHARSET";
const SUPPORTED_CHARSETS: [&str; 2] = ["US-ASCII", "UTF-8"];

/// The search token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    /// Bare word, which may name a search key.
    Atom(String),
    /// Decoded content of a protected quoted phrase, always a literal.
    Quoted(String),
}

impl Token {
    pub fn atom(atom: impl ToString) -> Self {
        Self::Atom(atom.to_string())
    }

    pub fn quoted(phrase: impl ToString) -> Self {
        Self::Quoted(phrase.to_string())
    }
}

#[derive(Clone, Debug)]
enum Segment<'a> {
    Raw(&'a str),
    Quoted(String),
}

/// Splits the given request into tokens, in processing order.
///
/// Only the first quoted phrase is kept as one [`Token::Quoted`],
/// unless `protect_all_quoted_phrases` is set. The other phrases go
/// back to the raw text and get split on whitespace. Parentheses
/// outside protected phrases are removed without tracking grouping.
/// A trailing `ALL` atom, which comes first in processing order, is
/// dropped.
///
/// An empty list means the request only contained `ALL`.
pub fn tokenize(
    request: impl AsRef<str>,
    protect_all_quoted_phrases: bool,
) -> Result<Vec<Token>> {
    let request = request.as_ref().trim_end_matches(['\r', '\n']).trim();
    let request = strip_charset(request)?;

    let segments = segments()
        .then_ignore(end())
        .parse(request)
        .into_result()
        .map_err(|errs| {
            let errs = errs.into_iter().map(|err| err.into_owned()).collect();
            Error::LexSearchRequestError(errs, request.to_owned())
        })?;

    let mut tokens = Vec::new();
    let mut raw = String::new();
    let mut protected = false;

    for segment in segments {
        match segment {
            Segment::Raw(text) => raw.push_str(text),
            Segment::Quoted(phrase) if protect_all_quoted_phrases || !protected => {
                push_atoms(&mut tokens, &raw);
                raw.clear();
                tokens.push(Token::Quoted(phrase));
                protected = true;
            }
            Segment::Quoted(phrase) => {
                raw.push('"');
                raw.push_str(&phrase);
                raw.push('"');
            }
        }
    }

    push_atoms(&mut tokens, &raw);

    if tokens.is_empty() {
        return Err(Error::NoSearchCriteriaError);
    }

    tokens.reverse();

    if matches!(&tokens[0], Token::Atom(atom) if atom == ALL) {
        tokens.remove(0);
    }

    trace!(?tokens, "tokenized search request");
    Ok(tokens)
}

fn push_atoms(tokens: &mut Vec<Token>, raw: &str) {
    let raw = raw.replace(['(', ')'], "");
    tokens.extend(raw.split_whitespace().map(Token::atom));
}

/// Consumes a leading `CHARSET <name>` specification.
fn strip_charset(request: &str) -> Result<&str> {
    let Some((key, rest)) = split_first_word(request) else {
        return Ok(request);
    };

    if key != CHARSET {
        return Ok(request);
    }

    let (charset, rest) = split_first_word(rest).ok_or(Error::MissingCharsetError)?;
    let charset = charset.trim_matches('"');

    if !SUPPORTED_CHARSETS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(charset))
    {
        return Err(Error::UnsupportedCharsetError(charset.to_owned()));
    }

    Ok(rest)
}

fn split_first_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();

    if input.is_empty() {
        return None;
    }

    match input.find(char::is_whitespace) {
        Some(i) => Some((&input[..i], input[i..].trim_start())),
        None => Some((input, "")),
    }
}

/// Raw text and quoted phrases, in order. A quote with no closing
/// quote stays raw text.
fn segments<'a>() -> impl Parser<'a, &'a str, Vec<Segment<'a>>, ParserError<'a>> + Clone {
    choice((
        quoted_phrase().map(Segment::Quoted),
        none_of(['"'])
            .repeated()
            .at_least(1)
            .to_slice()
            .map(Segment::Raw),
        dquote().to_slice().map(Segment::Raw),
    ))
    .repeated()
    .collect()
}

/// Quoted phrase, delimiting quotes excluded, `\"` and `\\` escapes
/// decoded.
fn quoted_phrase<'a>() -> impl Parser<'a, &'a str, String, ParserError<'a>> + Clone {
    let escapable_chars = ['\\', '"'];

    dquote()
        .ignore_then(
            choice((
                bslash().ignore_then(one_of(escapable_chars)),
                none_of(escapable_chars),
            ))
            .repeated()
            .collect::<String>(),
        )
        .then_ignore(dquote())
}

fn bslash<'a>() -> impl Parser<'a, &'a str, char, ParserError<'a>> + Clone {
    just('\\').labelled("backslash")
}

fn dquote<'a>() -> impl Parser<'a, &'a str, char, ParserError<'a>> + Clone {
    just('"').labelled("double quote")
}
