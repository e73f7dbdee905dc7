//! # Request line reader
//!
//! Module dedicated to extracting the `SEARCH` argument from the
//! request stream, up to the line terminator.

use std::io::BufRead;

use tracing::trace;

use crate::{Error, Result};

/// Reads the rest of the current request line, without its line
/// terminator.
pub fn read_search_request(reader: &mut impl BufRead) -> Result<String> {
    let mut line = Vec::new();

    reader
        .read_until(b'\n', &mut line)
        .map_err(Error::ReadRequestLineError)?;

    into_request(line)
}

/// Async version of [`read_search_request`].
#[cfg(feature = "tokio")]
pub async fn read_search_request_async(
    reader: &mut (impl tokio::io::AsyncBufRead + Unpin),
) -> Result<String> {
    use tokio::io::AsyncBufReadExt;

    let mut line = Vec::new();

    reader
        .read_until(b'\n', &mut line)
        .await
        .map_err(Error::ReadRequestLineError)?;

    into_request(line)
}

fn into_request(mut line: Vec<u8>) -> Result<String> {
    if line.last() == Some(&b'\n') {
        line.pop();
    }

    if line.last() == Some(&b'\r') {
        line.pop();
    }

    let request = String::from_utf8(line).map_err(Error::ParseRequestLineAsUtf8StringError)?;
    trace!(request, "read search request line");

    Ok(request)
}
