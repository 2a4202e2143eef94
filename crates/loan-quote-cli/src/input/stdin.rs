use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Request document piped on stdin, if any.
///
/// Interactive terminals are never read, so `emi quote --principal ...`
/// does not block waiting for input.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_document(io::stdin().lock())
}

/// Whitespace-only input yields `None`, anything else must parse as `T`.
pub fn read_document<T, R>(mut reader: R) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read stdin: {e}"))?;

    let document = buffer.trim();
    if document.is_empty() {
        return Ok(None);
    }
    let parsed = serde_json::from_str(document)
        .map_err(|e| format!("Failed to parse stdin: {e}"))?;
    Ok(Some(parsed))
}
