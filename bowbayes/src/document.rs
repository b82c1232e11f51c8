//! Reading pre-tokenized documents.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::Result;

/// Reads a pre-tokenized document, one token per line.
///
/// Each line is stripped of surrounding whitespace and empty lines are skipped. Lines end with
/// `\n` or `\r\n`; a lone `\r` is not a line break, so a document using classic Mac line
/// endings is read as a single token.
///
/// # Errors
///
/// [`BowBayesError::UTF8Error`](crate::BowBayesError::UTF8Error) will be returned if the
/// document is not valid UTF-8. Errors of `rdr` are returned as is.
pub fn read_tokens<R>(mut rdr: R) -> Result<Vec<String>>
where
    R: Read,
{
    let mut buf = vec![];
    rdr.read_to_end(&mut buf)?;
    let text = String::from_utf8(buf)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect())
}

/// Reads a pre-tokenized document from a file.
///
/// # Errors
///
/// [`BowBayesError::IOError`](crate::BowBayesError::IOError) will be returned if the file is
/// unreadable.
pub fn read_tokens_from_path<P>(path: P) -> Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let f = File::open(path)?;
    read_tokens(f)
}
