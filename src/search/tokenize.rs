//! Text tokenization for indexing file contents.

use anyhow::Context;
use std::path::Path;

/// Longest word emitted; longer alphanumeric runs are split into chunks of this size.
pub(crate) const MAX_WORD_LENGTH: usize = 128;

/// Splits raw bytes into lowercase ASCII alphanumeric words.
///
/// Every maximal run of `[A-Za-z0-9]` is a word. Everything else, including
/// non-ASCII bytes, separates words, so arbitrary (non-UTF-8) file contents
/// are accepted.
pub fn tokenize_bytes(bytes: &[u8]) -> Vec<String> {
    let mut words = vec![];
    let mut current = String::new();

    for &byte in bytes {
        if byte.is_ascii_alphanumeric() {
            current.push(char::from(byte.to_ascii_lowercase()));
            if current.len() == MAX_WORD_LENGTH {
                words.push(std::mem::take(&mut current));
            }
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Reads a file and tokenizes its contents with [`tokenize_bytes`].
pub fn tokenize_file(path: &Path) -> crate::error::Result<Vec<String>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;
    Ok(tokenize_bytes(&bytes))
}
