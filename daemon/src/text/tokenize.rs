//! Whitespace tokenization of the editing buffer.
//!
//! The word list is an ephemeral view: it is recomputed on every event and
//! never stored. Rejoining it with single spaces reproduces the semantic
//! content the merger writes back.

/// Split the buffer into whitespace-delimited words.
///
/// Leading/trailing whitespace and runs of whitespace are collapsed, so an
/// empty or all-whitespace buffer yields an empty list.
pub fn words(buffer: &str) -> Vec<&str> {
    buffer.split_whitespace().collect()
}

/// The last whitespace-delimited word of the buffer, if any.
pub fn trailing_word(buffer: &str) -> Option<&str> {
    buffer.split_whitespace().next_back()
}
