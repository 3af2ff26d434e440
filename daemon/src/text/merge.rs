//! Splices a transliteration result back into the live buffer.

use crate::text::tokenize;

/// Result of attempting to merge a transliteration response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The trailing word still matched the requested word; the new buffer
    /// contents (rejoined with single spaces, one trailing space appended).
    Merged(String),
    /// The buffer moved on while the request was in flight; nothing written.
    Stale,
}

/// Replace the trailing word of `buffer` with `result`, provided the trailing
/// word still equals `requested`.
///
/// The buffer is re-tokenized at call time, so a response that no longer
/// corresponds to the current trailing word is reported as `Stale` and must
/// be discarded by the caller. Words before the trailing position are never
/// touched.
pub fn splice_trailing(buffer: &str, requested: &str, result: &str) -> MergeOutcome {
    let mut words = tokenize::words(buffer);
    match words.last() {
        Some(&trailing) if trailing == requested => {
            let last = words.len() - 1;
            words[last] = result;
            let mut merged = words.join(" ");
            merged.push(' ');
            MergeOutcome::Merged(merged)
        }
        _ => MergeOutcome::Stale,
    }
}
