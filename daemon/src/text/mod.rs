pub mod merge;
pub mod tokenize;

pub use merge::{splice_trailing, MergeOutcome};
pub use tokenize::{trailing_word, words};
