pub mod client;

pub use client::HttpTransliterator;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::ModelId;

/// Failure modes of a transliteration call.
///
/// None of these ever mutates the buffer or the dedup state; the word simply
/// stays in source script and the user keeps typing.
#[derive(Error, Debug)]
pub enum TranslitError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Remote transliteration boundary: one word in, one transliterated string out.
///
/// No retry and no request cancellation; staleness of late responses is the
/// caller's concern (validated at merge time).
#[async_trait]
pub trait Transliterate: Send + Sync {
    async fn transliterate(&self, word: &str, model: ModelId) -> Result<String, TranslitError>;
}
