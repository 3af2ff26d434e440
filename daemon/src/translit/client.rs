//! HTTP implementation of the transliteration boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::model::ModelId;
use crate::translit::{Transliterate, TranslitError};

#[derive(Serialize)]
struct TransliterateRequest<'a> {
    text: &'a str,
    model_id: u32,
}

#[derive(Deserialize)]
struct TransliterateResponse {
    output: String,
}

/// Client for the remote transliteration service.
///
/// Issues a single `POST <endpoint>` per call with body
/// `{"text": <word>, "model_id": <id>}` and expects `{"output": <string>}`.
/// The only timeout is the transport-level client timeout.
pub struct HttpTransliterator {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransliterator {
    pub fn new(endpoint: String, request_timeout: Duration) -> Result<Self, TranslitError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl Transliterate for HttpTransliterator {
    async fn transliterate(&self, word: &str, model: ModelId) -> Result<String, TranslitError> {
        let request = TransliterateRequest {
            text: word,
            model_id: model.wire_id(),
        };

        debug!("Requesting transliteration of '{}' from {}", word, model);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslitError::Status(status));
        }

        let body = response.text().await?;
        let parsed: TransliterateResponse = serde_json::from_str(&body)?;

        debug!("Transliterated '{}' -> '{}'", word, parsed.output);
        Ok(parsed.output)
    }
}
