// Common test helpers for lipikad tests
//
// Provides a recording fake for the transliteration boundary and config
// builders with test-friendly timings.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

use lipikad::config::{Config, DedupPolicy};
use lipikad::model::ModelId;
use lipikad::translit::{Transliterate, TranslitError};

/// Fake transliteration service: records every call, answers from a fixed
/// Hinglish -> Devanagari table, and wraps unknown words in «» so tests can
/// tell outputs from inputs.
pub struct RecordingTransliterator {
    pub calls: Mutex<Vec<(String, u32)>>,
    outputs: HashMap<&'static str, &'static str>,
    delay: Duration,
    fail: bool,
}

impl RecordingTransliterator {
    pub fn new() -> Self {
        let outputs = HashMap::from([
            ("namaste", "नमस्ते"),
            ("sir", "सर"),
            ("mera", "मेरा"),
            ("naam", "नाम"),
            ("Rahul", "राहुल"),
            ("hai", "है"),
            ("kya", "क्या"),
            ("haal", "हाल"),
        ]);
        Self {
            calls: Mutex::new(Vec::new()),
            outputs,
            delay: Duration::ZERO,
            fail: false,
        }
    }

    /// Responses are delayed, keeping requests in flight while tests edit.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    /// Every call fails with a service error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub async fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Transliterate for RecordingTransliterator {
    async fn transliterate(&self, word: &str, model: ModelId) -> Result<String, TranslitError> {
        self.calls
            .lock()
            .await
            .push((word.to_string(), model.wire_id()));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail {
            return Err(TranslitError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }

        Ok(self
            .outputs
            .get(word)
            .map(|output| output.to_string())
            .unwrap_or_else(|| format!("«{}»", word)))
    }
}

/// Config with a short quiet period and a rate limit loose enough to stay
/// out of the way.
pub fn test_config(quiet_period_ms: u64) -> Config {
    let mut config = Config::default();
    config.debounce.quiet_period_ms = quiet_period_ms;
    config.rate_limit.requests_per_second = 100;
    config.rate_limit.burst_capacity = 100;
    config
}

pub fn test_config_with_policy(quiet_period_ms: u64, policy: DedupPolicy) -> Config {
    let mut config = test_config(quiet_period_ms);
    config.debounce.dedup_policy = policy;
    config
}
