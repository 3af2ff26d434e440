//! The incremental transliteration controller.
//!
//! Owns the live text buffer and decides which word to send, when to send
//! it, and whether a returned result is still relevant. All state lives
//! behind `Arc<Mutex<_>>` so the IPC server and the spawned dispatch tasks
//! share one source of truth.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shared::ipc::StatusInfo;

use crate::config::{Config, DedupPolicy};
use crate::debounce::Debouncer;
use crate::model::{ModelId, ModelSelector};
use crate::rate_limit::DispatchRateLimiter;
use crate::text::{self, MergeOutcome};
use crate::translit::Transliterate;

/// The most recently merged transliteration output, with the word index it
/// landed at. Used only for dispatch deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedWord {
    pub text: String,
    pub index: usize,
}

/// Whether the trailing word should be suppressed as a duplicate of the last
/// accepted output under the configured policy.
pub(crate) fn is_duplicate(
    word: &str,
    index: usize,
    last: Option<&AcceptedWord>,
    policy: DedupPolicy,
) -> bool {
    match (last, policy) {
        (Some(last), DedupPolicy::Value) => last.text == word,
        (Some(last), DedupPolicy::Position) => last.text == word && last.index == index,
        (None, _) => false,
    }
}

#[derive(Clone)]
pub struct EditorState {
    pub config: Config,
    client: Arc<dyn Transliterate>,
    buffer: Arc<Mutex<String>>,
    last_accepted: Arc<Mutex<Option<AcceptedWord>>>,
    selector: Arc<Mutex<ModelSelector>>,
    debounce: Arc<Mutex<Debouncer>>,
    notice_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
    limiter: Arc<DispatchRateLimiter>,
}

impl EditorState {
    pub fn new(config: Config, client: Arc<dyn Transliterate>) -> anyhow::Result<Self> {
        let default_model = ModelId::try_from(config.selector.default_model)
            .map_err(|e| anyhow::anyhow!("Invalid default_model in config: {}", e))?;

        let rate = &config.rate_limit;
        if rate.requests_per_second == 0 || rate.burst_capacity == 0 {
            anyhow::bail!("rate_limit values must be non-zero");
        }
        let limiter = DispatchRateLimiter::new(
            rate.requests_per_second,
            rate.burst_capacity,
            rate.enabled,
        );

        let quiet_period = Duration::from_millis(config.debounce.quiet_period_ms);

        Ok(Self {
            config,
            client,
            buffer: Arc::new(Mutex::new(String::new())),
            last_accepted: Arc::new(Mutex::new(None)),
            selector: Arc::new(Mutex::new(ModelSelector::new(default_model))),
            debounce: Arc::new(Mutex::new(Debouncer::new(quiet_period))),
            notice_handle: Arc::new(Mutex::new(None)),
            limiter: Arc::new(limiter),
        })
    }

    /// Record the full text after a user edit and re-arm the quiet timer.
    ///
    /// Re-arming never cancels a dispatch that already left; late responses
    /// are filtered at merge time instead.
    pub async fn handle_text_change(&self, input: String) {
        {
            let mut buffer = self.buffer.lock().await;
            *buffer = input;
        }

        let state = self.clone();
        self.debounce.lock().await.arm(async move {
            state.dispatch_trailing().await;
        });
        debug!("Text change recorded, quiet timer re-armed");
    }

    /// Quiet-timer action: gate-check the trailing word and call the service.
    pub async fn dispatch_trailing(&self) {
        let (word, index) = {
            let buffer = self.buffer.lock().await;
            let words = text::words(&buffer);
            match words.last() {
                Some(&trailing) => (trailing.to_string(), words.len() - 1),
                None => {
                    debug!("No trailing word, skipping dispatch");
                    return;
                }
            }
        };

        {
            let last = self.last_accepted.lock().await;
            if is_duplicate(&word, index, last.as_ref(), self.config.debounce.dedup_policy) {
                debug!("Trailing word '{}' already accepted, skipping dispatch", word);
                return;
            }
        }

        if !self.limiter.check() {
            warn!("Dispatch rate limited, '{}' left in source script", word);
            return;
        }

        let model = self.selector.lock().await.active();
        info!("Dispatching '{}' to {}", word, model);

        match self.client.transliterate(&word, model).await {
            Ok(output) => self.merge_response(&word, &output).await,
            Err(e) => {
                // Buffer and dedup state stay untouched; the user keeps typing
                // and further edits re-trigger the word.
                warn!("Transliteration of '{}' failed: {}", word, e);
            }
        }
    }

    /// Splice a response into the current buffer if it is still relevant.
    async fn merge_response(&self, requested: &str, output: &str) {
        let mut buffer = self.buffer.lock().await;
        match text::splice_trailing(&buffer, requested, output) {
            MergeOutcome::Merged(merged) => {
                let index = text::words(&merged).len() - 1;
                *buffer = merged;
                *self.last_accepted.lock().await = Some(AcceptedWord {
                    text: output.to_string(),
                    index,
                });
                info!("Merged transliteration '{}' -> '{}'", requested, output);
            }
            MergeOutcome::Stale => {
                debug!("Stale response for '{}' discarded", requested);
            }
        }
    }

    /// Switch the active model and start the notice expiry timer.
    ///
    /// Requests already in flight keep the model id they were dispatched
    /// with; only subsequent dispatches see the new one.
    pub async fn handle_model_change(&self, model: ModelId) {
        self.selector.lock().await.set_active(model);
        info!("{} activated", model);

        let duration = Duration::from_millis(self.config.selector.notice_duration_ms);
        let selector = self.selector.clone();

        let mut slot = self.notice_handle.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            selector.lock().await.clear_notice();
        }));
    }

    /// Clear the buffer and dedup state and cancel a pending quiet timer.
    pub async fn reset(&self) {
        self.debounce.lock().await.cancel();
        self.buffer.lock().await.clear();
        *self.last_accepted.lock().await = None;
        info!("Editor state reset");
    }

    /// Teardown hook: stop pending timer fires. In-flight calls are left to
    /// resolve and fail the relevance check naturally.
    pub async fn shutdown(&self) {
        self.debounce.lock().await.cancel();
        if let Some(handle) = self.notice_handle.lock().await.take() {
            handle.abort();
        }
        info!("Editor controller shut down");
    }

    pub async fn buffer(&self) -> String {
        self.buffer.lock().await.clone()
    }

    pub async fn status(&self) -> StatusInfo {
        let (active_model, notice) = {
            let selector = self.selector.lock().await;
            (
                selector.active().wire_id(),
                selector.notice().map(str::to_string),
            )
        };

        StatusInfo {
            is_running: true,
            active_model,
            notice,
            debounce_armed: self.debounce.lock().await.is_armed(),
            last_accepted: self
                .last_accepted
                .lock()
                .await
                .as_ref()
                .map(|accepted| accepted.text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(text: &str, index: usize) -> AcceptedWord {
        AcceptedWord {
            text: text.to_string(),
            index,
        }
    }

    #[test]
    fn test_no_last_accepted_never_suppresses() {
        assert!(!is_duplicate("namaste", 0, None, DedupPolicy::Value));
        assert!(!is_duplicate("namaste", 0, None, DedupPolicy::Position));
    }

    #[test]
    fn test_value_policy_suppresses_by_text() {
        let last = accepted("नमस्ते", 0);
        assert!(is_duplicate("नमस्ते", 0, Some(&last), DedupPolicy::Value));
        // Same text at a different index is still suppressed.
        assert!(is_duplicate("नमस्ते", 3, Some(&last), DedupPolicy::Value));
        assert!(!is_duplicate("namaste", 0, Some(&last), DedupPolicy::Value));
    }

    #[test]
    fn test_position_policy_requires_same_index() {
        let last = accepted("नमस्ते", 0);
        assert!(is_duplicate("नमस्ते", 0, Some(&last), DedupPolicy::Position));
        // A value-equal word at a new index re-dispatches.
        assert!(!is_duplicate("नमस्ते", 1, Some(&last), DedupPolicy::Position));
    }

    #[test]
    fn test_different_word_never_suppressed() {
        let last = accepted("नमस्ते", 0);
        for policy in [DedupPolicy::Value, DedupPolicy::Position] {
            assert!(!is_duplicate("sir", 1, Some(&last), policy));
        }
    }
}
