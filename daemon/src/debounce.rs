//! Single-slot quiet-period scheduler.
//!
//! At most one timer is outstanding; arming replaces (aborts) the previous
//! one, so a burst of keystrokes collapses into a single fire after the full
//! quiet period has elapsed since the last keystroke.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Debouncer {
    quiet_period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            handle: None,
        }
    }

    /// Arm the timer, cancelling any previously armed one.
    ///
    /// After the quiet period the action is detached into its own task, so a
    /// later re-arm can only cancel a fire that has not happened yet - never
    /// an action already in flight.
    pub fn arm<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let quiet_period = self.quiet_period;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            tokio::spawn(action);
        }));
    }

    /// Cancel a pending fire, if any. Teardown hook for reset/shutdown.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a timer is armed and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
