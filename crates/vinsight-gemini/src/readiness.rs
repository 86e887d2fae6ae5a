//! Bounded-retry readiness gate for uploaded files.
//!
//! An uploaded file is not immediately usable: it sits in `Processing`
//! until the service finishes ingesting it. This gate polls the file
//! state until it turns `Active`, reports failure on `Failed`, and
//! gives up after a fixed number of polls. The poll operation is
//! injected as a closure so tests run without real delays.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{GeminiError, GeminiResult};
use crate::types::FileState;

/// Polls a file's state until it becomes usable.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    /// Maximum number of polls before giving up.
    max_retries: u32,
    /// Wait between consecutive polls.
    delay: Duration,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self {
            max_retries: 5,
            delay: Duration::from_secs(5),
        }
    }
}

impl ReadinessGate {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Poll until the file is `Active`.
    ///
    /// Returns `Ok(())` once `Active` is observed, with no further polls
    /// or waiting. `Failed` aborts immediately with
    /// [`GeminiError::FileFailed`]; a budget of zero, or a file that
    /// never leaves `Processing` within the budget, yields
    /// [`GeminiError::ActivationTimeout`] after exactly `max_retries`
    /// polls. Errors from the poll itself propagate unchanged.
    pub async fn await_ready<F, Fut>(&self, poll: F) -> GeminiResult<()>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = GeminiResult<FileState>>,
    {
        for attempt in 0..self.max_retries {
            match poll().await? {
                FileState::Active => {
                    debug!(polls = attempt + 1, "File is active");
                    return Ok(());
                }
                FileState::Failed => {
                    warn!(polls = attempt + 1, "File entered FAILED state");
                    return Err(GeminiError::FileFailed);
                }
                state => {
                    debug!(?state, attempt = attempt + 1, "File not ready yet");
                    // No point sleeping after the final poll
                    if attempt + 1 < self.max_retries {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        warn!(max_retries = self.max_retries, "File activation timed out");
        Err(GeminiError::ActivationTimeout {
            attempts: self.max_retries,
        })
    }
}
