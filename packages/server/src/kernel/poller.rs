//! Call-completion polling.
//!
//! The state machine that waits for an externally-tracked call job to reach
//! a terminal state: `Polling -> {Completed, Failed, TimedOut,
//! TransportError}`. Each cycle queries the job status, then suspends for
//! the poll interval. Elapsed time is accumulated logically (interval per
//! cycle), so the timeout budget is deterministic and tests can drive the
//! whole wait on tokio's virtual clock.
//!
//! Transient transport errors during a status check do not abort the wait;
//! they are tolerated up to a consecutive-error cap, after which the poller
//! escalates instead of masking a permanently broken status endpoint.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::traits::{BaseCallService, CallServiceError, CallStatus};

/// Sentinel returned when a completed call carries no transcript field.
pub const NO_TRANSCRIPT: &str = "No transcript available";

/// Tuning for one polling wait.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Suspension between status checks
    pub interval: Duration,
    /// Total budget before the wait is declared timed out
    pub timeout: Duration,
    /// Consecutive transport errors tolerated before escalating
    pub max_consecutive_transport_errors: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(600),
            max_consecutive_transport_errors: 12,
        }
    }
}

impl PollConfig {
    fn validate(&self) -> Result<(), PollError> {
        if self.interval.is_zero() {
            return Err(PollError::InvalidConfig("poll interval must be positive".into()));
        }
        if self.timeout.is_zero() {
            return Err(PollError::InvalidConfig("poll timeout must be positive".into()));
        }
        if self.interval > self.timeout {
            return Err(PollError::InvalidConfig(format!(
                "poll interval ({:?}) must not exceed timeout ({:?})",
                self.interval, self.timeout
            )));
        }
        Ok(())
    }
}

/// Terminal outcome of one polling wait. Produced exactly once per call job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    /// The call completed; transcript text (or the sentinel when absent)
    Transcript(String),
    /// The service reported the call as failed
    Failure,
    /// No terminal status within the timeout budget
    Timeout,
}

/// Errors that abort a polling wait without a `CallResult`.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("invalid poll configuration: {0}")]
    InvalidConfig(String),

    /// The status endpoint failed too many times in a row
    #[error("status endpoint unreachable after {0} consecutive attempts")]
    TransportExhausted(u32),
}

/// Polls a call job until a terminal result or the timeout budget runs out.
pub struct CallPoller {
    call_service: Arc<dyn BaseCallService>,
    config: PollConfig,
}

impl CallPoller {
    pub fn new(call_service: Arc<dyn BaseCallService>, config: PollConfig) -> Self {
        Self {
            call_service,
            config,
        }
    }

    /// Wait for the job to reach a terminal state.
    ///
    /// The first terminal status observed wins; the job is never polled
    /// again after a terminal result has been produced.
    pub async fn wait_for_result(&self, call_id: &str) -> Result<CallResult, PollError> {
        self.config.validate()?;

        let mut elapsed = Duration::ZERO;
        let mut consecutive_transport_errors: u32 = 0;

        loop {
            match self.call_service.call_status(call_id).await {
                Ok(CallStatus::Completed { transcript }) => {
                    info!(call_id = %call_id, "Call completed");
                    let text = transcript.unwrap_or_else(|| NO_TRANSCRIPT.to_string());
                    return Ok(CallResult::Transcript(text));
                }
                Ok(CallStatus::Failed) => {
                    warn!(call_id = %call_id, "Call failed, no transcript available");
                    return Ok(CallResult::Failure);
                }
                Ok(CallStatus::Pending) => {
                    debug!(call_id = %call_id, elapsed_secs = elapsed.as_secs(), "Call still pending");
                    consecutive_transport_errors = 0;
                }
                Err(CallServiceError::Transport(e)) => {
                    consecutive_transport_errors += 1;
                    warn!(
                        call_id = %call_id,
                        consecutive = consecutive_transport_errors,
                        error = %e,
                        "Transient error retrieving call status"
                    );
                    if consecutive_transport_errors >= self.config.max_consecutive_transport_errors {
                        return Err(PollError::TransportExhausted(consecutive_transport_errors));
                    }
                }
                Err(CallServiceError::Submission(e)) => {
                    // A non-2xx from the status endpoint is treated the same
                    // as a transport failure: keep polling, bounded by the cap.
                    consecutive_transport_errors += 1;
                    warn!(
                        call_id = %call_id,
                        consecutive = consecutive_transport_errors,
                        error = %e,
                        "Error retrieving call status"
                    );
                    if consecutive_transport_errors >= self.config.max_consecutive_transport_errors {
                        return Err(PollError::TransportExhausted(consecutive_transport_errors));
                    }
                }
            }

            elapsed += self.config.interval;
            if elapsed >= self.config.timeout {
                warn!(call_id = %call_id, "Timed out waiting for the call to complete");
                return Ok(CallResult::Timeout);
            }

            tokio::time::sleep(self.config.interval).await;
        }
    }
}
