//! Adaptive polling with exponential retry backoff
//!
//! Polls a fallible async source on a self-tuning cadence: when fresh
//! data arrives faster than the configured floor the interval shrinks
//! toward it, otherwise it stretches toward the ceiling. Failures back
//! off exponentially from the base delay and give up after a bounded
//! number of retries, surfacing the last error.
//!
//! The schedule arithmetic is a plain state machine; only `run_poll`
//! touches the clock.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Polling cadence configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Starting interval between polls.
    pub base_delay: Duration,
    /// Fastest the adaptive interval may shrink to.
    pub min_delay: Duration,
    /// Slowest the interval may stretch to; also caps retry backoff.
    pub max_delay: Duration,
    /// Consecutive failures tolerated before giving up.
    pub retry_count: u32,
    /// Whether the interval adapts to data change frequency.
    pub adaptive: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(1000),
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(2000),
            retry_count: 3,
            adaptive: true,
        }
    }
}

/// Interval and retry state between polls.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    config: PollConfig,
    current_delay: Duration,
    attempts: u32,
}

impl PollSchedule {
    pub fn new(config: PollConfig) -> Self {
        let current_delay = config.base_delay;
        Self {
            config,
            current_delay,
            attempts: 0,
        }
    }

    /// Record a successful poll whose data changed and return the next
    /// interval. Data arriving faster than the floor shrinks the
    /// interval by 20%, slower stretches it by 20%, clamped to the
    /// configured band. Resets the retry counter.
    pub fn on_changed(&mut self, since_last_success: Duration) -> Duration {
        self.attempts = 0;
        if self.config.adaptive {
            self.current_delay = if since_last_success < self.config.min_delay {
                self.current_delay.mul_f64(0.8).max(self.config.min_delay)
            } else {
                self.current_delay.mul_f64(1.2).min(self.config.max_delay)
            };
        }
        self.current_delay
    }

    /// Successful poll with unchanged data keeps the current interval.
    pub fn on_unchanged(&self) -> Duration {
        self.current_delay
    }

    /// Record a failed poll. `Some(backoff)` to retry after that long,
    /// `None` once the retry budget is spent.
    pub fn on_failure(&mut self) -> Option<Duration> {
        if self.attempts >= self.config.retry_count {
            return None;
        }
        let backoff = self.config.base_delay * 2u32.pow(self.attempts);
        self.attempts += 1;
        Some(backoff.min(self.config.max_delay))
    }

    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }
}

/// Why a poll loop returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError<E> {
    #[error("poll failed after {attempts} retries: {last}")]
    RetriesExhausted { attempts: u32, last: E },
}

/// Poll `fetch` until cancelled, delivering changed results.
///
/// `has_changed` compares the previous delivered value (if any) with
/// the fresh one; unchanged results are neither delivered nor do they
/// adapt the interval. Cancellation via the watch channel (or its
/// sender dropping) ends the loop cleanly; a response still in flight
/// when cancellation lands is never applied.
pub async fn run_poll<T, E, F, Fut>(
    config: PollConfig,
    mut fetch: F,
    mut has_changed: impl FnMut(Option<&T>, &T) -> bool,
    mut deliver: impl FnMut(&T),
    mut cancel: watch::Receiver<bool>,
) -> Result<(), PollError<E>>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let retry_count = config.retry_count;
    let mut schedule = PollSchedule::new(config);
    let mut previous: Option<T> = None;
    let mut last_success = Instant::now();

    loop {
        if *cancel.borrow() {
            return Ok(());
        }

        let outcome = fetch().await;
        // A cancellation that arrived while the fetch was in flight
        // must suppress the response entirely
        if *cancel.borrow() {
            return Ok(());
        }

        let delay = match outcome {
            Ok(result) => {
                let now = Instant::now();
                let since_last = now - last_success;
                last_success = now;

                let delay = if has_changed(previous.as_ref(), &result) {
                    let delay = schedule.on_changed(since_last);
                    deliver(&result);
                    delay
                } else {
                    schedule.on_unchanged()
                };
                previous = Some(result);
                delay
            }
            Err(err) => match schedule.on_failure() {
                Some(backoff) => {
                    warn!(error = %err, backoff_ms = backoff.as_millis() as u64, "Poll failed, retrying");
                    backoff
                }
                None => {
                    return Err(PollError::RetriesExhausted {
                        attempts: retry_count,
                        last: err,
                    });
                }
            },
        };

        debug!(delay_ms = delay.as_millis() as u64, "Next poll scheduled");
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    return Ok(());
                }
            }
        }
    }
}
