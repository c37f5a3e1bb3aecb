//! Circuit breaker guarding the lookup service.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Default cooldown before the breaker admits a fresh attempt.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(300);

/// Suppresses lookup calls for a cooldown window after a transport failure.
///
/// Two states: closed (calls permitted) and open (calls suppressed until the
/// cooldown elapses). There is no half-open probing state; once the cooldown
/// has elapsed the next call is admitted, and that call's own outcome either
/// closes the breaker or re-opens it for a fresh window. Re-enable is driven
/// purely by elapsed-time checks, never by a background timer.
///
/// One instance is shared by all resolver calls for the process lifetime.
pub struct CircuitBreaker {
    opened_at: Mutex<Option<Instant>>,
    cooldown: Duration,
}

impl CircuitBreaker {
    /// Creates a breaker with the given cooldown window.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            opened_at: Mutex::new(None),
            cooldown,
        }
    }

    /// Creates a breaker with the default five-minute cooldown.
    #[must_use]
    pub fn with_default_cooldown() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }

    /// Returns true if a call may proceed: the breaker is closed, or it is
    /// open but the cooldown has elapsed. In the latter case the admitted
    /// call is the fresh attempt and its outcome must be reported back.
    #[must_use]
    pub fn allow_call(&self) -> bool {
        let opened_at = self.opened_at.lock();
        match *opened_at {
            None => true,
            Some(opened) => opened.elapsed() >= self.cooldown,
        }
    }

    /// Records a transport-level failure.
    ///
    /// Opens the breaker when closed. While open and still cooling down this
    /// is a no-op, so a burst of concurrent failures cannot keep re-arming
    /// the window; only the first failure of a streak sets the clock. A
    /// failure reported after the cooldown elapsed (a failed fresh attempt)
    /// re-opens for a full new window.
    pub fn report_failure(&self) {
        let mut opened_at = self.opened_at.lock();
        match *opened_at {
            None => {
                warn!(cooldown_secs = self.cooldown.as_secs(), "Circuit breaker opened");
                *opened_at = Some(Instant::now());
            }
            Some(opened) if opened.elapsed() >= self.cooldown => {
                warn!(
                    cooldown_secs = self.cooldown.as_secs(),
                    "Fresh attempt failed, circuit breaker re-opened"
                );
                *opened_at = Some(Instant::now());
            }
            Some(_) => {}
        }
    }

    /// Records a successful call, closing the breaker.
    pub fn report_success(&self) {
        let mut opened_at = self.opened_at.lock();
        if opened_at.take().is_some() {
            debug!("Circuit breaker closed");
        }
    }

    /// Returns true while calls are being suppressed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.allow_call()
    }

    /// Opens the breaker unconditionally, starting a fresh cooldown.
    /// Manual override for hosts that want to suspend lookups.
    pub fn force_open(&self) {
        let mut opened_at = self.opened_at.lock();
        warn!("Circuit breaker forced open");
        *opened_at = Some(Instant::now());
    }

    /// Closes the breaker unconditionally.
    pub fn force_close(&self) {
        let mut opened_at = self.opened_at.lock();
        if opened_at.take().is_some() {
            debug!("Circuit breaker forced closed");
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::with_default_cooldown()
    }
}
