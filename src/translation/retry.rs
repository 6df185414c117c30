use std::time::Duration;

/// Default number of attempts per provider for one line.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default backoff unit, doubled after every failed attempt.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Bounded retry with exponential backoff.
///
/// Attempt `n` (1-based) that fails is followed by a wait of
/// `base_delay * 2^(n-1)`, except the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Wait before the attempt following failed attempt `attempt`.
    ///
    /// `None` once `attempt` is the final one.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt >= self.max_attempts {
            return None;
        }
        let delay = match 1u32.checked_shl(attempt - 1) {
            Some(factor) => self.base_delay.saturating_mul(factor),
            None if self.base_delay.is_zero() => Duration::ZERO,
            None => Duration::MAX,
        };
        Some(delay)
    }

    /// All waits a fully failing provider goes through, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..self.max_attempts).filter_map(|attempt| self.delay_after(attempt))
    }
}
