use std::time::Duration;

/// High-level classification of an error for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// HTTP status outside 2xx. All of these are retried: transient CDN
    /// errors on segment hosts routinely surface as 4xx as well as 5xx.
    Http(u16),
    /// Any other error (not retried, e.g. a local write failure).
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay (zero = immediately).
    RetryAfter(Duration),
}

/// Bounded retry with a fixed inter-attempt delay.
///
/// The default is three attempts with an immediate re-attempt, which is
/// what segment fetches use unless the `[retry]` config section overrides it.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Build a policy from the optional config section.
    pub fn from_config(cfg: Option<&crate::config::RetryConfig>) -> Self {
        match cfg {
            Some(c) => Self {
                max_attempts: c.max_attempts.max(1),
                delay: Duration::from_secs_f64(c.delay_secs.max(0.0)),
            },
            None => Self::default(),
        }
    }

    /// Decide whether to retry after a failed attempt.
    ///
    /// `attempt` is 1-based (1 = first attempt). Returns `RetryDecision::NoRetry`
    /// when we should stop retrying.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }

        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Http(_) => {
                RetryDecision::RetryAfter(self.delay)
            }
        }
    }
}
