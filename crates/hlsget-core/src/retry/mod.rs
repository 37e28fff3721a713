//! Retry policy for segment fetches.
//!
//! This module encapsulates error classification (timeouts, connection
//! failures, HTTP status) and the bounded-retry decision so that the
//! coordinator and fetcher share a consistent policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::SegmentError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
