//! Classify curl errors and HTTP status into retry policy error kinds.

use super::error::SegmentError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    ErrorKind::Http(code as u16)
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    // A malformed or unsupported URL never recovers by retrying.
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return ErrorKind::Other;
    }
    ErrorKind::Connection
}

/// Classify a segment error into an ErrorKind.
pub fn classify(e: &SegmentError) -> ErrorKind {
    match e {
        SegmentError::Curl(ce) => classify_curl_error(ce),
        SegmentError::Http(code) => classify_http_status(*code),
        SegmentError::Storage(_) => ErrorKind::Other,
    }
}
