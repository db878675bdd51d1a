// Error type for the admin API client
//
// Three failure classes matter to the UI: the request never completed
// (transport), the server answered with a non-2xx status, or the body of a
// 2xx answer did not match the expected shape. Status carries the raw body
// so operators can see what the backend actually said.

use crate::util::truncate_utf8_safe;
use thiserror::Error;

/// Maximum bytes of a response body kept in a Status error
const BODY_SNIPPET_LEN: usize = 300;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or no response arrived
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A success response carried a body we could not decode
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a Status error, keeping only a short snippet of the body
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            body: truncate_utf8_safe(body.trim(), BODY_SNIPPET_LEN).to_string(),
        }
    }

    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    /// True when the backend rejected our credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_truncates_body() {
        let body = "x".repeat(1000);
        let err = ApiError::from_status(500, &body);
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.len() <= 300);
            }
            _ => panic!("expected Status"),
        }
    }

    #[test]
    fn test_auth_failure_detection() {
        assert!(ApiError::from_status(401, "unauthorized").is_auth_failure());
        assert!(ApiError::from_status(403, "forbidden").is_auth_failure());
        assert!(!ApiError::from_status(500, "boom").is_auth_failure());
    }

    #[test]
    fn test_decode_has_no_status() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert_eq!(ApiError::Decode(json_err).status(), None);
    }
}
