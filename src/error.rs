//! Error types shared by the synchronizer, cleanup routine, and tracker.
//!
//! There is deliberately no retry or backoff story here: every error aborts
//! the current run, bubbles up to the CLI entry point, and is logged once.

use thiserror::Error;

/// Errors surfaced by GitHub API orchestration.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Missing or malformed configuration, detected before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure: a non-2xx response, a connection problem, or
    /// a client that could not be constructed.
    #[error("GitHub API error: {0}")]
    Api(String),

    /// A GraphQL response that carried an `errors` array despite the HTTP
    /// call succeeding. The raw error payload is attached.
    #[error("GraphQL returned errors: {0}")]
    GraphQl(serde_json::Value),

    /// An entity (project, repository, or issue) that the API reported as
    /// absent rather than erroring on.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TrackerError::Config("GITHUB_TOKEN not set".to_string()).to_string(),
            "configuration error: GITHUB_TOKEN not set"
        );
        assert_eq!(
            TrackerError::NotFound("issue #42".to_string()).to_string(),
            "not found: issue #42"
        );
        assert_eq!(
            TrackerError::Api("503 Service Unavailable".to_string()).to_string(),
            "GitHub API error: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_graphql_error_attaches_payload() {
        let payload = serde_json::json!([{"message": "Field 'projecV2' doesn't exist"}]);
        let err = TrackerError::GraphQl(payload.clone());
        assert!(err.to_string().contains("doesn't exist"));
        match err {
            TrackerError::GraphQl(value) => assert_eq!(value, payload),
            _ => panic!("expected GraphQl variant"),
        }
    }
}
