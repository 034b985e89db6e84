//! Normalized request outcomes - every gateway call resolves to exactly one of these

use serde_json::{json, Value};

use crate::constants::NO_CONTENT_MESSAGE;

/// Result of one gateway invocation.
///
/// Failures are values, not errors: the gateway absorbs every fault and
/// callers branch on the variant (or on `success: false` in the payload
/// shape) instead of catching anything.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Decoded JSON response body
    Success(Value),
    /// Empty successful response (204 or a bodiless 2xx)
    NoContent,
    /// Any failure, resolved to a human-readable message
    Failure { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failure { .. })
    }

    /// Failure message, if this outcome is a failure
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Outcome::Failure { message } => Some(message),
            _ => None,
        }
    }

    /// Payload shape handed to callers and signal sinks:
    /// - success: the decoded body as-is
    /// - no content: `{"status": 204, "message": "Success"}`
    /// - failure: `{"success": false, "message": ...}`
    pub fn to_payload(&self) -> Value {
        match self {
            Outcome::Success(value) => value.clone(),
            Outcome::NoContent => json!({"status": 204, "message": NO_CONTENT_MESSAGE}),
            Outcome::Failure { message } => json!({"success": false, "message": message}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_content_marker_shape() {
        let payload = Outcome::NoContent.to_payload();
        assert_eq!(payload["status"], 204);
        assert_eq!(payload["message"], "Success");
    }

    #[test]
    fn test_failure_record_shape() {
        let outcome = Outcome::Failure {
            message: "nope".into(),
        };
        let payload = outcome.to_payload();
        assert_eq!(payload["success"], false);
        assert_eq!(payload["message"], "nope");
        assert!(!outcome.is_success());
        assert_eq!(outcome.failure_message(), Some("nope"));
    }

    #[test]
    fn test_success_payload_passthrough() {
        let body = serde_json::json!({"id": 7, "name": "Engineering"});
        let outcome = Outcome::Success(body.clone());
        assert_eq!(outcome.to_payload(), body);
        assert!(outcome.is_success());
    }
}
