use thiserror::Error;

/// User-facing message for any failed generation attempt.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate plan. Please try again.";

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("AI returned empty response")]
    EmptyResponse,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The single error callers see when generation fails. The cause is kept
    /// as the error source for logs and debugging.
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed(#[source] Box<PlannerError>),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Wrap a transport, empty-response or malformed-payload failure.
    pub fn generation_failed(cause: PlannerError) -> Self {
        match cause {
            already @ PlannerError::GenerationFailed(_) => already,
            other => PlannerError::GenerationFailed(Box::new(other)),
        }
    }

    /// Errors that a diagnostic build may replace with the fallback plan.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            PlannerError::Transport(_)
                | PlannerError::EmptyResponse
                | PlannerError::MalformedPayload(_)
                | PlannerError::GenerationFailed(_)
        )
    }

    /// The underlying cause of a collapsed generation failure.
    pub fn cause(&self) -> &PlannerError {
        match self {
            PlannerError::GenerationFailed(inner) => inner.cause(),
            other => other,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::Transport(_) => "TRANSPORT_ERROR",
            PlannerError::EmptyResponse => "EMPTY_RESPONSE",
            PlannerError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Storage(_) => "STORAGE_ERROR",
            PlannerError::GenerationFailed(_) => "GENERATION_FAILED",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn generation_failed_hides_cause_in_message() {
        let err = PlannerError::generation_failed(PlannerError::Transport(
            "HTTP 503 error: overloaded".to_string(),
        ));

        assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);
        assert_eq!(err.error_code(), "GENERATION_FAILED");
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("overloaded"));
        assert!(matches!(err.cause(), PlannerError::Transport(_)));
    }

    #[test]
    fn generation_failed_does_not_nest() {
        let once = PlannerError::generation_failed(PlannerError::EmptyResponse);
        let twice = PlannerError::generation_failed(once);
        assert!(matches!(twice.cause(), PlannerError::EmptyResponse));
        match twice {
            PlannerError::GenerationFailed(inner) => {
                assert!(matches!(*inner, PlannerError::EmptyResponse))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn config_errors_are_not_generation_failures() {
        assert!(!PlannerError::Config("missing".into()).is_generation_failure());
        assert!(PlannerError::MalformedPayload("x".into()).is_generation_failure());

        let payload = PlannerError::Config("API Key is missing.".into()).to_error_payload();
        assert_eq!(payload["error"]["code"], "CONFIG_ERROR");
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap_or_default()
            .contains("API Key is missing."));
    }
}
