use serde::Deserialize;
use thiserror::Error;

/// Failures talking to the backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// 401 from any endpoint. The session must be dropped.
    #[error("Not authenticated")]
    Unauthorized,

    /// 400, e.g. a duplicate email on signup
    #[error("Rejected: {0}")]
    Validation(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Error body shape used by the backend (`{"detail": "..."}`)
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    /// Map a non-success HTTP status and its body to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            400 => ApiError::Validation(message),
            401 => ApiError::Unauthorized,
            _ => ApiError::Server { status, message },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_extracts_detail() {
        let err = ApiError::from_status(400, r#"{"detail":"Email already registered"}"#);
        assert_eq!(err, ApiError::Validation("Email already registered".to_string()));
    }

    #[test]
    fn test_from_status_falls_back_to_raw_body() {
        let err = ApiError::from_status(502, " Bad Gateway \n");
        assert_eq!(
            err,
            ApiError::Server { status: 502, message: "Bad Gateway".to_string() }
        );
    }

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::from_status(401, "");
        assert!(err.is_unauthorized());
        assert!(!ApiError::Network("offline".to_string()).is_unauthorized());
    }
}
