use actix_web::{http::StatusCode, HttpResponse};
use std::fmt;

/// Service-level error taxonomy. `Display` carries the internal detail and
/// is meant for server-side logs; clients only ever see `client_message()`.
#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    Unauthorized(String),
    InvalidCredentials,
    DuplicateUser,
    Database(String),
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ServiceError::InvalidCredentials => write!(f, "Invalid credentials"),
            ServiceError::DuplicateUser => write!(f, "User already exists"),
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) | ServiceError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::DuplicateUser => StatusCode::CONFLICT,
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Generic client-facing text. Internal detail stays in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "Book not found",
            ServiceError::Unauthorized(_) => "Invalid or missing token",
            ServiceError::InvalidCredentials => "Invalid credentials",
            ServiceError::DuplicateUser => "User already exists",
            ServiceError::Database(_) | ServiceError::Internal(_) => "Internal server error",
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(serde_json::json!({
            "success": false,
            "error": self.client_message(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ServiceError::NotFound("book 123".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Unauthorized("missing header".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ServiceError::DuplicateUser.status(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::Database("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_message_never_leaks_detail() {
        let err = ServiceError::Database("connection refused to mongodb://10.0.0.7".into());
        assert_eq!(err.client_message(), "Internal server error");

        // the detail is still available for the server-side log line
        assert!(err.to_string().contains("connection refused"));

        let err = ServiceError::Unauthorized("invalid token: ExpiredSignature".into());
        assert_eq!(err.client_message(), "Invalid or missing token");
        assert!(!err.client_message().contains("ExpiredSignature"));
    }
}
