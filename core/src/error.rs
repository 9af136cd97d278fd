//! Error types for the spy cats client.
//!
//! # Design
//! `ApiError` distinguishes the three ways a call can fail from the user's
//! point of view: the backend was never reached, it answered with a detail
//! body we can explain, or it answered with something we cannot parse.
//! `Display` is the exact message shown to the user.

use thiserror::Error;

use crate::types::{ErrorBody, ErrorDetail};

/// Maximum number of valid breeds appended to a breed validation message.
pub const MAX_LISTED_BREEDS: usize = 10;

const GENERIC_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Cannot connect to backend API at {base_url}. Make sure the backend is running.")]
    Unreachable { base_url: String },

    /// Non-2xx response whose body carried a JSON error envelope.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// Non-2xx response whose body was not JSON.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Build the error for a non-2xx response.
    pub fn from_response(status: u16, reason: &str, body: &str) -> Self {
        // Any JSON body counts as an answer; only unparseable text falls back to the status line.
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => {
                let detail = serde_json::from_value::<ErrorBody>(value).ok().and_then(|parsed| parsed.detail);
                ApiError::Backend {
                    status,
                    message: detail_message(detail),
                }
            }
            Err(_) => ApiError::Http {
                status,
                reason: reason.to_string(),
            },
        }
    }
}

fn detail_message(detail: Option<ErrorDetail>) -> String {
    match detail {
        Some(ErrorDetail::Message(message)) => message,
        Some(ErrorDetail::Structured {
            error: Some(error),
            valid_breeds,
        }) if !error.is_empty() => match valid_breeds {
            Some(breeds) => {
                let listed: Vec<&str> = breeds.iter().take(MAX_LISTED_BREEDS).map(String::as_str).collect();
                format!("{error}\nValid breeds: {}", listed.join(", "))
            }
            None => error,
        },
        _ => GENERIC_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_the_message() {
        let err = ApiError::from_response(404, "Not Found", r#"{"detail":"Spy cat not found"}"#);
        assert_eq!(err.to_string(), "Spy cat not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn structured_detail_lists_at_most_ten_breeds() {
        let breeds: Vec<String> = (1..=15).map(|i| format!("Breed{i}")).collect();
        let body = serde_json::json!({
            "detail": { "error": "Invalid breed 'Tiger'", "valid_breeds": breeds }
        });
        let err = ApiError::from_response(400, "Bad Request", &body.to_string());
        assert_eq!(
            err.to_string(),
            "Invalid breed 'Tiger'\nValid breeds: Breed1, Breed2, Breed3, Breed4, Breed5, \
             Breed6, Breed7, Breed8, Breed9, Breed10"
        );
        assert!(!err.to_string().contains("Breed11"));
    }

    #[test]
    fn structured_detail_without_breeds() {
        let err = ApiError::from_response(400, "Bad Request", r#"{"detail":{"error":"Nope"}}"#);
        assert_eq!(err.to_string(), "Nope");
    }

    #[test]
    fn unusable_detail_is_generic() {
        let err = ApiError::from_response(422, "Unprocessable Entity", r#"{"detail":[{"msg":"x"}]}"#);
        assert_eq!(err.to_string(), "An error occurred");

        let err = ApiError::from_response(400, "Bad Request", r#"{"detail":{"valid_breeds":["A"]}}"#);
        assert_eq!(err.to_string(), "An error occurred");
    }

    #[test]
    fn json_without_an_object_is_generic() {
        for body in [r#""oops""#, "[1,2]", "null", "42"] {
            let err = ApiError::from_response(400, "Bad Request", body);
            assert_eq!(err.to_string(), "An error occurred", "body {body}");
            assert_eq!(err.status(), Some(400));
        }
    }

    #[test]
    fn non_json_body_reports_status_and_reason() {
        let err = ApiError::from_response(500, "Internal Server Error", "boom");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn unreachable_names_the_backend() {
        let err = ApiError::Unreachable {
            base_url: "http://localhost:8000".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot connect to backend API at http://localhost:8000. Make sure the backend is running."
        );
        assert_eq!(err.status(), None);
    }
}
