//! Error types for the HMS client.
//!
//! Every transport or backend failure surfaces as a single [`ApiError`] shape. Callers branch
//! on the classification predicates instead of raw status codes.

use crate::container::ServiceToken;
use std::collections::BTreeMap;

/// Per-field validation messages, as returned by the backend on `422`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Classification of an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No HTTP response was received.
    Network,
    Auth,
    Forbidden,
    NotFound,
    Validation,
    Other,
}

/// A failed backend call.
///
/// `status` is the HTTP status, or [`ApiError::NETWORK_STATUS`] when the request never
/// produced a response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    pub const NETWORK_STATUS: u16 = 0;

    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(Self::NETWORK_STATUS, message)
    }

    /// A request rejected locally before it reached the backend.
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.clone()]);
        Self {
            status: 422,
            message,
            errors: Some(errors),
        }
    }

    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Replaces the message, keeping status and field errors.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            Self::NETWORK_STATUS => ApiErrorKind::Network,
            401 => ApiErrorKind::Auth,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            422 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Other,
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.kind() == ApiErrorKind::Network
    }

    pub fn is_auth_error(&self) -> bool {
        self.kind() == ApiErrorKind::Auth
    }

    pub fn is_forbidden_error(&self) -> bool {
        self.kind() == ApiErrorKind::Forbidden
    }

    pub fn is_not_found_error(&self) -> bool {
        self.kind() == ApiErrorKind::NotFound
    }

    pub fn is_validation_error(&self) -> bool {
        self.kind() == ApiErrorKind::Validation
    }

    /// First message recorded against `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .as_ref()?
            .get(field)?
            .first()
            .map(String::as_str)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL {value}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("invalid timeout {0}: expected a whole number of seconds greater than zero")]
    InvalidTimeout(String),
    #[error("invalid boolean flag {0}")]
    InvalidFlag(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("failed to read token file: {0}")]
    TokenFileRead(std::io::Error),
    #[error("failed to parse token file: {0}")]
    TokenFileParse(serde_json::Error),
}

/// Composition-root failures. These are startup bugs, never runtime conditions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WiringError {
    #[error("no factory registered for {0}")]
    Unregistered(ServiceToken),
    #[error("{0} is registered with a different type than requested")]
    TypeMismatch(ServiceToken),
    #[error("dependency cycle: {}", format_cycle(.0))]
    Cycle(Vec<ServiceToken>),
    #[error("failed to construct {token}: {message}")]
    Construction { token: ServiceToken, message: String },
}

fn format_cycle(path: &[ServiceToken]) -> String {
    path.iter()
        .map(|token| token.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_status() {
        assert!(ApiError::new(401, "x").is_auth_error());
        assert!(ApiError::new(403, "x").is_forbidden_error());
        assert!(ApiError::new(404, "x").is_not_found_error());
        assert!(ApiError::new(422, "x").is_validation_error());
        assert!(ApiError::network("refused").is_network_error());
        assert_eq!(ApiError::new(500, "x").kind(), ApiErrorKind::Other);
    }

    #[test]
    fn with_message_keeps_status_and_fields() {
        let err = ApiError::invalid_input("email", "The email has already been taken.")
            .with_message("Could not create user");
        assert_eq!(err.status, 422);
        assert_eq!(err.message, "Could not create user");
        assert_eq!(
            err.field_error("email"),
            Some("The email has already been taken.")
        );
        assert_eq!(err.field_error("name"), None);
    }
}
