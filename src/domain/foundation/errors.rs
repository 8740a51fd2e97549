//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    PeerNotFound,
    TeamNotFound,
    InvitationNotFound,
    FeedbackNotFound,

    // Business rule violations (expired invitation, duplicate acceptance,
    // disallowed invitee domain, missing team context)
    BusinessRule,

    // Authorization errors
    Unauthorized,

    // Collaborator failures
    ClassificationError,
    MailError,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::PeerNotFound => "PEER_NOT_FOUND",
            ErrorCode::TeamNotFound => "TEAM_NOT_FOUND",
            ErrorCode::InvitationNotFound => "INVITATION_NOT_FOUND",
            ErrorCode::FeedbackNotFound => "FEEDBACK_NOT_FOUND",
            ErrorCode::BusinessRule => "BUSINESS_RULE",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ClassificationError => "CLASSIFICATION_ERROR",
            ErrorCode::MailError => "MAIL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl ErrorCode {
    /// True for the not-found family of codes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::PeerNotFound
                | ErrorCode::TeamNotFound
                | ErrorCode::InvitationNotFound
                | ErrorCode::FeedbackNotFound
        )
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a business rule violation error.
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BusinessRule, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("teamName");
        assert_eq!(format!("{}", err), "Field 'teamName' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("email", "missing @ symbol");
        assert_eq!(
            format!("{}", err),
            "Field 'email' has invalid format: missing @ symbol"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::PeerNotFound, "Peer was not found");
        assert_eq!(format!("{}", err), "[PEER_NOT_FOUND] Peer was not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "email")
            .with_detail("reason", "invalid format");

        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"invalid format".to_string()));
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::invalid_format("slug", "not alphabetic").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"slug".to_string()));
    }

    #[test]
    fn not_found_codes_are_grouped() {
        assert!(ErrorCode::PeerNotFound.is_not_found());
        assert!(ErrorCode::InvitationNotFound.is_not_found());
        assert!(!ErrorCode::BusinessRule.is_not_found());
    }
}
