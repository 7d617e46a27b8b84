//! Centralized error handling.
//!
//! Provides the unified error taxonomy for the whole crate. Every failure
//! path returns a typed variant; nothing is swallowed or reported as an
//! ambiguous `None`.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Duplicate(String),

    // Input validation (caller's fault, never retried)
    #[error("{0}")]
    Validation(String),

    // Domain precondition not met (e.g. birth eligibility)
    #[error("{0}")]
    BusinessRule(String),

    // The underlying store is unreachable or rejected the transaction
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code, useful for logs and UI-side mapping
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Duplicate(_) => "DUPLICATE_KEY",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            AppError::Database(_) => "PERSISTENCE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Field-level validation failures collapse into a single message
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn duplicate(entity: impl Into<String>) -> Self {
        AppError::Duplicate(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        AppError::BusinessRule(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
