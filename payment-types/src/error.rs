//! Error types for the payment service.

use crate::domain::PaymentType;

/// Domain-level errors (business logic violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("One or both accounts are closed")]
    AccountsClosed,

    #[error("One or both accounts are not approved")]
    AccountsNotApproved,

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("{payment_type} payment has no {side} account")]
    MissingAccount {
        payment_type: PaymentType,
        side: &'static str,
    },
}

/// Record-store errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Payment not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected failure while executing balance mutations. The caller
    /// receives a generic error indicator, never the payment body.
    #[error("Payment processing failed: {0}")]
    Processing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => e.into(),
            StoreError::NotFound => AppError::NotFound("Payment not found".into()),
            StoreError::Database(e) => AppError::Internal(e),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingAccount { .. } => AppError::Processing(err.to_string()),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}
