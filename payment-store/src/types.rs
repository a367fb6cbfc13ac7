//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use payment_types::{Payment, PaymentId, StoreError};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};
#[cfg(not(feature = "sqlite"))]
use rust_decimal::Decimal;
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub from_account_no: Option<String>,
    pub to_account_no: Option<String>,

    #[cfg(not(feature = "sqlite"))]
    pub amount: Decimal,
    #[cfg(feature = "sqlite")]
    pub amount: String,

    pub description: Option<String>,
    pub payment_type: String,
    pub status: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

impl DbPayment {
    pub fn into_domain(self) -> Result<Payment, StoreError> {
        let payment_type = self
            .payment_type
            .parse()
            .map_err(StoreError::Database)?;
        let status = self.status.parse().map_err(StoreError::Database)?;

        #[cfg(not(feature = "sqlite"))]
        let (id, amount, created_at) = (PaymentId::from_uuid(self.id), self.amount, self.created_at);

        #[cfg(feature = "sqlite")]
        let (id, amount, created_at) = (
            self.id
                .parse::<PaymentId>()
                .map_err(|e| StoreError::Database(format!("invalid payment id: {}", e)))?,
            self.amount
                .parse::<rust_decimal::Decimal>()
                .map_err(|e| StoreError::Database(format!("invalid amount: {}", e)))?,
            chrono::DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(|e| StoreError::Database(format!("invalid created_at: {}", e)))?
                .with_timezone(&chrono::Utc),
        );

        Ok(Payment::from_parts(
            id,
            self.from_account_no,
            self.to_account_no,
            amount,
            self.description,
            payment_type,
            status,
            created_at,
        ))
    }
}
