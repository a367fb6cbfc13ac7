//! Payment record store port.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite) will implement this trait.

use crate::domain::{NewPayment, Payment, PaymentId};
use crate::error::StoreError;

/// Durable keyed storage of payment records.
///
/// Each create/update is atomic for the single record it touches; there is
/// no transaction spanning the store and the remote account authority.
#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync + 'static {
    /// Persists a new payment and assigns its id.
    async fn create(&self, new: NewPayment) -> Result<Payment, StoreError>;

    /// Gets a payment by id. `Ok(None)` for an unknown id, never an error.
    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, StoreError>;

    /// Lists payments where `account_no` appears as either the from or the
    /// to account, in storage (creation) order.
    async fn list_for_account(&self, account_no: &str) -> Result<Vec<Payment>, StoreError>;

    /// Overwrites the stored record's status at the same id.
    /// Used at each lifecycle transition.
    async fn update(&self, payment: &Payment) -> Result<(), StoreError>;
}
