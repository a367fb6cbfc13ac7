//! Account authority gateway port.
//!
//! The account authority owns account status and balances; this core only
//! queries and mutates it through this trait. Every remote failure degrades
//! to a boolean at this boundary: an unreachable authority blocks new
//! payments (validation answers "not approved") and marks in-flight
//! mutations unsuccessful, it never surfaces as a distinct error.

use rust_decimal::Decimal;

/// Client-side view of the external account authority.
#[async_trait::async_trait]
pub trait AccountGateway: Send + Sync + 'static {
    /// True only when the status lookup succeeds with an HTTP-success code
    /// and the returned token equals `APPROVED` (case-insensitive).
    /// Transport failure counts as not approved.
    async fn is_approved(&self, account_no: &str) -> bool;

    /// True only when the status lookup succeeds and the token equals
    /// `CLOSED` (case-insensitive). Transport failure counts as not closed.
    async fn is_closed(&self, account_no: &str) -> bool;

    /// Applies a signed balance delta at the authority. True only when the
    /// call returns HTTP-success and a `SUCCESS` body token.
    async fn adjust_balance(&self, account_no: &str, amount_change: Decimal) -> bool;
}
