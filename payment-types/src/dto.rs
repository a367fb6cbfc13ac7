//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::PaymentType;

/// Request to create a new payment.
///
/// Which account fields are required depends on `type`: DEBIT moves funds
/// out of `from_account_no`, CREDIT moves funds into `to_account_no`,
/// TRANSFER needs both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_account_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_no: Option<String>,
    /// Positive magnitude; direction is implied by `type`
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
}
