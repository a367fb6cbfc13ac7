//! Payment domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Payment.
///
/// Assigned by the record store on creation; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The direction of funds movement a payment performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// A single account is debited
    Debit,
    /// A single account is credited
    Credit,
    /// One account debited, another credited
    Transfer,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::Debit => write!(f, "DEBIT"),
            PaymentType::Credit => write!(f, "CREDIT"),
            PaymentType::Transfer => write!(f, "TRANSFER"),
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBIT" => Ok(PaymentType::Debit),
            "CREDIT" => Ok(PaymentType::Credit),
            "TRANSFER" => Ok(PaymentType::Transfer),
            _ => Err(format!("Unknown payment type: {}", s)),
        }
    }
}

/// Lifecycle status of a payment.
///
/// `Complete` and `Failed` are terminal: once reached, the workflow makes
/// no further transition on that record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Complete,
    Failed,
}

impl PaymentStatus {
    /// Returns true for `Complete` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Complete | PaymentStatus::Failed)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Complete => write!(f, "COMPLETE"),
            PaymentStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "COMPLETE" => Ok(PaymentStatus::Complete),
            "FAILED" => Ok(PaymentStatus::Failed),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

/// A payment as built by the orchestrator, before the store has assigned
/// an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    /// Account the funds leave (required for DEBIT and TRANSFER)
    pub from_account_no: Option<String>,
    /// Account the funds enter (required for CREDIT and TRANSFER)
    pub to_account_no: Option<String>,
    /// Positive magnitude; direction is implied by `payment_type`
    pub amount: Decimal,
    /// Free-text description
    pub description: Option<String>,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    /// When the payment intent was accepted
    pub created_at: DateTime<Utc>,
}

impl NewPayment {
    /// Builds a PENDING payment from an accepted intent.
    ///
    /// # Validation
    /// - Amount must be positive; the caller supplies the magnitude and the
    ///   payment type carries the direction.
    pub fn pending(
        from_account_no: Option<String>,
        to_account_no: Option<String>,
        amount: Decimal,
        description: Option<String>,
        payment_type: PaymentType,
    ) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount);
        }

        Ok(Self {
            from_account_no,
            to_account_no,
            amount,
            description,
            payment_type,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

/// A persisted payment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier, assigned by the store
    pub id: PaymentId,
    pub from_account_no: Option<String>,
    pub to_account_no: Option<String>,
    /// Positive magnitude; direction is implied by `payment_type`
    pub amount: Decimal,
    pub description: Option<String>,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Reconstructs a payment from database fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PaymentId,
        from_account_no: Option<String>,
        to_account_no: Option<String>,
        amount: Decimal,
        description: Option<String>,
        payment_type: PaymentType,
        status: PaymentStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            from_account_no,
            to_account_no,
            amount,
            description,
            payment_type,
            status,
            created_at,
        }
    }

    /// Marks the payment COMPLETE. The workflow calls this at most once,
    /// after every required balance mutation succeeded.
    pub fn complete(&mut self) {
        self.status = PaymentStatus::Complete;
    }

    /// Marks the payment FAILED. The workflow calls this at most once.
    pub fn fail(&mut self) {
        self.status = PaymentStatus::Failed;
    }

    /// Returns true when `account_no` appears on either side.
    pub fn involves_account(&self, account_no: &str) -> bool {
        self.from_account_no.as_deref() == Some(account_no)
            || self.to_account_no.as_deref() == Some(account_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn amount(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_payment_is_pending() {
        let new = NewPayment::pending(
            Some("A1".into()),
            Some("A2".into()),
            amount("100.00"),
            None,
            PaymentType::Transfer,
        )
        .unwrap();

        assert_eq!(new.status, PaymentStatus::Pending);
        assert_eq!(new.amount, amount("100.00"));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let result = NewPayment::pending(
            Some("A1".into()),
            None,
            Decimal::ZERO,
            None,
            PaymentType::Debit,
        );
        assert!(matches!(result, Err(DomainError::NonPositiveAmount)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = NewPayment::pending(
            Some("A1".into()),
            None,
            amount("-5.00"),
            None,
            PaymentType::Debit,
        );
        assert!(matches!(result, Err(DomainError::NonPositiveAmount)));
    }

    #[test]
    fn test_status_terminality() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(PaymentStatus::Complete.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
    }

    #[test]
    fn test_complete_and_fail_transitions() {
        let mut payment = Payment::from_parts(
            PaymentId::new(),
            Some("A1".into()),
            None,
            amount("10.00"),
            None,
            PaymentType::Debit,
            PaymentStatus::Pending,
            Utc::now(),
        );

        payment.complete();
        assert_eq!(payment.status, PaymentStatus::Complete);

        payment.status = PaymentStatus::Pending;
        payment.fail();
        assert_eq!(payment.status, PaymentStatus::Failed);
    }

    #[test]
    fn test_involves_account() {
        let payment = Payment::from_parts(
            PaymentId::new(),
            Some("A1".into()),
            Some("A2".into()),
            amount("10.00"),
            None,
            PaymentType::Transfer,
            PaymentStatus::Pending,
            Utc::now(),
        );

        assert!(payment.involves_account("A1"));
        assert!(payment.involves_account("A2"));
        assert!(!payment.involves_account("A3"));
    }

    #[test]
    fn test_payment_type_parse() {
        assert_eq!("DEBIT".parse::<PaymentType>().unwrap(), PaymentType::Debit);
        assert_eq!(
            "transfer".parse::<PaymentType>().unwrap(),
            PaymentType::Transfer
        );
        assert!("CHEQUE".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_status_display_roundtrip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Complete,
            PaymentStatus::Failed,
        ] {
            assert_eq!(status.to_string().parse::<PaymentStatus>().unwrap(), status);
        }
    }
}
