//! Payment Application Service
//!
//! Orchestrates the payment workflow through the store and gateway ports.
//! Contains NO infrastructure logic - pure business orchestration.

use payment_types::{
    AccountGateway, AppError, CreatePaymentRequest, DomainError, NewPayment, Payment, PaymentId,
    PaymentStore, PaymentType,
};

/// Application service for payment operations.
///
/// Generic over `S: PaymentStore` and `G: AccountGateway` - the adapters
/// are injected at compile time. This enables:
/// - Swapping the store or the authority client without code changes
/// - Testing with in-memory doubles
/// - Compile-time checks for port implementation
pub struct PaymentService<S: PaymentStore, G: AccountGateway> {
    store: S,
    gateway: G,
}

impl<S: PaymentStore, G: AccountGateway> PaymentService<S, G> {
    /// Creates a new payment service with the given store and gateway.
    pub fn new(store: S, gateway: G) -> Self {
        Self { store, gateway }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the underlying account gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a payment.
    ///
    /// Validates both participant accounts against the account authority,
    /// persists a PENDING record, executes the balance mutation(s) matching
    /// the payment type, and persists the terminal status.
    ///
    /// A payment whose balance mutation was declined comes back as a normal
    /// result with status FAILED; only validation failures and unexpected
    /// processing errors are returned as errors. Validation failures leave
    /// the store untouched.
    pub async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment, AppError> {
        let new = NewPayment::pending(
            req.from_account_no,
            req.to_account_no,
            req.amount,
            req.description,
            req.payment_type,
        )?;

        // Both supplied sides are checked regardless of payment type, even
        // when only one of them is relevant for a DEBIT or CREDIT.
        if self.any_supplied_closed(&new).await {
            return Err(DomainError::AccountsClosed.into());
        }
        if !self.all_supplied_approved(&new).await {
            return Err(DomainError::AccountsNotApproved.into());
        }

        // First durable artifact: the PENDING record survives even if the
        // mutations below fail.
        let mut payment = self.store.create(new).await?;

        let success = match self.execute_mutations(&payment).await {
            Ok(success) => success,
            Err(err) => {
                tracing::error!(payment_id = %payment.id, error = %err, "mutation dispatch failed");
                payment.fail();
                self.store.update(&payment).await?;
                return Err(AppError::Processing(
                    "Failed to update account balances".into(),
                ));
            }
        };

        if success {
            payment.complete();
        } else {
            payment.fail();
        }
        self.store.update(&payment).await?;

        Ok(payment)
    }

    /// True when any supplied participant account reports CLOSED.
    /// An unreachable authority reports "not closed" here.
    async fn any_supplied_closed(&self, new: &NewPayment) -> bool {
        for account_no in [&new.from_account_no, &new.to_account_no]
            .into_iter()
            .flatten()
        {
            if self.gateway.is_closed(account_no).await {
                return true;
            }
        }
        false
    }

    /// True when every supplied participant account reports APPROVED.
    /// An unreachable authority reports "not approved", blocking creation.
    async fn all_supplied_approved(&self, new: &NewPayment) -> bool {
        for account_no in [&new.from_account_no, &new.to_account_no]
            .into_iter()
            .flatten()
        {
            if !self.gateway.is_approved(account_no).await {
                return false;
            }
        }
        true
    }

    /// Runs the balance mutation(s) for the payment type and returns the
    /// combined success flag.
    ///
    /// For TRANSFER both legs are always attempted, in order, with no
    /// short-circuit; a completed leg is not reversed when the other fails,
    /// the payment is simply marked FAILED.
    async fn execute_mutations(&self, payment: &Payment) -> Result<bool, DomainError> {
        match payment.payment_type {
            PaymentType::Debit => {
                let from = required_account(payment, payment.from_account_no.as_deref(), "from")?;
                Ok(self.gateway.adjust_balance(from, -payment.amount).await)
            }
            PaymentType::Credit => {
                let to = required_account(payment, payment.to_account_no.as_deref(), "to")?;
                Ok(self.gateway.adjust_balance(to, payment.amount).await)
            }
            PaymentType::Transfer => {
                let from = required_account(payment, payment.from_account_no.as_deref(), "from")?;
                let to = required_account(payment, payment.to_account_no.as_deref(), "to")?;
                let debit_ok = self.gateway.adjust_balance(from, -payment.amount).await;
                let credit_ok = self.gateway.adjust_balance(to, payment.amount).await;
                Ok(debit_ok && credit_ok)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Lookup
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a payment by id.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.store
            .get(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Payment {}", id))))
    }

    /// Lists payments where the account appears on either side.
    pub async fn payments_for_account(&self, account_no: &str) -> Result<Vec<Payment>, AppError> {
        self.store
            .list_for_account(account_no)
            .await
            .map_err(Into::into)
    }
}

fn required_account<'a>(
    payment: &Payment,
    account: Option<&'a str>,
    side: &'static str,
) -> Result<&'a str, DomainError> {
    account.ok_or(DomainError::MissingAccount {
        payment_type: payment.payment_type,
        side,
    })
}
