//! # Account Authority Client
//!
//! HTTP adapter implementing the [`AccountGateway`] port against the
//! external account authority.
//!
//! Every remote call is modeled internally as a [`CallOutcome`] (success /
//! rejected / unavailable) and folded to the port's boolean contract in one
//! place, so the fail-closed choice for validation and the fail-soft choice
//! for mutation stay visible in code instead of hiding in error handling.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;

use payment_types::AccountGateway;

/// Error type for client construction.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Connection settings for the account authority, injected at construction.
#[derive(Debug, Clone)]
pub struct AccountClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl AccountClientConfig {
    /// Creates a config, normalizing a trailing slash on the base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

/// Outcome of a single remote call against the account authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    /// HTTP-success response with a readable body.
    Ok(T),
    /// The authority answered with a non-success status code.
    Rejected(u16),
    /// Transport failure: connect error, timeout, or unreadable body.
    Unavailable,
}

/// Body for the authority's balance mutation endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdjustBalanceRequest {
    amount_change: Decimal,
}

/// reqwest-backed [`AccountGateway`] implementation.
pub struct HttpAccountGateway {
    config: AccountClientConfig,
    http: Client,
}

impl HttpAccountGateway {
    /// Creates a gateway client with the configured request timeout.
    pub fn new(config: AccountClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Performs the status lookup for an account.
    ///
    /// `GET {base}/api/accounts/{account_no}/status`
    pub async fn query_status(&self, account_no: &str) -> CallOutcome<String> {
        let url = format!("{}/api/accounts/{}/status", self.config.base_url, account_no);
        let resp = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(account_no, error = %err, "account status lookup unavailable");
                return CallOutcome::Unavailable;
            }
        };
        read_token(resp, account_no).await
    }

    /// Issues a signed balance delta against an account.
    ///
    /// `POST {base}/api/accounts/{account_no}/balance`
    pub async fn post_adjustment(
        &self,
        account_no: &str,
        amount_change: Decimal,
    ) -> CallOutcome<String> {
        let url = format!(
            "{}/api/accounts/{}/balance",
            self.config.base_url, account_no
        );
        let resp = match self
            .http
            .post(&url)
            .json(&AdjustBalanceRequest { amount_change })
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(account_no, error = %err, "balance adjustment unavailable");
                return CallOutcome::Unavailable;
            }
        };
        read_token(resp, account_no).await
    }
}

async fn read_token(resp: reqwest::Response, account_no: &str) -> CallOutcome<String> {
    let status = resp.status();
    if !status.is_success() {
        return CallOutcome::Rejected(status.as_u16());
    }
    match resp.text().await {
        Ok(body) => CallOutcome::Ok(body),
        Err(err) => {
            tracing::warn!(account_no, error = %err, "unreadable account authority response");
            CallOutcome::Unavailable
        }
    }
}

/// True when the outcome carries `token`, tolerating surrounding whitespace
/// and JSON string quotes; matching is ASCII-case-insensitive.
fn outcome_has_token(outcome: &CallOutcome<String>, token: &str) -> bool {
    matches!(outcome, CallOutcome::Ok(body) if token_matches(body, token))
}

fn token_matches(body: &str, token: &str) -> bool {
    body.trim().trim_matches('"').eq_ignore_ascii_case(token)
}

#[async_trait]
impl AccountGateway for HttpAccountGateway {
    async fn is_approved(&self, account_no: &str) -> bool {
        let outcome = self.query_status(account_no).await;
        outcome_has_token(&outcome, "APPROVED")
    }

    async fn is_closed(&self, account_no: &str) -> bool {
        let outcome = self.query_status(account_no).await;
        outcome_has_token(&outcome, "CLOSED")
    }

    async fn adjust_balance(&self, account_no: &str, amount_change: Decimal) -> bool {
        let outcome = self.post_adjustment(account_no, amount_change).await;
        outcome_has_token(&outcome, "SUCCESS")
    }
}
