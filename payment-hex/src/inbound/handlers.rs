//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use payment_types::{AccountGateway, AppError, CreatePaymentRequest, PaymentId, PaymentStore};

use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<S: PaymentStore, G: AccountGateway> {
    pub service: PaymentService<S, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Processing(detail) => {
                // The caller gets a generic indicator; the detail stays in
                // the logs.
                tracing::error!(error = %detail, "payment processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process payment".to_string(),
                )
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Create a payment.
#[tracing::instrument(skip(state), fields(payment_type = %req.payment_type, amount = %req.amount))]
pub async fn create_payment<S: PaymentStore, G: AccountGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.create_payment(req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Get a payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<S: PaymentStore, G: AccountGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid payment ID".into()))?;

    let payment = state.service.get_payment(payment_id).await?;
    Ok(Json(payment))
}

/// List payments for an account.
#[tracing::instrument(skip(state), fields(account_no = %account_no))]
pub async fn list_payments_for_account<S: PaymentStore, G: AccountGateway>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(account_no): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.service.payments_for_account(&account_no).await?;
    Ok(Json(payments))
}
