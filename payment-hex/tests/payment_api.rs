//! Integration tests for the payment HTTP API.
//!
//! These tests drive the full axum stack with the SQLite store and a
//! scriptable account-authority double.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use tower::ServiceExt;

use payment_hex::{PaymentService, inbound::HttpServer};
use payment_store::SqliteStore;
use payment_types::AccountGateway;

/// Account-authority double with fixed answers.
struct StubGateway {
    closed: bool,
    approved: bool,
    accept_adjustments: bool,
}

impl StubGateway {
    fn permissive() -> Self {
        Self {
            closed: false,
            approved: true,
            accept_adjustments: true,
        }
    }
}

#[async_trait]
impl AccountGateway for StubGateway {
    async fn is_approved(&self, _account_no: &str) -> bool {
        self.approved
    }

    async fn is_closed(&self, _account_no: &str) -> bool {
        self.closed
    }

    async fn adjust_balance(&self, _account_no: &str, _amount_change: Decimal) -> bool {
        self.accept_adjustments
    }
}

/// Helper to create a test server against an in-memory SQLite store.
async fn create_test_server(gateway: StubGateway) -> HttpServer<SqliteStore, StubGateway> {
    let store = SqliteStore::new("sqlite::memory:").await.unwrap();
    let service = PaymentService::new(store, gateway);
    HttpServer::new(service)
}

fn create_payment_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/payments")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let server = create_test_server(StubGateway::permissive()).await;

    let response = server.router().oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_create_transfer_and_look_it_up() {
    let server = create_test_server(StubGateway::permissive()).await;
    let app = server.router();

    let response = app
        .clone()
        .oneshot(create_payment_request(
            r#"{"from_account_no": "A1", "to_account_no": "A2", "amount": "100.00", "description": "rent", "type": "TRANSFER"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["status"], "COMPLETE");
    assert_eq!(created["from_account_no"], "A1");
    assert_eq!(created["to_account_no"], "A2");
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    // Point lookup by id
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/payments/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched["id"], id.as_str());

    // Listed for both participants
    for account in ["A1", "A2"] {
        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/accounts/{}/payments", account)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let list = json_body(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    // Not listed for a stranger, but still a 200
    let response = app
        .oneshot(get_request("/api/accounts/A9/payments"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_account_yields_bad_request() {
    let server = create_test_server(StubGateway {
        closed: true,
        ..StubGateway::permissive()
    })
    .await;

    let response = server
        .router()
        .oneshot(create_payment_request(
            r#"{"from_account_no": "A1", "to_account_no": "A2", "amount": "10.00", "type": "TRANSFER"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "One or both accounts are closed");
}

#[tokio::test]
async fn test_unapproved_account_yields_bad_request() {
    let server = create_test_server(StubGateway {
        approved: false,
        ..StubGateway::permissive()
    })
    .await;

    let response = server
        .router()
        .oneshot(create_payment_request(
            r#"{"from_account_no": "A1", "to_account_no": "A2", "amount": "10.00", "type": "TRANSFER"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "One or both accounts are not approved");
}

#[tokio::test]
async fn test_declined_adjustment_returns_failed_payment_not_error() {
    let server = create_test_server(StubGateway {
        accept_adjustments: false,
        ..StubGateway::permissive()
    })
    .await;
    let app = server.router();

    let response = app
        .clone()
        .oneshot(create_payment_request(
            r#"{"from_account_no": "A1", "amount": "10.00", "type": "DEBIT"}"#,
        ))
        .await
        .unwrap();

    // A declined mutation is a normal response carrying a FAILED record.
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["status"], "FAILED");

    // The failed record is durable.
    let id = created["id"].as_str().unwrap();
    let response = app
        .oneshot(get_request(&format!("/api/payments/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_required_account_yields_processing_error() {
    let server = create_test_server(StubGateway::permissive()).await;

    let response = server
        .router()
        .oneshot(create_payment_request(
            r#"{"to_account_no": "A2", "amount": "10.00", "type": "DEBIT"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Failed to process payment");
}

#[tokio::test]
async fn test_get_unknown_payment_is_404() {
    let server = create_test_server(StubGateway::permissive()).await;

    let response = server
        .router()
        .oneshot(get_request(
            "/api/payments/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_with_invalid_id_is_400() {
    let server = create_test_server(StubGateway::permissive()).await;

    let response = server
        .router()
        .oneshot(get_request("/api/payments/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
