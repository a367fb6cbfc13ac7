//! SQLite record-store adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;
use uuid::Uuid;

use payment_types::{NewPayment, Payment, PaymentId, PaymentStore, StoreError};

use crate::types::DbPayment;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite record-store implementation.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_payments.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentStore for SqliteStore {
    async fn create(&self, new: NewPayment) -> Result<Payment, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO payments (id, from_account_no, to_account_no, amount, description, payment_type, status, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(&new.from_account_no)
        .bind(&new.to_account_no)
        .bind(new.amount.to_string())
        .bind(&new.description)
        .bind(new.payment_type.to_string())
        .bind(new.status.to_string())
        .bind(new.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Payment::from_parts(
            PaymentId::from_uuid(id),
            new.from_account_no,
            new.to_account_no,
            new.amount,
            new.description,
            new.payment_type,
            new.status,
            new.created_at,
        ))
    }

    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, StoreError> {
        let id_str = id.to_string();

        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, from_account_no, to_account_no, amount, description, payment_type, status, created_at
               FROM payments WHERE id = ?"#,
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn list_for_account(&self, account_no: &str) -> Result<Vec<Payment>, StoreError> {
        let rows: Vec<DbPayment> = sqlx::query_as(
            r#"SELECT id, from_account_no, to_account_no, amount, description, payment_type, status, created_at
               FROM payments WHERE from_account_no = ? OR to_account_no = ?
               ORDER BY created_at"#,
        )
        .bind(account_no)
        .bind(account_no)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbPayment::into_domain).collect()
    }

    async fn update(&self, payment: &Payment) -> Result<(), StoreError> {
        let result = sqlx::query(r#"UPDATE payments SET status = ? WHERE id = ?"#)
            .bind(payment.status.to_string())
            .bind(payment.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
