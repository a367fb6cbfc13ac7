//! PostgreSQL record-store adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use payment_types::{NewPayment, Payment, PaymentId, PaymentStore, StoreError};

use crate::types::DbPayment;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Store
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL record-store implementation.
pub struct PostgresStore {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresStore {
    /// Creates a new PostgreSQL store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_payments_pg.sql"),
            "0001",
        )
        .await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentStore for PostgresStore {
    async fn create(&self, new: NewPayment) -> Result<Payment, StoreError> {
        let id = uuid::Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO payments (id, from_account_no, to_account_no, amount, description, payment_type, status, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(id)
        .bind(&new.from_account_no)
        .bind(&new.to_account_no)
        .bind(new.amount)
        .bind(&new.description)
        .bind(new.payment_type.to_string())
        .bind(new.status.to_string())
        .bind(new.created_at)
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
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, from_account_no, to_account_no, amount, description, payment_type, status, created_at
               FROM payments WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn list_for_account(&self, account_no: &str) -> Result<Vec<Payment>, StoreError> {
        let rows: Vec<DbPayment> = sqlx::query_as(
            r#"SELECT id, from_account_no, to_account_no, amount, description, payment_type, status, created_at
               FROM payments WHERE from_account_no = $1 OR to_account_no = $1
               ORDER BY created_at"#,
        )
        .bind(account_no)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbPayment::into_domain).collect()
    }

    async fn update(&self, payment: &Payment) -> Result<(), StoreError> {
        let result = sqlx::query(r#"UPDATE payments SET status = $1 WHERE id = $2"#)
            .bind(payment.status.to_string())
            .bind(payment.id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
