//! Persistence for user records.
//!
//! `AppState` holds an `Arc<dyn UserStore>`; production wires in `PgUserStore`,
//! the router tests wire in an in-memory store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::user::{NewUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts one record and returns it as stored, generated id included.
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError>;

    /// Returns every stored record in id order.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Removes the record with `id`. Returns `false` when no such record exists.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

/// PostgreSQL-backed store over the shared connection pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (name, birthdate, address, phone, active, bolsa_familia, attends_church, church_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(new_user.birthdate)
        .bind(&new_user.address)
        .bind(&new_user.phone)
        .bind(new_user.active)
        .bind(new_user.bolsa_familia)
        .bind(new_user.attends_church)
        .bind(new_user.church_name())
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted user row {}", user.id);
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
