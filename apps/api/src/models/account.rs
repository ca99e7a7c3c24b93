use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

/// Inserts a new account. Fails with `DuplicateEmail` if the email is taken;
/// the unique constraint is the source of truth, so concurrent registrations
/// of the same email cannot both succeed.
pub async fn create(pool: &PgPool, email: &str, password_hash: &str) -> Result<AccountRow, AppError> {
    let row: Result<AccountRow, sqlx::Error> = sqlx::query_as(
        r#"
        INSERT INTO accounts (email, password_hash)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    row.map_err(|e| {
        if let sqlx::Error::Database(ref dbe) = e {
            if dbe.is_unique_violation() {
                return AppError::DuplicateEmail;
            }
        }
        AppError::Database(e)
    })
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AccountRow>, AppError> {
    let row = sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AccountRow>, AppError> {
    let row = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Flips the premium flag to true. Idempotent; there is no reverse path.
pub async fn set_premium(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    sqlx::query("UPDATE accounts SET is_premium = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
