use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::render::TemplateId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub template_id: String,
    pub resume_data: Json<ResumeData>,
    pub custom_domain: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field-level changes applied by the edit form. `None` leaves a field as-is;
/// resume fields are overwritten, never merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioChanges {
    pub title: Option<String>,
    pub is_published: Option<bool>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
}

/// Inserts a new portfolio, published by default.
pub async fn create(
    pool: &PgPool,
    account_id: Uuid,
    title: &str,
    template: TemplateId,
    resume_data: &ResumeData,
) -> Result<PortfolioRow, AppError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO portfolios (account_id, title, template_id, resume_data)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(title)
    .bind(template.as_str())
    .bind(Json(resume_data))
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<PortfolioRow>, AppError> {
    let row = sqlx::query_as("SELECT * FROM portfolios WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Applies `changes` on top of an already-fetched row and persists the result.
/// Ownership must have been checked by the caller; this function only mutates.
pub async fn update(
    pool: &PgPool,
    existing: &PortfolioRow,
    changes: &PortfolioChanges,
) -> Result<PortfolioRow, AppError> {
    let mut data = existing.resume_data.0.clone();
    if let Some(name) = &changes.name {
        data.name = name.clone();
    }
    if let Some(email) = &changes.email {
        data.email = email.clone();
    }
    if let Some(phone) = &changes.phone {
        data.phone = phone.clone();
    }
    if let Some(summary) = &changes.summary {
        data.summary = summary.clone();
    }

    let title = changes.title.as_deref().unwrap_or(&existing.title);
    let is_published = changes.is_published.unwrap_or(existing.is_published);

    let row = sqlx::query_as(
        r#"
        UPDATE portfolios
        SET title = $1, resume_data = $2, is_published = $3, updated_at = now()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(Json(&data))
    .bind(is_published)
    .bind(existing.id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// All portfolios owned by an account, in creation order.
pub async fn list_by_owner(pool: &PgPool, account_id: Uuid) -> Result<Vec<PortfolioRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM portfolios WHERE account_id = $1 ORDER BY created_at ASC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
