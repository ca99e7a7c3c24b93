//! Portfolio lifecycle: create from an uploaded resume, list, edit, render.

use std::str::FromStr;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::errors::AppError;
use crate::extract::{extract_text, DocumentKind};
use crate::models::{account, portfolio};
use crate::parser::parse_resume_text;
use crate::render::{render_portfolio, TemplateId};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PortfolioSummary {
    pub id: Uuid,
    pub title: String,
    pub template_id: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&portfolio::PortfolioRow> for PortfolioSummary {
    fn from(row: &portfolio::PortfolioRow) -> Self {
        Self {
            id: row.id,
            title: row.title.clone(),
            template_id: row.template_id.clone(),
            is_published: row.is_published,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// GET /api/v1/templates
/// The fixed template catalogue backing the create form.
pub async fn list_templates() -> Json<Vec<TemplateInfo>> {
    Json(
        TemplateId::all()
            .iter()
            .map(|t| TemplateInfo {
                id: t.as_str(),
                name: t.display_name(),
            })
            .collect(),
    )
}

/// GET /api/v1/portfolios
/// The caller's portfolios in creation order.
pub async fn list_portfolios(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<Vec<PortfolioSummary>>, AppError> {
    let rows = portfolio::list_by_owner(&state.db, auth.account.id).await?;
    Ok(Json(rows.iter().map(PortfolioSummary::from).collect()))
}

/// POST /api/v1/portfolios
/// Multipart form: `title`, `template`, and a `resume` file (pdf/docx/txt).
/// The uploaded document is extracted and heuristically parsed; the result is
/// stored as the portfolio's resume record.
pub async fn create_portfolio(
    State(state): State<AppState>,
    auth: AuthSession,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<portfolio::PortfolioRow>), AppError> {
    let mut title: Option<String> = None;
    let mut template: Option<TemplateId> = None;
    let mut resume_file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.to_string()))?,
                );
            }
            Some("template") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                template = Some(
                    TemplateId::from_str(&raw).map_err(|e| AppError::Validation(e.to_string()))?,
                );
            }
            Some("resume") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::Validation("No file selected".to_string()))?
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                resume_file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| AppError::Validation("Missing field: title".to_string()))?;
    let template =
        template.ok_or_else(|| AppError::Validation("Missing field: template".to_string()))?;
    let (filename, bytes) =
        resume_file.ok_or_else(|| AppError::Validation("No file selected".to_string()))?;

    let kind = DocumentKind::from_filename(&filename)?;
    let text = extract_text(&bytes, kind)?;
    let resume_data = parse_resume_text(&text);

    let row = portfolio::create(&state.db, auth.account.id, &title, template, &resume_data).await?;
    info!("Created portfolio {} for account {}", row.id, auth.account.id);

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/portfolios/:id
/// Owner-only detail view backing the edit form.
pub async fn get_portfolio(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<portfolio::PortfolioRow>, AppError> {
    let row = fetch_owned(&state, &auth, id).await?;
    Ok(Json(row))
}

/// PATCH /api/v1/portfolios/:id
/// Field-level overwrite of the resume record plus title/published toggles.
/// Editing someone else's portfolio is an explicit authorization error.
pub async fn update_portfolio(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
    Json(changes): Json<portfolio::PortfolioChanges>,
) -> Result<Json<portfolio::PortfolioRow>, AppError> {
    let existing = fetch_owned(&state, &auth, id).await?;
    let updated = portfolio::update(&state.db, &existing, &changes).await?;
    Ok(Json(updated))
}

/// GET /api/v1/portfolios/:id/preview
/// Owner-only render, regardless of the published flag.
pub async fn preview_portfolio(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let row = fetch_owned(&state, &auth, id).await?;
    let show_branding = !auth.account.is_premium;
    Ok(Html(render_page(&row, show_branding)?))
}

/// GET /p/:id
/// Public, unauthenticated view. Unpublished portfolios are indistinguishable
/// from missing ones.
pub async fn public_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let row = portfolio::get(&state.db, id)
        .await?
        .filter(|p| p.is_published)
        .ok_or_else(|| AppError::NotFound(format!("Portfolio {id} not found")))?;

    let owner = account::find_by_id(&state.db, row.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio {id} not found")))?;

    Ok(Html(render_page(&row, !owner.is_premium)?))
}

async fn fetch_owned(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
) -> Result<portfolio::PortfolioRow, AppError> {
    let row = portfolio::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio {id} not found")))?;
    if row.account_id != auth.account.id {
        return Err(AppError::Forbidden);
    }
    Ok(row)
}

fn render_page(row: &portfolio::PortfolioRow, show_branding: bool) -> Result<String, AppError> {
    // The column only ever holds values that passed the enum boundary.
    let template = TemplateId::from_str(&row.template_id)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(render_portfolio(
        template,
        &row.title,
        &row.resume_data.0,
        show_branding,
    ))
}
