//! Upgrade flow: payment-intent creation plus the verified success webhook.
//!
//! The premium flag is flipped only here, and only after the webhook
//! signature checks out against the endpoint secret.

use axum::extract::State;
use bytes::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::auth::AuthSession;
use crate::errors::AppError;
use crate::models::account;
use crate::payment::{self, verify_webhook_signature, WebhookEvent};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UpgradeInfo {
    pub amount: u32,
    pub currency: &'static str,
    pub is_premium: bool,
}

#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// GET /api/v1/billing/upgrade
pub async fn upgrade_info(auth: AuthSession) -> Json<UpgradeInfo> {
    Json(UpgradeInfo {
        amount: payment::UPGRADE_AMOUNT,
        currency: payment::UPGRADE_CURRENCY,
        is_premium: auth.account.is_premium,
    })
}

/// POST /api/v1/billing/payment-intent
/// Creates a processor-side intent for the fixed upgrade price and hands the
/// opaque client secret back to the caller.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let intent = state
        .stripe
        .create_payment_intent(auth.account.id)
        .await
        .map_err(|e| AppError::Payment(e.to_string()))?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// POST /api/v1/billing/webhook
/// Processor callback. The raw body is verified against the
/// `Stripe-Signature` header before any state changes; an unverifiable
/// delivery is rejected and the premium flag stays untouched.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    verify_webhook_signature(
        &body,
        signature,
        &state.config.stripe_webhook_secret,
        chrono::Utc::now().timestamp(),
    )
    .map_err(|e| {
        warn!("Rejected webhook delivery: {e}");
        AppError::Unauthorized
    })?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Malformed webhook payload: {e}")))?;

    if event.event_type == "payment_intent.succeeded" {
        if let Some(account_id) = event.data.object.metadata.account_id {
            account::set_premium(&state.db, account_id).await?;
            info!("Account {account_id} upgraded to premium");
        } else {
            warn!("payment_intent.succeeded without account_id metadata");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
