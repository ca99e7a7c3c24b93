pub mod auth;
pub mod billing;
pub mod health;
pub mod portfolios;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::extract::MAX_UPLOAD_BYTES;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        // Accounts & sessions
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        // Portfolios
        .route("/api/v1/templates", get(portfolios::list_templates))
        .route(
            "/api/v1/portfolios",
            get(portfolios::list_portfolios).post(portfolios::create_portfolio),
        )
        .route(
            "/api/v1/portfolios/:id",
            get(portfolios::get_portfolio).patch(portfolios::update_portfolio),
        )
        .route(
            "/api/v1/portfolios/:id/preview",
            get(portfolios::preview_portfolio),
        )
        .route("/p/:id", get(portfolios::public_portfolio))
        // Billing
        .route("/api/v1/billing/upgrade", get(billing::upgrade_info))
        .route(
            "/api/v1/billing/payment-intent",
            post(billing::create_payment_intent),
        )
        .route("/api/v1/billing/webhook", post(billing::payment_webhook))
        // Upload ceiling applies before any extraction work happens.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
