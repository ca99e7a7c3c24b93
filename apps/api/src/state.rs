use sqlx::PgPool;

use crate::config::Config;
use crate::payment::StripeClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub stripe: StripeClient,
    pub config: Config,
}
