use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio-api"
    }))
}

/// GET /
/// Home: service description plus the entry points a client needs.
pub async fn home_handler() -> Json<Value> {
    Json(json!({
        "service": "portfolio-api",
        "register": "/api/v1/auth/register",
        "login": "/api/v1/auth/login",
        "portfolios": "/api/v1/portfolios",
        "templates": "/api/v1/templates"
    }))
}
