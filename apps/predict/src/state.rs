use std::sync::Arc;

use crate::model::PricingModel;

/// Shared application state. The model is loaded once at startup and shared
/// read-only across handlers.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<PricingModel>,
}
