use crate::config::Config;
use crate::guidance::CareerAdvisor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every model-backed route goes through here.
    pub advisor: CareerAdvisor,
    pub config: Config,
}
