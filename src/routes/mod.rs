// Route exports
pub mod health;
pub mod users;

use crate::core::Gate;
use actix_web::web;
use std::sync::Arc;

/// Body size accepted on the delegation path unless configured otherwise
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<Gate>,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(gate: Gate) -> Self {
        Self {
            gate: Arc::new(gate),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}

/// Gated surface: every method and path goes through the gate
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(users::create_user));
}

/// Operational surface, served on its own listener
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check));
}
