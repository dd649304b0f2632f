use std::sync::Arc;

use crate::config::Config;
use crate::screening::attributes::{default_rules, NumericRule};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Numeric extraction rules applied to every candidate. Compiled once at startup.
    pub numeric_rules: Arc<Vec<NumericRule>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            numeric_rules: Arc::new(default_rules()),
        }
    }
}
