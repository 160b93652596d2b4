use axum::Router;

use crate::{Config, DashboardSync};

mod dashboard;
mod health;
mod reset;
mod settings;

// ---

pub fn router(sync: DashboardSync, config: Config) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(settings::router())
        .merge(reset::router())
        .merge(health::router())
        .with_state((sync, config))
}
