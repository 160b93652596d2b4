// src/routes/reset.rs
//! Reset trigger.
//!
//! `POST /reset` forwards a body-less reset to the backend (the backend
//! contract is POST-only in the current revision), then refreshes once so
//! the chart reflects the cleared history. Failures are logged and leave
//! the displayed state untouched.

use axum::{extract::State, response::Redirect, routing::post, Router};
use tracing::{error, info};

use crate::{Config, DashboardSync};

// ---

pub fn router() -> Router<(DashboardSync, Config)> {
    // ---
    Router::new().route("/reset", post(handler))
}

async fn handler(State((sync, _config)): State<(DashboardSync, Config)>) -> Redirect {
    // ---
    info!("POST /reset");

    if let Err(e) = sync.reset().await {
        error!("backend reset failed: {e:#}");
    }

    Redirect::to("/")
}
