// src/routes/settings.rs
//! Settings form submission.
//!
//! `POST /settings` takes the urlencoded dashboard form, forwards it to the
//! backend, and on success runs exactly one refresh so the redirected page
//! shows the backend's authoritative values. A failed push is logged and
//! triggers zero refreshes; the page keeps its last-known-good state
//! (post/redirect/get either way, so a reload never re-submits).

use axum::{extract::State, response::Redirect, routing::post, Form, Router};
use tracing::{error, info};

use crate::models::SettingsForm;
use crate::{Config, DashboardSync};

// ---

pub fn router() -> Router<(DashboardSync, Config)> {
    // ---
    Router::new().route("/settings", post(handler))
}

async fn handler(
    State((sync, _config)): State<(DashboardSync, Config)>,
    Form(form): Form<SettingsForm>,
) -> Redirect {
    // ---
    info!("POST /settings for sump '{}'", form.sump_id);

    if let Err(e) = sync.submit_settings(&form).await {
        error!("settings update failed: {e:#}");
    }

    Redirect::to("/")
}
