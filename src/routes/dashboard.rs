// src/routes/dashboard.rs
//! The dashboard page itself.
//!
//! `GET /` renders the latest snapshot through the pure render layer. With
//! no snapshot yet (startup, or the backend has never answered) it serves
//! the placeholder page, which meta-refreshes like the real one. The page is
//! marked no-store so the meta-refresh always hits us, not a cache.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::render;
use crate::{Config, DashboardSync};

// ---

pub fn router() -> Router<(DashboardSync, Config)> {
    // ---
    Router::new().route("/", get(handler))
}

async fn handler(State((sync, config)): State<(DashboardSync, Config)>) -> impl IntoResponse {
    // ---
    let snapshot = sync.latest().await;
    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(render::page(snapshot.as_deref(), config.refresh_secs)),
    )
}
