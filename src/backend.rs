//! HTTP client for the sump monitor backend.
//!
//! Wraps one [`reqwest::Client`] around the four endpoints the backend
//! exposes: settings read/write, the readings blob, and the reset trigger.
//! Non-2xx statuses are promoted to errors here so every caller sees a
//! single failure path for transport and HTTP-level problems alike.

use anyhow::{Context, Result};

use crate::models::{Settings, SettingsForm};

// ---

/// Client for the sump monitor backend API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    // ---
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        // ---
        BackendClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /settings` – current settings as JSON. Missing fields take the
    /// defaults documented on [`Settings`].
    pub async fn fetch_settings(&self) -> Result<Settings> {
        // ---
        let url = format!("{}/settings", self.base_url);
        let settings = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to fetch settings from {url}"))?
            .json()
            .await
            .with_context(|| format!("Failed to decode settings JSON from {url}"))?;

        Ok(settings)
    }

    /// `GET /data` – the raw readings blob. Parsing is the caller's job.
    pub async fn fetch_readings(&self) -> Result<String> {
        // ---
        let url = format!("{}/data", self.base_url);
        let blob = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to fetch readings from {url}"))?
            .text()
            .await
            .with_context(|| format!("Failed to read readings body from {url}"))?;

        Ok(blob)
    }

    /// `POST /settings` – push user-edited settings as a urlencoded form.
    pub async fn push_settings(&self, form: &SettingsForm) -> Result<()> {
        // ---
        let url = format!("{}/settings", self.base_url);
        self.http
            .post(&url)
            .form(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to update settings at {url}"))?;

        Ok(())
    }

    /// `POST /reset` – ask the backend to drop its stored readings. No body.
    pub async fn reset(&self) -> Result<()> {
        // ---
        let url = format!("{}/reset", self.base_url);
        self.http
            .post(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to reset backend at {url}"))?;

        Ok(())
    }
}
