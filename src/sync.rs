//! The refresh routine and the snapshot it maintains.
//!
//! [`DashboardSync`] owns the backend client and the current [`Snapshot`].
//! One refresh cycle fetches settings and readings concurrently (joined
//! all-or-nothing), scans the blob, derives the display metrics, and swaps
//! the new snapshot in. A failed cycle changes nothing: readers keep seeing
//! the last good snapshot, and `fetched_at` tells them how old it is.
//!
//! Cycles are serialized through an async gate, so a form-triggered refresh
//! and a scheduled one can never interleave their store writes.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::backend::BackendClient;
use crate::models::{SettingsForm, Snapshot};
use crate::parser;

// ---

/// Shared dashboard state: backend client plus the latest snapshot.
///
/// Cheap to clone; all clones observe the same snapshot.
#[derive(Clone)]
pub struct DashboardSync {
    // ---
    client: BackendClient,
    current: Arc<RwLock<Option<Arc<Snapshot>>>>,
    refresh_gate: Arc<Mutex<()>>,
}

impl DashboardSync {
    pub fn new(client: BackendClient) -> Self {
        // ---
        DashboardSync {
            client,
            current: Arc::new(RwLock::new(None)),
            refresh_gate: Arc::new(Mutex::new(())),
        }
    }

    /// The most recent successfully fetched snapshot, if any.
    pub async fn latest(&self) -> Option<Arc<Snapshot>> {
        // ---
        self.current.read().await.clone()
    }

    /// Run one full refresh cycle.
    ///
    /// Settings and readings are requested concurrently; either failure
    /// (transport, non-2xx, or JSON decode) aborts the whole cycle and
    /// leaves the stored snapshot untouched. Malformed readings entries are
    /// logged and skipped without failing the cycle.
    pub async fn refresh(&self) -> Result<()> {
        // ---
        let _cycle = self.refresh_gate.lock().await;

        let (settings, blob) =
            tokio::try_join!(self.client.fetch_settings(), self.client.fetch_readings())?;

        let outcome = parser::scan_readings(&blob);
        for bad in &outcome.malformed {
            warn!(
                offset = bad.offset,
                "skipping malformed readings entry: {}", bad.reason
            );
        }

        let snapshot = Snapshot::derive(settings, outcome.readings, Utc::now());
        info!(
            "refresh complete: {} readings for sump '{}' ({} malformed skipped)",
            snapshot.readings.len(),
            snapshot.settings.sump_id,
            outcome.malformed.len()
        );

        *self.current.write().await = Some(Arc::new(snapshot));
        Ok(())
    }

    /// Forward edited settings to the backend, then refresh once so the page
    /// shows the backend's authoritative (possibly clamped) values.
    ///
    /// A failed push runs zero refresh cycles.
    pub async fn submit_settings(&self, form: &SettingsForm) -> Result<()> {
        // ---
        self.client.push_settings(form).await?;
        info!("settings updated for sump '{}'", form.sump_id);
        self.refresh().await
    }

    /// Ask the backend to drop its stored readings, then refresh once.
    pub async fn reset(&self) -> Result<()> {
        // ---
        self.client.reset().await?;
        info!("backend readings reset");
        self.refresh().await
    }
}
