//! Data model for the dashboard sync client.
//!
//! The backend is the source of truth for everything here: [`Settings`] and
//! the parsed [`Reading`] set are overwritten wholesale on every refresh
//! cycle, and all derived metrics live in an immutable [`Snapshot`] that is
//! rebuilt from scratch each time. Nothing is merged with prior state, so a
//! backend-side truncation of history shows up immediately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

fn default_sump_id() -> String {
    "Unknown".to_string()
}

fn default_pit_depth() -> f64 {
    999.0
}

fn default_alarm_level() -> f64 {
    0.0
}

fn default_log_rate() -> u32 {
    15 * 3600
}

fn default_heartbeat() -> u32 {
    10
}

fn default_threshold() -> f64 {
    1.0
}

/// Sump monitor settings as served by `GET /settings`.
///
/// Any field the backend omits falls back to a hardcoded default so the
/// dashboard never renders an undefined value.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // ---
    #[serde(default = "default_sump_id")]
    pub sump_id: String,
    /// Physical depth of the sump pit in cm, the reference for converting a
    /// sensor distance into a water level.
    #[serde(default = "default_pit_depth")]
    pub pit_depth: f64,
    /// Water level in cm at which the backend raises an alarm.
    #[serde(default = "default_alarm_level")]
    pub alarm_level: f64,
    /// Seconds between backend-side log entries.
    #[serde(default = "default_log_rate")]
    pub log_rate: u32,
    /// Seconds between sensor samples.
    #[serde(default = "default_heartbeat")]
    pub heartbeat: u32,
    /// Distance change in cm that forces an immediate backend log entry.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// User-edited settings as posted from the dashboard form.
///
/// Forwarded verbatim to the backend's `POST /settings` as
/// `application/x-www-form-urlencoded`; the backend validates and clamps,
/// then the next refresh shows its authoritative values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsForm {
    // ---
    pub sump_id: String,
    pub pit_depth: f64,
    pub alarm_level: f64,
    pub log_rate: u32,
    pub heartbeat: u32,
    pub threshold: f64,
}

/// One parsed reading from the `/data` blob.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    // ---
    /// Backend-formatted timestamp with the timezone offset already stripped.
    pub timestamp: String,
    /// Sensor-to-water-surface gap in cm.
    pub distance: f64,
}

/// Immutable per-refresh state: the fetched settings and readings plus every
/// derived display metric. Handed to the render layer as-is; rounding for
/// display happens there, not here.
#[derive(Debug, Clone)]
pub struct Snapshot {
    // ---
    pub settings: Settings,
    pub readings: Vec<Reading>,
    /// `pit_depth - distance` per reading, same order as `readings`.
    pub water_levels: Vec<f64>,
    pub max_distance: Option<f64>,
    pub min_distance: Option<f64>,
    pub latest_water_level: Option<f64>,
    pub latest_timestamp: Option<String>,
    /// When this snapshot was fetched; drives the staleness line on the page.
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Derive all display metrics from a settings/readings pair.
    pub fn derive(settings: Settings, readings: Vec<Reading>, fetched_at: DateTime<Utc>) -> Self {
        // ---
        let water_levels: Vec<f64> = readings
            .iter()
            .map(|r| settings.pit_depth - r.distance)
            .collect();

        let max_distance = readings.iter().map(|r| r.distance).reduce(f64::max);
        let min_distance = readings.iter().map(|r| r.distance).reduce(f64::min);
        let latest_water_level = water_levels.last().copied();
        let latest_timestamp = readings.last().map(|r| r.timestamp.clone());

        Snapshot {
            settings,
            readings,
            water_levels,
            max_distance,
            min_distance,
            latest_water_level,
            latest_timestamp,
            fetched_at,
        }
    }
}

/// Round to 2 decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
