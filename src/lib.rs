//! Dashboard sync client for a sump-pit water level monitor.
//!
//! The client polls a small HTTP backend for settings (JSON) and a readings
//! blob (text), derives the display metrics, and serves the rendered
//! dashboard page locally. Form posts on that page (settings edits, reset)
//! are forwarded to the backend and followed by one refresh cycle.
//!
//! Module layout follows the Explicit Module Boundary Pattern (EMBP):
//! sibling modules are private, and everything the binary or integration
//! tests need is re-exported here so internals can move freely.
//!
//! - [`backend`](BackendClient) – reqwest client for the backend endpoints
//! - [`sync`](DashboardSync) – refresh routine and the current snapshot
//! - `parser` – scanner for the bracketed readings blob
//! - `render` – pure snapshot-to-HTML page rendering
//! - `routes` – local HTTP adapter (page, settings, reset, health)
//! - `scheduler` – periodic refresh task with a shutdown handle

mod backend;
mod config;
mod models;
mod parser;
mod render;
mod routes;
mod scheduler;
mod sync;

pub use backend::BackendClient;
pub use config::{load_from_env, Config};
pub use models::{round2, Reading, Settings, SettingsForm, Snapshot};
pub use parser::{scan_readings, Malformed, MalformedReason, ScanOutcome};
pub use routes::router;
pub use scheduler::{spawn_scheduler, SchedulerHandle};
pub use sync::DashboardSync;
