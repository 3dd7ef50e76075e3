//! Non-visual state and fetch logic behind each dashboard region.
//!
//! Each view model owns its slice of state inside a `tokio::sync::watch`
//! channel: renderers call `snapshot()` for an immutable copy or
//! `subscribe()` to be woken on every change. Handles are cheap to clone so
//! UI event handlers can drive them from spawned tasks.
//!
//! - [`KpiViewModel`]: year-to-date summary
//! - [`SeriesViewModel`]: account groups and the moving-average series
//! - [`ChatOrchestrator`]: transcript and thinking flag
//! - [`Dashboard`]: wires the three together

pub mod chat;
pub mod dashboard;
pub mod kpi;
pub mod series;

mod guard;

pub use chat::{ChatOrchestrator, ChatState, SendOutcome, BACKEND_ERROR_TEXT, DEFAULT_GREETING};
pub use dashboard::{Dashboard, DashboardOptions};
pub use kpi::{KpiState, KpiStatus, KpiViewModel};
pub use series::{SeriesOptions, SeriesSelection, SeriesState, SeriesViewModel, StalePolicy};
