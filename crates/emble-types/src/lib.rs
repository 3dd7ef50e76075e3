//! Types shared by the Emble dashboard crates.
//!
//! Everything here mirrors the JSON contract of the finance backend
//! (`/kpi/summary`, `/account-groups`, `/series/amount-by-group`, `/chat`)
//! plus the small amount of domain vocabulary the view models need.

pub mod chat;
pub mod kpi;
pub mod series;
pub mod validate;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, ChatTurn, Sender};
pub use kpi::{KpiSummary, Period};
pub use series::{AccountGroups, MaWindow, SeriesMeta, SeriesPoint, SeriesResponse};
pub use validate::{Validate, ValidationError};
