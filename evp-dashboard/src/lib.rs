//! Dashboard state and presentation payloads for EV population apps.
//!
//! This crate provides:
//! - `store`: the loaded record set and its load status
//! - `state`: [`Dashboard`], owning filters and table state and keeping every
//!   derived view current
//! - `kpi` / `charts`: KPI card values and chart series built from a summary
//! - `snapshot`: the whole current view as one serializable value

pub mod charts;
pub mod kpi;
pub mod snapshot;
pub mod state;
pub mod store;

pub use snapshot::DashboardSnapshot;
pub use state::{Dashboard, DashboardOptions};
pub use store::{LoadStatus, RecordStore};
