//! Core vehicle registration types and dataset loaders.
//!
//! - `record`: [`VehicleRecord`] plus the raw text row it is validated from
//! - `load`: CSV / JSON / gzip CSV parsing into [`LoadedRecords`]
//! - `fetch`: one-shot HTTP download (behind the `api` feature)

pub mod error;
#[cfg(feature = "api")]
pub mod fetch;
pub mod load;
pub mod record;

pub use error::RecordError;
pub use load::{LoadedRecords, SourceFormat};
pub use record::{VehicleKind, VehicleRecord};
