/// Error types for record validation
use thiserror::Error;

/// Why a raw registration row was rejected.
///
/// Rejected rows are skipped by the loaders; they never abort a load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Model year column is empty
    #[error("Missing model year")]
    MissingModelYear,

    /// Model year could not be parsed as an integer
    #[error("Failed to parse model year: {0:?}")]
    ModelYearParse(String),

    /// Model year parsed but is not a plausible calendar year
    #[error("Implausible model year: {0}")]
    ImplausibleModelYear(i32),

    /// Electric vehicle type column is empty
    #[error("Missing electric vehicle type")]
    MissingVehicleType,
}
