//! The loaded dataset and where its load stands.

use std::future::Future;

use evp_records::{LoadedRecords, VehicleRecord};
use serde::Serialize;

/// Progress of the single dataset load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum LoadStatus {
    Loading,
    Ready,
    /// The load failed; the message is shown to the user as-is
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Holds the records once loaded. Read-only after a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    records: Vec<VehicleRecord>,
    skipped: usize,
    status: LoadStatus,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// An empty store waiting for its load.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
            status: LoadStatus::Loading,
        }
    }

    /// A ready store over already-decoded records.
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        Self {
            records,
            skipped: 0,
            status: LoadStatus::Ready,
        }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows the loader rejected.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Settle the store with the outcome of a load.
    ///
    /// Success replaces the records in one step. Failure leaves the store
    /// empty and keeps one message describing the whole error chain.
    pub fn finish(&mut self, outcome: anyhow::Result<LoadedRecords>) {
        match outcome {
            Ok(loaded) => {
                log::info!(
                    "[EVP] store: Loaded {} records ({} skipped)",
                    loaded.records.len(),
                    loaded.skipped
                );
                self.records = loaded.records;
                self.skipped = loaded.skipped;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                let message = format!("{:#}", e);
                log::error!("[EVP] store: Load failed: {}", message);
                self.records = Vec::new();
                self.skipped = 0;
                self.status = LoadStatus::Failed(message);
            }
        }
    }

    /// Await `source` and settle the store with its outcome.
    pub async fn load_from<F>(&mut self, source: F)
    where
        F: Future<Output = anyhow::Result<LoadedRecords>>,
    {
        self.status = LoadStatus::Loading;
        let outcome = source.await;
        self.finish(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = include_str!("../../fixtures/ev_population_sample.csv");

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_new_store_is_loading() {
        let store = RecordStore::new();
        assert!(store.status().is_loading());
        assert!(store.is_empty());
        assert_eq!(store.status().error_message(), None);
    }

    #[test]
    fn test_finish_success() {
        init_logger();
        let mut store = RecordStore::new();
        store.finish(evp_records::load::parse_csv(SAMPLE_CSV));
        assert_eq!(store.status(), &LoadStatus::Ready);
        assert_eq!(store.len(), 13);
        assert_eq!(store.skipped(), 2);
    }

    #[test]
    fn test_failure_leaves_store_empty() {
        init_logger();
        let mut store = RecordStore::new();
        store.finish(evp_records::load::parse_csv(SAMPLE_CSV));
        assert_eq!(store.len(), 13);

        let failed: anyhow::Result<LoadedRecords> =
            Err(anyhow::anyhow!("connection refused").context("Failed to fetch dataset"));
        store.finish(failed);
        assert!(store.is_empty());
        assert_eq!(store.skipped(), 0);
        assert_eq!(
            store.status().error_message(),
            Some("Failed to fetch dataset: connection refused")
        );
    }

    #[tokio::test]
    async fn test_load_from_future() {
        init_logger();
        let mut store = RecordStore::new();
        store
            .load_from(async { evp_records::load::parse_csv(SAMPLE_CSV) })
            .await;
        assert_eq!(store.status(), &LoadStatus::Ready);
        assert_eq!(store.records()[0].make, "TESLA");
    }

    #[tokio::test]
    async fn test_load_from_failing_future() {
        let truncated_gzip = [0x1f, 0x8b, 0x00];
        let mut store = RecordStore::new();
        store
            .load_from(async {
                evp_records::load::parse_bytes(&truncated_gzip, evp_records::SourceFormat::GzCsv)
            })
            .await;
        assert!(store.is_empty());
        assert!(store.status().error_message().is_some());
    }

    #[test]
    fn test_status_json() {
        let json = serde_json::to_value(LoadStatus::Failed("boom".to_string())).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["message"], "boom");
        let json = serde_json::to_value(LoadStatus::Ready).unwrap();
        assert_eq!(json["state"], "ready");
    }
}
