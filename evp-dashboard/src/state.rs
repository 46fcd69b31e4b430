//! Dashboard state and its derived views.
//!
//! `Dashboard` owns the record store, the filter bar selections and the table
//! state. Every mutator recomputes the views that depend on what it changed,
//! so readers always see views consistent with the current state:
//!
//! | change          | recomputed                                    |
//! |-----------------|-----------------------------------------------|
//! | records         | options, filtered set, summary, search, page  |
//! | filter          | filtered set, summary, search, page           |
//! | search text     | search, page                                  |
//! | page size       | page                                          |

use std::future::Future;

use evp_data::filter::{clear_filters, compute_filter_options, Filter, FilterOptions, FilterState};
use evp_data::summary::{summarize_with, Summary, SummaryOptions};
use evp_data::table::{page_count, paginate, SearchQuery, TableRow, TableState, DEFAULT_PAGE_SIZE};
use evp_records::{LoadedRecords, VehicleRecord};

use crate::charts::{chart_set, ChartSet};
use crate::kpi::{kpi_cards, KpiCard};
use crate::store::{LoadStatus, RecordStore};

/// Defaults a dashboard starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub page_size: usize,
    pub summary: SummaryOptions,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            summary: SummaryOptions::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    options: DashboardOptions,
    store: RecordStore,
    filters: FilterState,
    table: TableState,
    filter_options: FilterOptions,
    /// Indices into the store of records passing the filters
    filtered: Vec<usize>,
    /// Summary of the filtered records
    summary: Summary,
    /// Indices into the store of filtered records matching the search
    searched: Vec<usize>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardOptions::default())
    }
}

impl Dashboard {
    /// A dashboard waiting for its dataset.
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            options,
            store: RecordStore::new(),
            filters: FilterState::default(),
            table: TableState::new(options.page_size),
            filter_options: FilterOptions::default(),
            filtered: Vec::new(),
            summary: Summary::empty(&options.summary),
            searched: Vec::new(),
        }
    }

    /// A ready dashboard over already-decoded records.
    pub fn with_records(options: DashboardOptions, records: Vec<VehicleRecord>) -> Self {
        let mut dashboard = Self::new(options);
        dashboard.store = RecordStore::from_records(records);
        dashboard.refresh_records();
        dashboard
    }

    /// Settle the dataset load and rebuild every view.
    pub fn finish_load(&mut self, outcome: anyhow::Result<LoadedRecords>) {
        self.store.finish(outcome);
        self.refresh_records();
    }

    /// Await the dataset and rebuild every view.
    pub async fn load_from<F>(&mut self, source: F)
    where
        F: Future<Output = anyhow::Result<LoadedRecords>>,
    {
        self.store.load_from(source).await;
        self.refresh_records();
    }

    /// Change one filter field.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filters = self.filters.with(filter);
        self.refresh_filtered();
    }

    /// Reset every filter field to "All".
    pub fn clear_filters(&mut self) {
        self.filters = clear_filters();
        self.refresh_filtered();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.table.set_search(term);
        self.refresh_searched();
    }

    pub fn set_page(&mut self, page: usize) {
        self.table.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.table.set_page_size(page_size);
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn status(&self) -> &LoadStatus {
        self.store.status()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Dropdown choices, always from the full dataset.
    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn filtered_records(&self) -> Vec<&VehicleRecord> {
        self.resolve(&self.filtered)
    }

    /// Filtered records that also match the search text.
    pub fn searched_records(&self) -> Vec<&VehicleRecord> {
        self.resolve(&self.searched)
    }

    /// Number of table pages at the current page size.
    pub fn page_count(&self) -> usize {
        page_count(self.searched.len(), self.table.page_size())
    }

    /// The rows on the current table page.
    pub fn visible_rows(&self) -> Vec<TableRow> {
        let page = paginate(&self.searched, self.table.page(), self.table.page_size());
        let offset = self.table.page().saturating_mul(self.table.page_size());
        let records = self.store.records();
        page.rows
            .iter()
            .enumerate()
            .map(|(i, &index)| TableRow::from_record(&records[index], offset + i))
            .collect()
    }

    pub fn kpi_cards(&self) -> Vec<KpiCard> {
        kpi_cards(&self.summary)
    }

    pub fn charts(&self) -> ChartSet {
        chart_set(&self.summary)
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&VehicleRecord> {
        let records = self.store.records();
        indices.iter().map(|&i| &records[i]).collect()
    }

    fn refresh_records(&mut self) {
        self.filter_options = compute_filter_options(self.store.records());
        self.refresh_filtered();
    }

    fn refresh_filtered(&mut self) {
        let records = self.store.records();
        self.filtered = records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.filters.matches(record))
            .map(|(i, _)| i)
            .collect();
        self.summary = summarize_with(self.resolve(&self.filtered), &self.options.summary);
        log::info!(
            "[EVP] dashboard: {} of {} records pass {} filter(s)",
            self.filtered.len(),
            records.len(),
            self.filters.active_count()
        );
        self.table.reset_page();
        self.refresh_searched();
    }

    fn refresh_searched(&mut self) {
        let records = self.store.records();
        let query = SearchQuery::new(self.table.search());
        self.searched = self
            .filtered
            .iter()
            .copied()
            .filter(|&i| query.matches(&records[i]))
            .collect();
        log::debug!(
            "[EVP] dashboard: search {:?} keeps {} rows",
            self.table.search(),
            self.searched.len()
        );
    }
}
