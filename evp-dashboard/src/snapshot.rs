//! A serializable picture of the whole dashboard for the presentation layer.

use anyhow::{Context, Result};
use evp_data::filter::{FilterOptions, FilterState};
use evp_data::summary::Summary;
use evp_data::table::{TableRow, TableState, EMPTY_TABLE_MESSAGE, ROWS_PER_PAGE_OPTIONS};
use serde::Serialize;

use crate::charts::ChartSet;
use crate::kpi::KpiCard;
use crate::state::Dashboard;
use crate::store::LoadStatus;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub state: TableState,
    pub rows: Vec<TableRow>,
    pub total_count: usize,
    pub page_count: usize,
    pub rows_per_page_options: Vec<usize>,
    /// Set when the current page has no rows
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub status: LoadStatus,
    /// Rows the loader rejected
    pub skipped: usize,
    pub kpis: Vec<KpiCard>,
    pub summary: Summary,
    pub charts: ChartSet,
    pub filters: FilterState,
    pub filter_options: FilterOptions,
    pub table: TableView,
}

impl Dashboard {
    /// Owned copy of every current view.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let total_count = self.searched_records().len();
        let rows = self.visible_rows();
        let empty_message = rows.is_empty().then_some(EMPTY_TABLE_MESSAGE);
        DashboardSnapshot {
            status: self.status().clone(),
            skipped: self.store().skipped(),
            kpis: self.kpi_cards(),
            summary: self.summary().clone(),
            charts: self.charts(),
            filters: self.filters().clone(),
            filter_options: self.filter_options().clone(),
            table: TableView {
                state: self.table().clone(),
                rows,
                total_count,
                page_count: self.page_count(),
                rows_per_page_options: ROWS_PER_PAGE_OPTIONS.to_vec(),
                empty_message,
            },
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string(&self.snapshot()).context("Failed to serialize dashboard snapshot")
    }
}
