//! Table view-model: search, paging and cell display text.

use evp_records::{VehicleKind, VehicleRecord};
use evp_utils::text::{contains_lowercase, truncate_chars};
use evp_utils::PLACEHOLDER;
use serde::Serialize;

/// Rows per page when nothing else was chosen.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the table footer.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Characters kept from a vehicle type that is neither BEV nor PHEV.
pub const TYPE_SHORT_MAX_CHARS: usize = 15;

/// Message rendered in place of an empty table.
pub const EMPTY_TABLE_MESSAGE: &str = "No data";

/// Text of every displayed column, in column order:
/// county, city, state, year, make, model, type, range.
fn column_texts(record: &VehicleRecord) -> [String; 8] {
    [
        record.county.clone(),
        record.city.clone(),
        record.state.clone(),
        record.model_year.to_string(),
        record.make.clone(),
        record.model.clone(),
        record.electric_vehicle_type.clone(),
        record.electric_range.to_string(),
    ]
}

/// A prepared search term, matched per column and case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Lowercased trimmed term; `None` when blank
    term_lower: Option<String>,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        let trimmed = term.trim();
        Self {
            term_lower: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.term_lower.is_none()
    }

    /// A blank query matches everything. Otherwise at least one column, on
    /// its own, must contain the term; text spanning two columns never matches.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        match &self.term_lower {
            None => true,
            Some(term_lower) => column_texts(record)
                .iter()
                .any(|text| contains_lowercase(text, term_lower)),
        }
    }
}

/// Case-insensitive free-text search across the displayed columns.
///
/// A blank term returns every record in order. See [`SearchQuery::matches`].
pub fn search<'a, I>(records: I, term: &str) -> Vec<&'a VehicleRecord>
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    let query = SearchQuery::new(term);
    records
        .into_iter()
        .filter(|record| query.matches(record))
        .collect()
}

/// One page of rows plus the size of the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub rows: &'a [T],
    pub total_count: usize,
}

/// Slice out zero-based page `page` of `page_size` items.
///
/// Pages past the end, and a zero page size, are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total_count = items.len();
    let start = page.saturating_mul(page_size);
    let rows = if page_size == 0 || start >= total_count {
        &items[0..0]
    } else {
        let end = start.saturating_add(page_size).min(total_count);
        &items[start..end]
    };
    Page { rows, total_count }
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Short label for the type column: "BEV", "PHEV", or the truncated text.
pub fn type_short(vehicle_type: &str) -> String {
    match VehicleKind::classify(vehicle_type) {
        VehicleKind::Bev => "BEV".to_string(),
        VehicleKind::Phev => "PHEV".to_string(),
        VehicleKind::Other => truncate_chars(vehicle_type, TYPE_SHORT_MAX_CHARS),
    }
}

/// Range cell text: the miles when reported, a dash otherwise.
pub fn range_display(electric_range: i32) -> String {
    if electric_range > 0 {
        electric_range.to_string()
    } else {
        PLACEHOLDER.to_string()
    }
}

/// A table row as the presentation layer renders it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Unique per row, even when a VIN repeats
    pub key: String,
    pub county: String,
    pub city: String,
    pub state: String,
    pub model_year: i32,
    pub make: String,
    pub model: String,
    pub vehicle_type: String,
    pub electric_range: String,
}

impl TableRow {
    /// Project `record`; `index` is its position in the searched sequence.
    pub fn from_record(record: &VehicleRecord, index: usize) -> Self {
        TableRow {
            key: format!("{}-{}-{}", record.vin, record.dol_vehicle_id, index),
            county: record.county.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            model_year: record.model_year,
            make: record.make.clone(),
            model: record.model.clone(),
            vehicle_type: type_short(&record.electric_vehicle_type),
            electric_range: range_display(record.electric_range),
        }
    }
}

/// Transient table UI state: search text and paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    search: String,
    page: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            page: 0,
            page_size,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// New search text; the match set changes, so paging restarts.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// New page size; page boundaries shift, so paging restarts.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page = 0;
    }

    /// Called when the upstream filtered set changes.
    pub fn reset_page(&mut self) {
        self.page = 0;
    }
}
