//! Chart payloads built from a [`Summary`].
//!
//! Each chart is a title plus the points the charting library plots. An
//! empty chart carries [`NO_DATA`] so the presentation layer can show a
//! placeholder instead of blank axes.

use evp_data::summary::{MakeCount, RangeBucket, Summary, TypeCount, YearCount};
use evp_records::VehicleKind;
use evp_utils::text::truncate_chars;
use serde::Serialize;

/// Placeholder text for an empty chart or table.
pub const NO_DATA: &str = "No data";

/// Characters of an unrecognized vehicle type kept as a pie slice name.
pub const PIE_LABEL_MAX_CHARS: usize = 12;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chart<T> {
    pub title: &'static str,
    pub points: Vec<T>,
    /// Set when there is nothing to plot
    pub empty_message: Option<&'static str>,
}

impl<T> Chart<T> {
    fn new(title: &'static str, points: Vec<T>, is_empty: bool) -> Self {
        Chart {
            title,
            points,
            empty_message: is_empty.then_some(NO_DATA),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty_message.is_some()
    }
}

/// Year axis point; the year is text so the axis treats it as a category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct YearPoint {
    pub year: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MakeBar {
    pub make: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeSlice {
    /// Short legend label
    pub name: String,
    pub value: usize,
    /// Untruncated type text for the tooltip
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RangeBar {
    pub label: String,
    pub count: usize,
    /// Tooltip text, e.g. `50-100 mi`
    pub range: String,
}

/// All four dashboard charts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    pub vehicles_by_year: Chart<YearPoint>,
    pub top_makes: Chart<MakeBar>,
    pub vehicle_types: Chart<TypeSlice>,
    pub range_distribution: Chart<RangeBar>,
}

/// Pie legend label: "BEV", "PHEV", or the first few characters.
pub fn pie_label(vehicle_type: &str) -> String {
    match VehicleKind::classify(vehicle_type) {
        VehicleKind::Bev => "BEV".to_string(),
        VehicleKind::Phev => "PHEV".to_string(),
        VehicleKind::Other => truncate_chars(vehicle_type, PIE_LABEL_MAX_CHARS),
    }
}

fn range_text(bucket: &RangeBucket) -> String {
    match bucket.max {
        Some(max) => format!("{}-{} mi", bucket.min, max),
        None => format!("{}+ mi", bucket.min),
    }
}

pub fn year_chart(by_year: &[YearCount]) -> Chart<YearPoint> {
    let points = by_year
        .iter()
        .map(|y| YearPoint {
            year: y.year.to_string(),
            count: y.count,
        })
        .collect::<Vec<_>>();
    let is_empty = points.is_empty();
    Chart::new("Vehicles by model year", points, is_empty)
}

pub fn make_chart(top_makes: &[MakeCount]) -> Chart<MakeBar> {
    let points = top_makes
        .iter()
        .map(|m| MakeBar {
            make: m.make.clone(),
            count: m.count,
        })
        .collect::<Vec<_>>();
    let is_empty = points.is_empty();
    Chart::new("Top makes", points, is_empty)
}

pub fn type_chart(by_type: &[TypeCount]) -> Chart<TypeSlice> {
    let points = by_type
        .iter()
        .map(|t| TypeSlice {
            name: pie_label(&t.vehicle_type),
            value: t.count,
            full_name: t.vehicle_type.clone(),
        })
        .collect::<Vec<_>>();
    let is_empty = points.is_empty();
    Chart::new("Vehicle type", points, is_empty)
}

/// The histogram keeps every bin, so it is empty only when no bin has a count.
pub fn range_chart(buckets: &[RangeBucket]) -> Chart<RangeBar> {
    let is_empty = buckets.iter().all(|b| b.count == 0);
    let points = buckets
        .iter()
        .map(|b| RangeBar {
            label: b.label.clone(),
            count: b.count,
            range: range_text(b),
        })
        .collect();
    Chart::new("Electric range distribution (miles)", points, is_empty)
}

pub fn chart_set(summary: &Summary) -> ChartSet {
    ChartSet {
        vehicles_by_year: year_chart(&summary.by_year),
        top_makes: make_chart(&summary.top_makes),
        vehicle_types: type_chart(&summary.by_type),
        range_distribution: range_chart(&summary.range_buckets),
    }
}
