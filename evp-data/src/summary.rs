//! Summary statistics for KPI cards and charts.
//!
//! [`summarize`] folds a record sequence into a [`Summary`] in one pass.
//! Only records with a reported (positive) electric range take part in the
//! range average and the range histogram; everything else counts toward
//! totals and groupings as usual.

use evp_records::{VehicleKind, VehicleRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of makes kept in [`Summary::top_makes`].
pub const DEFAULT_TOP_MAKES: usize = 5;

/// Width in miles of each range histogram bucket.
pub const DEFAULT_BUCKET_WIDTH: u32 = 50;

/// Ranges at or above this many miles land in the overflow bucket.
pub const DEFAULT_BUCKET_LIMIT: u32 = 350;

/// Tunables for [`summarize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub top_makes: usize,
    /// A width of 0 falls back to [`DEFAULT_BUCKET_WIDTH`]
    pub bucket_width: u32,
    pub bucket_limit: u32,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            top_makes: DEFAULT_TOP_MAKES,
            bucket_width: DEFAULT_BUCKET_WIDTH,
            bucket_limit: DEFAULT_BUCKET_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MakeCount {
    pub make: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub count: usize,
}

/// One histogram bin covering `[min, max)` miles.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RangeBucket {
    pub label: String,
    pub min: u32,
    /// `None` for the open-ended overflow bucket
    pub max: Option<u32>,
    pub count: usize,
}

/// Aggregates behind the KPI grid and the four dashboard charts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub bev_count: usize,
    pub phev_count: usize,
    /// Whole-mile mean of reported ranges; `None` when no range was reported
    pub avg_electric_range: Option<u32>,
    pub by_year: Vec<YearCount>,
    pub top_makes: Vec<MakeCount>,
    pub by_type: Vec<TypeCount>,
    pub range_buckets: Vec<RangeBucket>,
}

impl Summary {
    /// The summary of no records.
    pub fn empty(options: &SummaryOptions) -> Self {
        summarize_with(std::iter::empty(), options)
    }
}

/// Build the empty histogram for the given options.
///
/// The bins depend only on the options, so every dataset yields the same
/// shape: `0-50`, `50-100`, ..., then `350+`.
pub fn range_buckets(options: &SummaryOptions) -> Vec<RangeBucket> {
    let width = bucket_width(options);
    let limit = options.bucket_limit;

    let mut buckets: Vec<RangeBucket> = (0..limit)
        .step_by(width as usize)
        .map(|min| {
            let max = min.saturating_add(width).min(limit);
            RangeBucket {
                label: format!("{min}-{max}"),
                min,
                max: Some(max),
                count: 0,
            }
        })
        .collect();
    buckets.push(RangeBucket {
        label: format!("{limit}+"),
        min: limit,
        max: None,
        count: 0,
    });
    buckets
}

fn bucket_width(options: &SummaryOptions) -> u32 {
    if options.bucket_width == 0 {
        DEFAULT_BUCKET_WIDTH
    } else {
        options.bucket_width
    }
}

/// Index of the bucket holding `miles`. Regular bins all start on a multiple
/// of the width, so the division lands on the right one.
fn bucket_index(miles: u32, width: u32, limit: u32, overflow: usize) -> usize {
    if miles >= limit {
        overflow
    } else {
        (miles / width) as usize
    }
}

/// Summarize with the default options.
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    summarize_with(records, &SummaryOptions::default())
}

pub fn summarize_with<'a, I>(records: I, options: &SummaryOptions) -> Summary
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    let mut buckets = range_buckets(options);
    let overflow = buckets.len() - 1;
    let width = bucket_width(options);

    let mut total = 0usize;
    let mut bev_count = 0usize;
    let mut phev_count = 0usize;
    let mut range_sum = 0u64;
    let mut range_n = 0u64;
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    let mut makes: HashMap<&str, usize> = HashMap::new();
    let mut types: HashMap<&str, usize> = HashMap::new();

    for record in records {
        total += 1;
        match record.kind() {
            VehicleKind::Bev => bev_count += 1,
            VehicleKind::Phev => phev_count += 1,
            VehicleKind::Other => {}
        }
        if let Some(miles) = record.reported_range() {
            range_sum += u64::from(miles);
            range_n += 1;
            buckets[bucket_index(miles, width, options.bucket_limit, overflow)].count += 1;
        }
        *years.entry(record.model_year).or_default() += 1;
        *makes.entry(record.make.as_str()).or_default() += 1;
        *types.entry(record.electric_vehicle_type.as_str()).or_default() += 1;
    }

    let avg_electric_range = if range_n > 0 {
        Some((range_sum as f64 / range_n as f64).round() as u32)
    } else {
        None
    };

    let by_year = years
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();

    let mut top_makes: Vec<MakeCount> = makes
        .into_iter()
        .map(|(make, count)| MakeCount {
            make: make.to_string(),
            count,
        })
        .collect();
    top_makes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.make.cmp(&b.make)));
    top_makes.truncate(options.top_makes);

    let mut by_type: Vec<TypeCount> = types
        .into_iter()
        .map(|(vehicle_type, count)| TypeCount {
            vehicle_type: vehicle_type.to_string(),
            count,
        })
        .collect();
    by_type.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.vehicle_type.cmp(&b.vehicle_type))
    });

    log::debug!(
        "[EVP] summary: {} records, {} with reported range",
        total,
        range_n
    );

    Summary {
        total,
        bev_count,
        phev_count,
        avg_electric_range,
        by_year,
        top_makes,
        by_type,
        range_buckets: buckets,
    }
}
