//! Filter bar state, record matching and dropdown options.

use evp_records::VehicleRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The filter bar's current selections. `None` means "All" (no constraint).
///
/// States are values: mutators return a new state and leave the old one as
/// it was, so a snapshot handed to the presentation layer never changes
/// underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A single-field update: which field, and its new selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Year(Option<i32>),
    Make(Option<String>),
    Model(Option<String>),
    VehicleType(Option<String>),
    County(Option<String>),
    City(Option<String>),
    State(Option<String>),
}

/// An empty or blank selection is the "All" choice.
fn selection(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn text_matches(selected: &Option<String>, value: &str) -> bool {
    selected.as_deref().map_or(true, |selected| selected == value)
}

impl FilterState {
    /// Return a copy with one field replaced.
    pub fn with(&self, filter: Filter) -> FilterState {
        let mut next = self.clone();
        match filter {
            Filter::Year(year) => next.year = year,
            Filter::Make(v) => next.make = selection(v),
            Filter::Model(v) => next.model = selection(v),
            Filter::VehicleType(v) => next.vehicle_type = selection(v),
            Filter::County(v) => next.county = selection(v),
            Filter::City(v) => next.city = selection(v),
            Filter::State(v) => next.state = selection(v),
        }
        next
    }

    /// Number of fields with a selection.
    pub fn active_count(&self) -> usize {
        [
            self.year.is_some(),
            self.make.is_some(),
            self.model.is_some(),
            self.vehicle_type.is_some(),
            self.county.is_some(),
            self.city.is_some(),
            self.state.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }

    /// True when `record` satisfies every selected field.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        self.year.map_or(true, |year| year == record.model_year)
            && text_matches(&self.make, &record.make)
            && text_matches(&self.model, &record.model)
            && text_matches(&self.vehicle_type, &record.electric_vehicle_type)
            && text_matches(&self.county, &record.county)
            && text_matches(&self.city, &record.city)
            && text_matches(&self.state, &record.state)
    }
}

/// A fresh state with every field unset.
pub fn clear_filters() -> FilterState {
    FilterState::default()
}

/// Keep the records matching every selected field, in their original order.
pub fn apply_filters<'a, I>(records: I, filters: &FilterState) -> Vec<&'a VehicleRecord>
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    records
        .into_iter()
        .filter(|record| filters.matches(record))
        .collect()
}

/// Distinct values per field, sorted, for populating the filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub types: Vec<String>,
    pub counties: Vec<String>,
    pub cities: Vec<String>,
    pub states: Vec<String>,
}

fn insert_text<'a>(set: &mut BTreeSet<&'a str>, value: &'a str) {
    if !value.is_empty() {
        set.insert(value);
    }
}

fn into_owned(set: BTreeSet<&str>) -> Vec<String> {
    set.into_iter().map(str::to_string).collect()
}

/// Collect the options from the full, unfiltered dataset.
///
/// Always pass the full record set: options must not shrink as filters are
/// applied, or selecting one field would hide other fields' choices.
pub fn compute_filter_options<'a, I>(records: I) -> FilterOptions
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    let mut years = BTreeSet::new();
    let mut makes = BTreeSet::new();
    let mut models = BTreeSet::new();
    let mut types = BTreeSet::new();
    let mut counties = BTreeSet::new();
    let mut cities = BTreeSet::new();
    let mut states = BTreeSet::new();

    for record in records {
        years.insert(record.model_year);
        insert_text(&mut makes, &record.make);
        insert_text(&mut models, &record.model);
        insert_text(&mut types, &record.electric_vehicle_type);
        insert_text(&mut counties, &record.county);
        insert_text(&mut cities, &record.city);
        insert_text(&mut states, &record.state);
    }

    FilterOptions {
        years: years.into_iter().collect(),
        makes: into_owned(makes),
        models: into_owned(models),
        types: into_owned(types),
        counties: into_owned(counties),
        cities: into_owned(cities),
        states: into_owned(states),
    }
}
