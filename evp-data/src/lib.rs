//! Data processing for EV registration records.
//!
//! This crate turns the raw record sequence into the forms the dashboard
//! needs. Everything here is a pure function of its inputs:
//!
//! - `summary`: KPI totals and chart-ready aggregates
//! - `filter`: the filter bar's state, matching and option lists
//! - `table`: free-text search, paging and per-cell display text

pub mod filter;
pub mod summary;
pub mod table;
