//! gapex
//!
//! A lightweight Rust library for querying Gapminder country-year data: the
//! filter-and-rank engine behind a demographic exploration dashboard. Pairs
//! with the `gapex` CLI.
//!
//! ### Features
//! - Load the processed Gapminder table from CSV (tidy, one row per
//!   country-year)
//! - Narrow it by any combination of region / sub-region / income group
//! - Select the top or bottom N countries by a statistic in a reference year
//! - Derive cascading dropdown options (region → sub-region)
//! - Quick per-country summary statistics (min, max, mean, median)
//!
//! ### Example
//! ```no_run
//! use gapex::models::{Direction, FilterSelection, RankRequest, Statistic};
//! use gapex::{query, storage};
//!
//! let data = storage::load_csv("data/processed/gapminder_processed.csv")?;
//! let sel = FilterSelection {
//!     region: Some("Asia".into()),
//!     ..Default::default()
//! };
//! let req = RankRequest::new(Statistic::LifeExpectancy, Direction::Top, 2015);
//! let rows = query::trend_view(&data, &sel, &req, 1968, 2015);
//! println!("{} rows for the trend chart", rows.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod models;
pub mod query;
pub mod stats;
pub mod storage;

pub use models::{Direction, FilterSelection, QueryError, RankRequest, Record, Statistic};
