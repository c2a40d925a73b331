//! MacroLab Core: fetch named time series and outer-join them on date.
//!
//! This crate contains everything the two frontends share:
//! - Series domain types (observations, series, requests)
//! - The date outer-join that turns N series into one wide table
//! - Providers for FRED and Yahoo Finance behind one trait
//! - CSV export (string-first, so failures never leave partial files)
//! - The built-in series catalogs
//!
//! There is intentionally no retry, caching, pagination, or rate-limit
//! handling anywhere in this crate: each fetch is one HTTP request and
//! its outcome is reported as-is.

pub mod catalog;
pub mod export;
pub mod fetch;
pub mod fred;
pub mod merge;
pub mod provider;
pub mod series;
pub mod yahoo;

pub use fetch::{fetch_all, fetch_merged};
pub use fred::FredProvider;
pub use merge::{merge, MergedTable, Row};
pub use provider::{FetchError, SeriesProvider};
pub use series::{Observation, Series, SeriesRequest};
pub use yahoo::YahooProvider;
