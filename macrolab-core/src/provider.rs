//! Provider trait and structured fetch errors.
//!
//! The SeriesProvider trait abstracts over remote sources (FRED, Yahoo
//! Finance) so the merge/export pipeline can be exercised against mocks.
//! There is deliberately no retry, backoff, or caching layer here: a
//! failed call is reported to the caller as-is.

use crate::series::Series;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for series fetching.
///
/// These are displayable in both the CLI and the dashboard.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("API key is required (set FRED_API_KEY or supply a key)")]
    MissingApiKey,

    #[error("API key rejected by the source: {0}")]
    KeyRejected(String),

    #[error("series identifier is empty")]
    EmptySeriesId,

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown series: {id}")]
    UnknownSeries { id: String },

    #[error("no observations for {id} in the requested range")]
    EmptyRange { id: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("fetch failed: {0}")]
    Other(String),
}

/// A source of named time series.
///
/// `fetch` returns observations for one identifier over an inclusive
/// date range, sorted the way the source returns them. Implementations
/// must not invent values: a date the source did not report is simply
/// absent from the result.
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of the backing source.
    fn name(&self) -> &str;

    /// Fetch one series. `start`/`end` are inclusive calendar dates.
    fn fetch(&self, id: &str, start: NaiveDate, end: NaiveDate) -> Result<Series, FetchError>;
}
