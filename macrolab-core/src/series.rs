//! Time series domain types.
//!
//! A [`Series`] is a named list of dated observations as returned by a
//! provider. Observations are kept exactly as fetched: no resampling,
//! no fill, no derived values.

use crate::provider::FetchError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A named time series fetched from an external source.
///
/// `id` is whatever the caller wants to see as the column header after a
/// merge: the provider code for dashboard series, or a display name the
/// caller substituted after fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn new(id: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            id: id.into(),
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// A request for one remote series over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeriesRequest {
    pub fn new(id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Reject requests that no provider could serve. Called by
    /// [`crate::fetch::fetch_all`] before any network traffic.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.id.trim().is_empty() {
            return Err(FetchError::EmptySeriesId);
        }
        if self.start > self.end {
            return Err(FetchError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn validate_accepts_single_day_range() {
        let req = SeriesRequest::new("UNRATE", d("2024-01-02"), d("2024-01-02"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_id() {
        let req = SeriesRequest::new("  ", d("2024-01-01"), d("2024-01-31"));
        assert!(matches!(req.validate(), Err(FetchError::EmptySeriesId)));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let req = SeriesRequest::new("UNRATE", d("2024-02-01"), d("2024-01-01"));
        assert!(matches!(
            req.validate(),
            Err(FetchError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn series_len_and_empty() {
        let s = Series::new("CPIAUCSL", vec![Observation::new(d("2024-01-01"), 308.417)]);
        assert_eq!(s.len(), 1);
        assert!(!s.is_empty());
        assert!(Series::new("CPIAUCSL", vec![]).is_empty());
    }
}
