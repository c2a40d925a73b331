//! Fetch-and-merge orchestration.
//!
//! This is the one operation both frontends share: fetch every requested
//! series from a provider, in request order, and outer-join the results
//! on date. The first failure aborts the whole batch, so callers never
//! see a partially assembled table.

use crate::merge::{merge, MergedTable};
use crate::provider::{FetchError, SeriesProvider};
use crate::series::{Series, SeriesRequest};

/// Fetch every requested series, failing on the first error.
///
/// All requests are validated before any network traffic, so a bad date
/// range or blank identifier is caught without spending a single call.
pub fn fetch_all(
    provider: &dyn SeriesProvider,
    requests: &[SeriesRequest],
) -> Result<Vec<Series>, FetchError> {
    for request in requests {
        request.validate()?;
    }
    requests
        .iter()
        .map(|r| provider.fetch(&r.id, r.start, r.end))
        .collect()
}

/// Fetch every requested series and outer-join them on date.
pub fn fetch_merged(
    provider: &dyn SeriesProvider,
    requests: &[SeriesRequest],
) -> Result<MergedTable, FetchError> {
    let series = fetch_all(provider, requests)?;
    Ok(merge(&series))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Observation;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Serves canned series and records which ids were asked for.
    struct CannedProvider {
        good: Vec<(&'static str, f64)>,
        calls: Mutex<Vec<String>>,
    }

    impl CannedProvider {
        fn new(good: Vec<(&'static str, f64)>) -> Self {
            Self {
                good,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SeriesProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn fetch(
            &self,
            id: &str,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Series, FetchError> {
            self.calls.lock().unwrap().push(id.to_string());
            match self.good.iter().find(|(good_id, _)| *good_id == id) {
                Some((_, value)) => {
                    Ok(Series::new(id, vec![Observation::new(start, *value)]))
                }
                None => Err(FetchError::UnknownSeries { id: id.to_string() }),
            }
        }
    }

    fn req(id: &str) -> SeriesRequest {
        SeriesRequest::new(id, d("2024-01-01"), d("2024-01-31"))
    }

    #[test]
    fn merged_columns_follow_request_order() {
        let provider = CannedProvider::new(vec![("FEDFUNDS", 5.33), ("UNRATE", 3.7)]);

        let table = fetch_merged(&provider, &[req("UNRATE"), req("FEDFUNDS")]).unwrap();

        assert_eq!(table.columns, vec!["UNRATE", "FEDFUNDS"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].values, vec![Some(3.7), Some(5.33)]);
    }

    #[test]
    fn first_failure_aborts_the_batch() {
        let provider = CannedProvider::new(vec![("UNRATE", 3.7), ("CPIAUCSL", 308.4)]);

        let err = fetch_merged(&provider, &[req("UNRATE"), req("NOPE"), req("CPIAUCSL")])
            .unwrap_err();

        assert!(matches!(err, FetchError::UnknownSeries { id } if id == "NOPE"));
        // The series after the failing one was never requested.
        assert_eq!(provider.calls(), vec!["UNRATE", "NOPE"]);
    }

    #[test]
    fn invalid_request_fails_before_any_call() {
        let provider = CannedProvider::new(vec![("UNRATE", 3.7)]);
        let bad = SeriesRequest::new("UNRATE", d("2024-02-01"), d("2024-01-01"));

        let err = fetch_all(&provider, &[req("UNRATE"), bad]).unwrap_err();

        assert!(matches!(err, FetchError::InvalidDateRange { .. }));
        assert!(provider.calls().is_empty());
    }

    #[test]
    fn no_requests_merge_to_an_empty_table() {
        let provider = CannedProvider::new(vec![]);
        let table = fetch_merged(&provider, &[]).unwrap();
        assert!(table.is_empty());
    }
}
