//! FRED data provider.
//!
//! Fetches observations from the St. Louis Fed's series/observations
//! endpoint. FRED returns values as strings and uses "." for dates where
//! a series has no reading; those observations are dropped rather than
//! turned into zeros.

use crate::provider::{FetchError, SeriesProvider};
use crate::series::{Observation, Series};
use chrono::NaiveDate;
use serde::Deserialize;

const OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// FRED series/observations response.
#[derive(Debug, Deserialize)]
struct FredResponse {
    observations: Vec<FredObservation>,
}

#[derive(Debug, Deserialize)]
struct FredObservation {
    date: String,
    value: String,
}

/// FRED error body, returned with a non-2xx status.
#[derive(Debug, Deserialize)]
struct FredErrorResponse {
    error_code: i64,
    error_message: String,
}

/// FRED data provider. One HTTP request per series, no retries.
pub struct FredProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl FredProvider {
    /// Create a provider around an API key. The key is only validated for
    /// presence here; FRED itself rejects malformed or revoked keys.
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(FetchError::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            api_key,
        })
    }

    /// Parse a 2xx observations body into a series.
    fn parse_observations(id: &str, resp: FredResponse) -> Result<Series, FetchError> {
        let mut observations = Vec::with_capacity(resp.observations.len());
        for obs in resp.observations {
            // "." marks a date with no reading for this series
            if obs.value == "." {
                continue;
            }
            let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d").map_err(|e| {
                FetchError::ResponseFormat(format!("bad date '{}' for {id}: {e}", obs.date))
            })?;
            let value: f64 = obs.value.parse().map_err(|_| {
                FetchError::ResponseFormat(format!("bad value '{}' for {id}", obs.value))
            })?;
            observations.push(Observation::new(date, value));
        }

        if observations.is_empty() {
            return Err(FetchError::EmptyRange { id: id.to_string() });
        }

        Ok(Series::new(id, observations))
    }

    /// Map a non-2xx response to a structured error. FRED answers 400 for
    /// both bad keys and unknown series, so the message text decides.
    fn map_error(id: &str, status: reqwest::StatusCode, body: &str) -> FetchError {
        match serde_json::from_str::<FredErrorResponse>(body) {
            Ok(err) => {
                let message = err.error_message;
                if message.to_lowercase().contains("series does not exist") {
                    FetchError::UnknownSeries { id: id.to_string() }
                } else if message.contains("api_key") {
                    FetchError::KeyRejected(message)
                } else {
                    FetchError::Other(format!("FRED error {}: {}", err.error_code, message))
                }
            }
            Err(_) => FetchError::Other(format!("HTTP {status} from FRED for {id}")),
        }
    }
}

impl SeriesProvider for FredProvider {
    fn name(&self) -> &str {
        "fred"
    }

    fn fetch(&self, id: &str, start: NaiveDate, end: NaiveDate) -> Result<Series, FetchError> {
        let start = start.to_string();
        let end = end.to_string();
        let resp = self
            .client
            .get(OBSERVATIONS_URL)
            .query(&[
                ("series_id", id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", start.as_str()),
                ("observation_end", end.as_str()),
            ])
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(Self::map_error(id, status, &body));
        }

        let body: FredResponse = resp
            .json()
            .map_err(|e| FetchError::ResponseFormat(format!("bad FRED body for {id}: {e}")))?;

        Self::parse_observations(id, body)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
