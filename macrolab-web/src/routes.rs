//! HTTP routes for the dashboard.
//!
//! Everything is a GET so a results page can be bookmarked and its
//! export link re-fetched. The blocking FRED client runs on the tokio
//! blocking pool; handlers themselves never touch the network.

use crate::state::AppState;
use crate::view;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use macrolab_core::provider::FetchError;
use macrolab_core::{export, fetch_merged, MergedTable, SeriesRequest};
use std::collections::HashSet;
use std::sync::Arc;

/// Assemble the dashboard router around shared state.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/fetch", get(fetch_page))
        .route("/export.csv", get(export_csv))
        .route("/health", get(health))
        .with_state(state)
}

/// Everything the dashboard form can send. Repeated `series` keys and the
/// free-text `extra` field accumulate into one identifier list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub series: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// A key typed into the form, never the environment key.
    pub key: Option<String>,
    pub filename: String,
}

impl FetchParams {
    /// Start-of-range default for a fresh dashboard.
    pub fn default_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    /// Parse raw query pairs. Unknown keys are ignored, blank dates fall
    /// back to the defaults, and duplicate identifiers collapse to the
    /// first occurrence.
    pub fn from_pairs(pairs: &[(String, String)], today: NaiveDate) -> Result<Self, String> {
        let mut series = Vec::new();
        let mut start = Self::default_start();
        let mut end = today;
        let mut key = None;
        let mut filename = "econ_data.csv".to_string();

        for (name, value) in pairs {
            match name.as_str() {
                "series" => series.push(value.trim().to_string()),
                "extra" => {
                    series.extend(value.split(',').map(|id| id.trim().to_string()));
                }
                "start" if !value.trim().is_empty() => start = parse_date(value)?,
                "end" if !value.trim().is_empty() => end = parse_date(value)?,
                "key" if !value.trim().is_empty() => key = Some(value.trim().to_string()),
                "filename" => filename = value.clone(),
                _ => {}
            }
        }

        series.retain(|id| !id.is_empty());
        let mut seen = HashSet::new();
        series.retain(|id| seen.insert(id.clone()));

        Ok(Self {
            series,
            start,
            end,
            key,
            filename: view::ensure_csv_name(&filename),
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value.trim()))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Why a query produced no table.
enum QueryError {
    /// Missing input; rendered as a notice rather than an error.
    Notice(&'static str),
    Fetch(FetchError),
}

/// Resolve the key, then build the provider and fetch-and-merge on the
/// blocking pool.
async fn run_query(state: &AppState, params: &FetchParams) -> Result<MergedTable, QueryError> {
    if params.series.is_empty() {
        return Err(QueryError::Notice("Select at least one series."));
    }
    let key = state.resolve_key(params.key.as_deref()).ok_or(QueryError::Notice(
        "A FRED API key is required. Enter one in the form or set FRED_API_KEY.",
    ))?;

    let requests: Vec<SeriesRequest> = params
        .series
        .iter()
        .map(|id| SeriesRequest::new(id.clone(), params.start, params.end))
        .collect();

    tracing::info!(series = requests.len(), start = %params.start, end = %params.end, "fetching");
    // The factory constructs a blocking reqwest client, which must not be
    // created or dropped on an async worker, so it runs on the blocking
    // pool together with the fetches.
    let factory = state.provider_factory.clone();
    tokio::task::spawn_blocking(move || {
        let provider = factory(key)?;
        fetch_merged(provider.as_ref(), &requests)
    })
    .await
    .map_err(|_| QueryError::Fetch(FetchError::Other("fetch task died".into())))?
    .map_err(QueryError::Fetch)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(view::index_page(state.env_api_key.is_some(), today()))
}

async fn fetch_page(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String> {
    let params = match FetchParams::from_pairs(&pairs, today()) {
        Ok(params) => params,
        Err(message) => return Html(view::error_page(&message)),
    };

    match run_query(&state, &params).await {
        Ok(table) => Html(view::results_page(&params, &table)),
        Err(QueryError::Notice(message)) => Html(view::notice_page(message)),
        Err(QueryError::Fetch(err)) => {
            tracing::warn!(error = %err, "fetch failed");
            Html(view::error_page(&err.to_string()))
        }
    }
}

async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = match FetchParams::from_pairs(&pairs, today()) {
        Ok(params) => params,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let table = match run_query(&state, &params).await {
        Ok(table) => table,
        Err(QueryError::Notice(message)) => {
            return (StatusCode::BAD_REQUEST, message.to_string()).into_response();
        }
        Err(QueryError::Fetch(err)) => {
            tracing::warn!(error = %err, "export failed");
            return (StatusCode::BAD_GATEWAY, err.to_string()).into_response();
        }
    };

    match export::to_csv(&table) {
        Ok(csv) => {
            let headers = [
                (
                    header::CONTENT_TYPE,
                    "text/csv; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", params.filename),
                ),
            ];
            (headers, csv).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn health() -> &'static str {
    "ok"
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
