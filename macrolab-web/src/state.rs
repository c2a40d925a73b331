//! Shared application state.
//!
//! Handlers never talk to FRED directly; they ask the state for a
//! provider built around the key the request resolved to. Router tests
//! swap the factory for one that returns a canned provider.

use macrolab_core::{FetchError, FredProvider, SeriesProvider};
use std::sync::Arc;

/// Builds the provider a request will fetch with.
pub type ProviderFactory =
    Arc<dyn Fn(String) -> Result<Arc<dyn SeriesProvider>, FetchError> + Send + Sync>;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Key from `--api-key` or `FRED_API_KEY`. A key typed into the form
    /// takes precedence per request.
    pub env_api_key: Option<String>,
    pub provider_factory: ProviderFactory,
}

impl AppState {
    /// Production state: requests fetch from FRED with the resolved key.
    pub fn new(env_api_key: Option<String>) -> Self {
        Self {
            env_api_key,
            provider_factory: Arc::new(fred_factory),
        }
    }

    /// State around a fixed provider, for router tests.
    pub fn with_provider(
        env_api_key: Option<String>,
        provider: Arc<dyn SeriesProvider>,
    ) -> Self {
        Self {
            env_api_key,
            provider_factory: Arc::new(move |_key| Ok(provider.clone())),
        }
    }

    /// The key a request should fetch with: the form field wins, then the
    /// environment. Blank form input does not shadow an environment key.
    pub fn resolve_key(&self, form_key: Option<&str>) -> Option<String> {
        form_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .or_else(|| self.env_api_key.clone())
    }
}

fn fred_factory(api_key: String) -> Result<Arc<dyn SeriesProvider>, FetchError> {
    Ok(Arc::new(FredProvider::new(api_key)?))
}
