//! Browser dashboard for FRED economic series.
//!
//! A small axum app: pick series codes from a catalog (or type extra
//! ones), choose a date range, and get back one wide table merged on
//! date, a line chart of the first series, and a CSV download of the
//! same table.
//!
//! - [`state`]: shared state and the provider factory
//! - [`routes`]: handlers and the router
//! - [`view`]: server-rendered HTML

pub mod routes;
pub mod state;
pub mod view;

pub use routes::{app_router, FetchParams};
pub use state::AppState;
