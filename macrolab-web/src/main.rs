//! Dashboard server entry point.

use anyhow::Context;
use clap::Parser;
use macrolab_web::{app_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Parser, Debug)]
#[command(name = "macrolab-web", about = "Browser dashboard for FRED economic series")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// FRED API key. Falls back to FRED_API_KEY, then to per-request
    /// form input.
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macrolab_web=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let env_api_key = args
        .api_key
        .or_else(|| std::env::var("FRED_API_KEY").ok())
        .filter(|key| !key.trim().is_empty());
    match &env_api_key {
        Some(_) => tracing::info!("using the configured FRED API key"),
        None => tracing::info!("no FRED API key configured; the form will ask for one"),
    }

    let state = Arc::new(AppState::new(env_api_key));
    let app = app_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!("dashboard listening on http://{}", args.bind);

    axum::serve(listener, app)
        .await
        .context("server exited with an error")?;

    Ok(())
}
