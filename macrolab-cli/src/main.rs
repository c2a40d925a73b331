//! MacroLab CLI: fetch the three major US index closes into a CSV.
//!
//! Pulls daily closes for the Dow, S&P 500, and NASDAQ Composite from
//! Yahoo Finance over a date range, outer-joins them on date, derives a
//! percent-change column per index, and writes one CSV. The output file
//! is only created after every fetch succeeded.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use macrolab_core::catalog::MARKET_INDICES;
use macrolab_core::{
    export, fetch_all, merge, MergedTable, SeriesProvider, SeriesRequest, YahooProvider,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "macrolab",
    about = "Fetch DJIA, S&P 500, and NASDAQ daily closes into a CSV"
)]
struct Cli {
    /// Start date (YYYY-MM-DD).
    #[arg(long, default_value = "2024-01-01")]
    start: String,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Output CSV path.
    #[arg(long, default_value = "market_data.csv")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let provider = YahooProvider::new();
    run(&cli, &provider)
}

fn run(cli: &Cli, provider: &dyn SeriesProvider) -> Result<()> {
    let start = NaiveDate::parse_from_str(&cli.start, "%Y-%m-%d")?;
    let end = cli
        .end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let table = fetch_index_table(provider, start, end)?;
    export::write_csv(&table, &cli.out)?;

    println!("Saved to {}", cli.out.display());
    Ok(())
}

/// Fetch all three indices, rename the columns to their display names,
/// and join on date with percent-change columns interleaved.
fn fetch_index_table(
    provider: &dyn SeriesProvider,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<MergedTable> {
    let requests: Vec<SeriesRequest> = MARKET_INDICES
        .iter()
        .map(|ix| SeriesRequest::new(ix.symbol, start, end))
        .collect();

    let mut series = fetch_all(provider, &requests)?;
    for (s, ix) in series.iter_mut().zip(MARKET_INDICES.iter()) {
        s.id = ix.name.to_string();
    }

    Ok(merge(&series).with_percent_changes())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
