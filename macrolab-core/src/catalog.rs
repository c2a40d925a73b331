//! Built-in series catalogs.
//!
//! The dashboard offers a curated set of FRED series; the CLI always
//! pulls the same three index closes. Anything not listed here can still
//! be fetched by typing its FRED code into the dashboard's free-text
//! field, so this is a convenience list, not an allowlist.

/// One curated FRED series for the dashboard picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub description: &'static str,
    /// Checked by default on a fresh dashboard.
    pub preselected: bool,
}

/// Curated FRED series, in display order.
pub const FRED_SERIES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "UNRATE",
        description: "Civilian unemployment rate",
        preselected: true,
    },
    CatalogEntry {
        id: "UMCSENT",
        description: "University of Michigan consumer sentiment",
        preselected: true,
    },
    CatalogEntry {
        id: "FEDFUNDS",
        description: "Effective federal funds rate",
        preselected: true,
    },
    CatalogEntry {
        id: "CPIAUCSL",
        description: "Consumer price index, all urban consumers",
        preselected: true,
    },
    CatalogEntry {
        id: "GDP",
        description: "Gross domestic product",
        preselected: false,
    },
    CatalogEntry {
        id: "GDPC1",
        description: "Real gross domestic product",
        preselected: false,
    },
    CatalogEntry {
        id: "PCE",
        description: "Personal consumption expenditures",
        preselected: false,
    },
    CatalogEntry {
        id: "PCEDG",
        description: "Personal consumption: durable goods",
        preselected: false,
    },
    CatalogEntry {
        id: "PSAVERT",
        description: "Personal saving rate",
        preselected: false,
    },
    CatalogEntry {
        id: "M2SL",
        description: "M2 money stock",
        preselected: false,
    },
    CatalogEntry {
        id: "M1SL",
        description: "M1 money stock",
        preselected: false,
    },
    CatalogEntry {
        id: "DGS10",
        description: "10-year treasury constant maturity yield",
        preselected: false,
    },
    CatalogEntry {
        id: "DGS2",
        description: "2-year treasury constant maturity yield",
        preselected: false,
    },
    CatalogEntry {
        id: "T10Y2Y",
        description: "10-year minus 2-year treasury spread",
        preselected: false,
    },
    CatalogEntry {
        id: "RECPROUSM156N",
        description: "Smoothed recession probability",
        preselected: false,
    },
    CatalogEntry {
        id: "WALCL",
        description: "Federal Reserve total assets",
        preselected: false,
    },
];

/// Ids of the series checked by default on a fresh dashboard.
pub fn default_fred_ids() -> Vec<&'static str> {
    FRED_SERIES
        .iter()
        .filter(|e| e.preselected)
        .map(|e| e.id)
        .collect()
}

/// Description of a curated series, if it is in the catalog.
pub fn describe(id: &str) -> Option<&'static str> {
    FRED_SERIES
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.description)
}

/// A Yahoo index symbol and the column name it is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketIndex {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// The three index closes the CLI always fetches, in column order.
pub const MARKET_INDICES: [MarketIndex; 3] = [
    MarketIndex {
        symbol: "^DJI",
        name: "DJIA",
    },
    MarketIndex {
        symbol: "^GSPC",
        name: "SP500",
    },
    MarketIndex {
        symbol: "^IXIC",
        name: "NASDAQ",
    },
];
