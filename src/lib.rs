//! Cinecharts - genre voting analytics for film nights
//!
//! Fetch pre-aggregated vote data from a movie-voting server, chart it in the
//! terminal or the browser, compare genres side by side, and export the
//! result as PNG, CSV, or JSON.
//!
//! # Overview
//!
//! The voting server exposes two endpoints of positionally-paired
//! `{labels, data}` JSON: top films by votes for a genre, and the vote
//! distribution across genres. Cinecharts turns those into bar and pie
//! charts, builds ad-hoc multi-genre comparisons (sorted label union,
//! missing entries filled with zero), and serializes any chart to disk.
//!
//! # Quick Start
//!
//! ```no_run
//! use cinecharts::api::ApiClient;
//! use cinecharts::dataset::Period;
//! use std::time::Duration;
//!
//! let client = ApiClient::new("http://localhost:8000", Duration::from_secs(10)).unwrap();
//!
//! // Top Horror films this month
//! let top = client.fetch_genre_chart("Horror", Period::Month).unwrap();
//! println!("{} films", top.labels.len());
//!
//! // Horror vs Drama, one series per genre over the unified label set
//! let comparison = client
//!     .fetch_comparison(&["Horror".into(), "Drama".into()], Period::Month)
//!     .unwrap();
//! assert!(comparison.datasets.len() == 2);
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod export;
pub mod loader;
pub mod serve;
pub mod tui;

pub use api::{ApiClient, ApiError};
pub use chart::{series_color, Chart, ChartKind, ChartSlot};
pub use config::Config;
pub use dataset::{merge_comparison, ChartData, ChartDataset, Period, Series};
pub use export::{export_chart, from_csv, from_json, to_csv, to_json, ExportFormat};
pub use loader::{ChartLoader, LoadOutcome, LoadState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify core types are re-exported from crate root
        let _ = Period::All;
        let _ = ChartKind::Bar;
    }
}
