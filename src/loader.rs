//! Chart loading state machine
//!
//! Drives the fetch → render cycle for a chart pane: show the loading
//! placeholder, fetch, then install exactly one chart, or an informational
//! "no data" state, or an error state. Each request carries a generation
//! token; a completion with a stale token is discarded, so a rapid selection
//! change can never be overwritten by an earlier in-flight response.

use crate::api::ApiClient;
use crate::chart::{Chart, ChartKind, ChartSlot};
use crate::dataset::{ChartData, Period};

/// What a finished fetch produced
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Data arrived and a chart was built from it
    Ready(Chart),
    /// The server answered with an empty result set: informational, not an error
    Empty,
    /// Transport, HTTP, or payload failure
    Failed(String),
}

/// Display state of a chart pane
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The slot holds a live chart
    Ready,
    /// Empty result set placeholder
    Empty,
    /// Error placeholder with the underlying message
    Failed(String),
}

/// Token tying a completion to the request that started it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Owns the chart slot and the request generation counter for one pane
#[derive(Debug, Default)]
pub struct ChartLoader {
    slot: ChartSlot,
    state: LoadState,
    generation: u64,
}

impl ChartLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request: bumps the generation (invalidating any in-flight
    /// completion) and switches the pane to the loading placeholder.
    pub fn begin(&mut self) -> LoadToken {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadToken(self.generation)
    }

    /// Apply a finished fetch. Returns false (and changes nothing) when the
    /// token is stale, meaning a newer request has been issued since.
    pub fn complete(&mut self, token: LoadToken, outcome: LoadOutcome) -> bool {
        if token.0 != self.generation {
            return false;
        }
        match outcome {
            LoadOutcome::Ready(chart) => {
                self.slot.install(chart);
                self.state = LoadState::Ready;
            }
            LoadOutcome::Empty => {
                self.slot.clear();
                self.state = LoadState::Empty;
            }
            LoadOutcome::Failed(message) => {
                self.slot.clear();
                self.state = LoadState::Failed(message);
            }
        }
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.slot.get()
    }
}

// =============================================================================
// Fetch → Outcome mapping
// =============================================================================

/// Bar chart of top films for one genre
pub fn fetch_genre_outcome(client: &ApiClient, genre: &str, period: Period) -> LoadOutcome {
    match client.fetch_genre_chart(genre, period) {
        Ok(ds) if ds.is_empty() => LoadOutcome::Empty,
        Ok(ds) => LoadOutcome::Ready(Chart::new(
            ChartKind::Bar,
            format!("Top {} Films by Votes", genre),
            ChartData::single("Number of Votes", ds),
        )),
        Err(e) => LoadOutcome::Failed(e.to_string()),
    }
}

/// Pie chart of vote share across genres (no genre selected)
pub fn fetch_distribution_outcome(client: &ApiClient, period: Period) -> LoadOutcome {
    match client.fetch_distribution(period) {
        Ok(ds) if ds.is_empty() => LoadOutcome::Empty,
        Ok(ds) => LoadOutcome::Ready(Chart::new(
            ChartKind::Pie,
            "Genre Distribution by Votes",
            ChartData::single("Votes", ds),
        )),
        Err(e) => LoadOutcome::Failed(e.to_string()),
    }
}

/// Grouped bars across the selected genres, one series per genre
pub fn fetch_comparison_outcome(
    client: &ApiClient,
    genres: &[String],
    period: Period,
) -> LoadOutcome {
    match client.fetch_comparison(genres, period) {
        Ok(data) if data.is_empty() => LoadOutcome::Empty,
        Ok(data) => LoadOutcome::Ready(Chart::new(
            ChartKind::GroupedBar,
            "Genre Comparison by Votes",
            data,
        )),
        Err(e) => LoadOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ChartDataset;

    fn ready(title: &str) -> LoadOutcome {
        let ds = ChartDataset::new(vec!["a".into()], vec![1.0]).unwrap();
        LoadOutcome::Ready(Chart::new(
            ChartKind::Bar,
            title,
            ChartData::single("Votes", ds),
        ))
    }

    #[test]
    fn test_begin_shows_loading() {
        let mut loader = ChartLoader::new();
        assert_eq!(*loader.state(), LoadState::Idle);
        loader.begin();
        assert_eq!(*loader.state(), LoadState::Loading);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut loader = ChartLoader::new();
        let first = loader.begin();
        let second = loader.begin();

        // The first request finishes late: it must not overwrite anything
        assert!(!loader.complete(first, ready("stale")));
        assert_eq!(*loader.state(), LoadState::Loading);
        assert!(loader.chart().is_none());

        assert!(loader.complete(second, ready("current")));
        assert_eq!(loader.chart().unwrap().title, "current");
    }

    #[test]
    fn test_consecutive_loads_leave_one_chart() {
        let mut loader = ChartLoader::new();
        let t1 = loader.begin();
        loader.complete(t1, ready("first"));
        let t2 = loader.begin();
        loader.complete(t2, ready("second"));

        assert_eq!(*loader.state(), LoadState::Ready);
        assert_eq!(loader.chart().unwrap().title, "second");
    }

    #[test]
    fn test_empty_outcome_clears_chart() {
        let mut loader = ChartLoader::new();
        let t1 = loader.begin();
        loader.complete(t1, ready("first"));

        let t2 = loader.begin();
        loader.complete(t2, LoadOutcome::Empty);
        assert_eq!(*loader.state(), LoadState::Empty);
        assert!(loader.chart().is_none());
    }

    #[test]
    fn test_failed_outcome_keeps_message() {
        let mut loader = ChartLoader::new();
        let token = loader.begin();
        loader.complete(token, LoadOutcome::Failed("server returned HTTP 500".into()));
        assert_eq!(
            *loader.state(),
            LoadState::Failed("server returned HTTP 500".into())
        );
        assert!(loader.chart().is_none());
    }
}
