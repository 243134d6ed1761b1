//! Chart data model (Functional Core)
//!
//! Everything in this module is pure: positionally-paired datasets as they
//! arrive from the voting server, multi-series chart data as the renderers
//! consume it, and the comparison merge that bridges the two. No I/O here;
//! the imperative shells (api, tui, serve) call into these functions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Errors for dataset construction and validation
#[derive(Debug, PartialEq)]
pub enum DatasetError {
    /// `labels` and `data` lengths disagree
    LengthMismatch { labels: usize, data: usize },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::LengthMismatch { labels, data } => {
                write!(f, "labels/data length mismatch: {} labels, {} values", labels, data)
            }
        }
    }
}

impl std::error::Error for DatasetError {}

pub type Result<T> = std::result::Result<T, DatasetError>;

// =============================================================================
// Wire Types - what the server sends
// =============================================================================

/// One positionally-paired dataset: `labels[i]` corresponds to `data[i]`.
///
/// This is the exact shape of the server's chart endpoints. No uniqueness or
/// ordering invariant beyond index correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartDataset {
    /// Build a dataset, rejecting mismatched lengths
    pub fn new(labels: Vec<String>, data: Vec<f64>) -> Result<Self> {
        if labels.len() != data.len() {
            return Err(DatasetError::LengthMismatch {
                labels: labels.len(),
                data: data.len(),
            });
        }
        Ok(Self { labels, data })
    }

    /// Validate a dataset that was deserialized from untrusted JSON
    pub fn validate(&self) -> Result<()> {
        if self.labels.len() != self.data.len() {
            return Err(DatasetError::LengthMismatch {
                labels: self.labels.len(),
                data: self.data.len(),
            });
        }
        Ok(())
    }

    /// An empty result set is a valid response, rendered as "no data"
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, value)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.data.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

// =============================================================================
// Render Types - what the charts consume
// =============================================================================

/// One named series of a multi-series chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
}

/// Multi-series chart data. Every series has exactly `labels.len()` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

impl ChartData {
    /// Wrap a single dataset as one named series
    pub fn single(series_label: impl Into<String>, dataset: ChartDataset) -> Self {
        Self {
            labels: dataset.labels,
            datasets: vec![Series {
                label: series_label.into(),
                data: dataset.data,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest value across all series, for axis scaling
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|s| s.data.iter().copied())
            .fold(0.0, f64::max)
    }
}

// =============================================================================
// Comparison Merge
// =============================================================================

/// Merge per-genre datasets into one multi-series chart.
///
/// The output label set is the union of all input label sets, sorted
/// alphabetically. Each input's values are re-projected onto the unified
/// ordering; labels missing from an input yield 0 in that series. If one
/// input repeats a label, the last value wins.
pub fn merge_comparison(inputs: &[(String, ChartDataset)]) -> ChartData {
    let union: BTreeSet<&str> = inputs
        .iter()
        .flat_map(|(_, ds)| ds.labels.iter().map(String::as_str))
        .collect();
    let labels: Vec<String> = union.iter().map(|l| l.to_string()).collect();

    let datasets = inputs
        .iter()
        .map(|(name, ds)| {
            let by_label: HashMap<&str, f64> = ds.pairs().collect();
            Series {
                label: name.clone(),
                data: labels
                    .iter()
                    .map(|l| by_label.get(l.as_str()).copied().unwrap_or(0.0))
                    .collect(),
            }
        })
        .collect();

    ChartData { labels, datasets }
}

// =============================================================================
// Period Filter
// =============================================================================

/// Time-range filter understood by the voting server's aggregation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::All, Period::Week, Period::Month, Period::Year];

    /// Query-string value
    pub fn as_str(self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Human-readable label for headers and tables
    pub fn label(self) -> &'static str {
        match self {
            Period::All => "All time",
            Period::Week => "Past week",
            Period::Month => "Past month",
            Period::Year => "Past year",
        }
    }

    /// Cycle to the next period (wraps around)
    pub fn next(self) -> Self {
        match self {
            Period::All => Period::Week,
            Period::Week => Period::Month,
            Period::Month => Period::Year,
            Period::Year => Period::All,
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Period::All),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period '{}' (expected all, week, month, or year)", other)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ds(pairs: &[(&str, f64)]) -> ChartDataset {
        ChartDataset {
            labels: pairs.iter().map(|(l, _)| l.to_string()).collect(),
            data: pairs.iter().map(|(_, v)| *v).collect(),
        }
    }

    // --- Dataset Tests ---

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = ChartDataset::new(vec!["a".into()], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, DatasetError::LengthMismatch { labels: 1, data: 2 });
    }

    #[test]
    fn test_validate_after_deserialize() {
        let ok: ChartDataset = serde_json::from_str(r#"{"labels":["a"],"data":[3]}"#).unwrap();
        assert!(ok.validate().is_ok());

        let bad: ChartDataset = serde_json::from_str(r#"{"labels":["a","b"],"data":[3]}"#).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let empty = ChartDataset::new(vec![], vec![]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.total(), 0.0);
    }

    #[test]
    fn test_pairs_and_total() {
        let d = ds(&[("Heat", 12.0), ("Alien", 7.0)]);
        let pairs: Vec<_> = d.pairs().collect();
        assert_eq!(pairs, vec![("Heat", 12.0), ("Alien", 7.0)]);
        assert_eq!(d.total(), 19.0);
    }

    // --- ChartData Tests ---

    #[test]
    fn test_single_series_length_matches_labels() {
        let data = ChartData::single("Votes", ds(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]));
        assert_eq!(data.labels.len(), 3);
        assert_eq!(data.datasets.len(), 1);
        assert_eq!(data.datasets[0].data.len(), data.labels.len());
        assert_eq!(data.datasets[0].label, "Votes");
    }

    #[test]
    fn test_max_value() {
        let data = merge_comparison(&[
            ("Horror".into(), ds(&[("a", 4.0)])),
            ("Drama".into(), ds(&[("b", 9.0)])),
        ]);
        assert_eq!(data.max_value(), 9.0);
    }

    // --- Comparison Merge Tests ---

    #[test]
    fn test_merge_union_is_sorted() {
        let merged = merge_comparison(&[
            ("Horror".into(), ds(&[("Zodiac", 3.0), ("Alien", 5.0)])),
            ("Drama".into(), ds(&[("Heat", 2.0)])),
        ]);
        assert_eq!(merged.labels, vec!["Alien", "Heat", "Zodiac"]);
    }

    #[test]
    fn test_merge_zero_fills_missing_labels() {
        let merged = merge_comparison(&[
            ("Horror".into(), ds(&[("Alien", 5.0)])),
            ("Drama".into(), ds(&[("Heat", 2.0)])),
        ]);
        let horror = &merged.datasets[0];
        let drama = &merged.datasets[1];
        // Union order: Alien, Heat
        assert_eq!(horror.data, vec![5.0, 0.0]);
        assert_eq!(drama.data, vec![0.0, 2.0]);
    }

    #[test]
    fn test_merge_one_series_per_input() {
        let merged = merge_comparison(&[
            ("A".into(), ds(&[("x", 1.0)])),
            ("B".into(), ds(&[("x", 2.0)])),
            ("C".into(), ds(&[("x", 3.0)])),
        ]);
        let names: Vec<_> = merged.datasets.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_merge_duplicate_label_last_wins() {
        let merged = merge_comparison(&[("G".into(), ds(&[("x", 1.0), ("x", 7.0)]))]);
        assert_eq!(merged.labels, vec!["x"]);
        assert_eq!(merged.datasets[0].data, vec![7.0]);
    }

    #[test]
    fn test_merge_empty_inputs() {
        let merged = merge_comparison(&[]);
        assert!(merged.is_empty());
        assert!(merged.datasets.is_empty());
    }

    // --- Period Tests ---

    #[test]
    fn test_period_round_trip() {
        for p in Period::ALL {
            assert_eq!(p.as_str().parse::<Period>().unwrap(), p);
        }
        assert!("quarter".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_cycle_wraps() {
        assert_eq!(Period::All.next(), Period::Week);
        assert_eq!(Period::Year.next(), Period::All);
    }
}
