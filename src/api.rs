//! Client for the voting server's chart endpoints
//!
//! Two GET endpoints supply pre-aggregated `{labels, data}` JSON:
//! `/api/charts/data/` (top films by votes for a genre) and
//! `/api/genres/data/` (vote distribution across genres). The client is
//! blocking; comparison fans out one scoped thread per genre and joins
//! all-or-nothing.

use crate::dataset::{merge_comparison, ChartData, ChartDataset, Period};
use std::time::Duration;

/// Error type for server API operations
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, TLS)
    Transport(reqwest::Error),
    /// Server answered with a non-success status
    Status { code: u16 },
    /// Body was not the expected `{labels, data}` shape
    Malformed { message: String },
    /// A comparison sub-fetch failed; the whole operation is abandoned
    Comparison {
        genre: String,
        source: Box<ApiError>,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "request failed: {}", e),
            ApiError::Status { code } => write!(f, "server returned HTTP {}", code),
            ApiError::Malformed { message } => write!(f, "malformed chart payload: {}", message),
            ApiError::Comparison { genre, source } => {
                write!(f, "comparison fetch for '{}' failed: {}", genre, source)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Blocking client for the voting server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Build a client for `base_url` (scheme + host, optional port)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("cinecharts/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Top films by votes for one genre and period
    pub fn fetch_genre_chart(&self, genre: &str, period: Period) -> Result<ChartDataset> {
        self.get_dataset(
            "/api/charts/data/",
            &[("genre", genre), ("period", period.as_str())],
        )
    }

    /// Vote counts per genre for a period (the pie chart source). Its labels
    /// double as the vocabulary of selectable genres.
    pub fn fetch_distribution(&self, period: Period) -> Result<ChartDataset> {
        self.get_dataset("/api/genres/data/", &[("period", period.as_str())])
    }

    /// Fetch one dataset per genre concurrently and merge into a comparison.
    ///
    /// All-or-nothing: the first failing sub-fetch fails the whole operation
    /// and no partial result is returned. Series order follows `genres`.
    pub fn fetch_comparison(&self, genres: &[String], period: Period) -> Result<ChartData> {
        let fetched: Vec<Result<(String, ChartDataset)>> = std::thread::scope(|scope| {
            let handles: Vec<_> = genres
                .iter()
                .map(|genre| {
                    scope.spawn(move || {
                        self.fetch_genre_chart(genre, period)
                            .map(|ds| (genre.clone(), ds))
                            .map_err(|e| ApiError::Comparison {
                                genre: genre.clone(),
                                source: Box::new(e),
                            })
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(ApiError::Malformed {
                            message: "comparison worker panicked".to_string(),
                        })
                    })
                })
                .collect()
        });

        let mut inputs = Vec::with_capacity(fetched.len());
        for result in fetched {
            inputs.push(result?);
        }
        Ok(merge_comparison(&inputs))
    }

    fn get_dataset(&self, path: &str, query: &[(&str, &str)]) -> Result<ChartDataset> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text()?;
        let dataset: ChartDataset =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed {
                message: format!("{} - Raw: {}", e, truncate_body(&body)),
            })?;
        dataset.validate().map_err(|e| ApiError::Malformed {
            message: e.to_string(),
        })?;
        Ok(dataset)
    }
}

/// Keep error messages readable when the server sends an HTML error page
fn truncate_body(body: &str) -> String {
    const MAX: usize = 120;
    match body.char_indices().nth(MAX) {
        None => body.to_string(),
        Some((idx, _)) => format!("{}...", &body[..idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");

        let client = ApiClient::new("http://localhost:8000", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_error_display() {
        let status = ApiError::Status { code: 503 };
        assert_eq!(status.to_string(), "server returned HTTP 503");

        let comparison = ApiError::Comparison {
            genre: "Horror".to_string(),
            source: Box::new(ApiError::Status { code: 500 }),
        };
        assert_eq!(
            comparison.to_string(),
            "comparison fetch for 'Horror' failed: server returned HTTP 500"
        );
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < 130);
        assert!(truncated.ends_with("..."));
    }

    // Live request behavior (success, empty, malformed, HTTP errors, and the
    // all-or-nothing comparison join) is covered against a real in-process
    // server in tests/api_client.rs.
}
