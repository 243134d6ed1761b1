//! Application state for the TUI (Imperative Shell)
//!
//! Owns the API client, the current selection, and the chart loader. Fetches
//! run on background threads and report back over a channel tagged with the
//! loader's generation token, so a stale response can never clobber the chart
//! for a newer selection.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::api::ApiClient;
use crate::dataset::Period;
use crate::export::{default_export_name, export_chart, ExportFormat};
use crate::loader::{
    fetch_comparison_outcome, fetch_distribution_outcome, fetch_genre_outcome, ChartLoader,
    LoadOutcome, LoadToken,
};

use super::msg::Msg;
use super::state;

/// Export format picker state
#[derive(Debug, Clone)]
pub struct ExportDialog {
    pub cursor: usize,
}

impl ExportDialog {
    pub const FORMATS: [ExportFormat; 3] =
        [ExportFormat::Png, ExportFormat::Csv, ExportFormat::Json];

    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < Self::FORMATS.len() {
            self.cursor += 1;
        }
    }

    pub fn selected(&self) -> ExportFormat {
        Self::FORMATS[self.cursor]
    }
}

impl Default for ExportDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state
pub struct App {
    client: ApiClient,

    // Selection state, read at the moment a chart is requested
    pub period: Period,
    pub genres: Vec<String>,
    pub marks: Vec<bool>,
    /// None = distribution view, Some(i) = genres[i]
    pub genre_index: Option<usize>,

    // The single chart pane
    pub loader: ChartLoader,

    // Overlays
    pub export_dialog: Option<ExportDialog>,
    pub show_help: bool,

    // Footer status line
    pub status: Option<String>,

    tx: Sender<(LoadToken, LoadOutcome)>,
    rx: Receiver<(LoadToken, LoadOutcome)>,
}

impl App {
    /// Build the app and kick off the initial distribution load.
    ///
    /// The distribution's labels double as the genre vocabulary; if that
    /// first fetch fails the app still starts, with an empty genre list and
    /// the error in the status line.
    pub fn new(client: ApiClient, period: Period) -> Self {
        let (tx, rx) = channel();
        let (genres, status) = match client.fetch_distribution(period) {
            Ok(ds) => (ds.labels, None),
            Err(e) => (vec![], Some(format!("Could not load genre list: {}", e))),
        };
        let marks = vec![false; genres.len()];

        let mut app = Self {
            client,
            period,
            genres,
            marks,
            genre_index: None,
            loader: ChartLoader::new(),
            export_dialog: None,
            show_help: false,
            status,
            tx,
            rx,
        };
        app.request_refresh();
        app
    }

    /// Name of the current selection for the header
    pub fn selection_label(&self) -> String {
        match self.genre_index.and_then(|i| self.genres.get(i)) {
            Some(genre) => genre.clone(),
            None => "All genres".to_string(),
        }
    }

    /// Process one message. Returns true when the app should quit.
    pub fn handle_msg(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::NextGenre => {
                self.genre_index = state::next_genre(self.genre_index, self.genres.len());
                self.request_refresh();
            }
            Msg::PrevGenre => {
                self.genre_index = state::prev_genre(self.genre_index, self.genres.len());
                self.request_refresh();
            }
            Msg::CyclePeriod => {
                self.period = self.period.next();
                self.request_refresh();
            }
            Msg::ToggleMark => match self.genre_index {
                Some(i) => {
                    self.marks = state::toggle_mark(&self.marks, i);
                    let count = self.marks.iter().filter(|&&m| m).count();
                    self.status = Some(format!("{} genre(s) marked for comparison", count));
                }
                None => {
                    self.status = Some("Select a genre before marking it".to_string());
                }
            },
            Msg::RunComparison => {
                let selected = state::marked_genres(&self.genres, &self.marks);
                if selected.is_empty() {
                    self.status = Some("No genres marked for comparison".to_string());
                } else {
                    self.request_comparison(selected);
                }
            }
            Msg::Refresh => {
                self.request_refresh();
                self.status = Some("Refreshing...".to_string());
            }
            Msg::OpenExport => {
                if self.loader.chart().is_some() {
                    self.export_dialog = Some(ExportDialog::new());
                } else {
                    self.status = Some("No chart to export".to_string());
                }
            }
            Msg::ExportUp => {
                if let Some(dialog) = self.export_dialog.as_mut() {
                    dialog.move_up();
                }
            }
            Msg::ExportDown => {
                if let Some(dialog) = self.export_dialog.as_mut() {
                    dialog.move_down();
                }
            }
            Msg::ExportConfirm => {
                if let Some(dialog) = self.export_dialog.take() {
                    self.export_current(dialog.selected());
                }
            }
            Msg::ExportCancel => {
                self.export_dialog = None;
            }
            Msg::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Msg::Quit => return true,
            Msg::Noop => {}
        }
        false
    }

    /// Drain finished fetches; stale tokens are dropped by the loader
    pub fn poll_results(&mut self) {
        while let Ok((token, outcome)) = self.rx.try_recv() {
            self.loader.complete(token, outcome);
        }
    }

    /// Re-fetch the chart for the current (genre, period) selection
    fn request_refresh(&mut self) {
        let token = self.loader.begin();
        let client = self.client.clone();
        let period = self.period;
        let genre = self.genre_index.and_then(|i| self.genres.get(i)).cloned();
        let tx = self.tx.clone();

        std::thread::spawn(move || {
            let outcome = match genre {
                Some(genre) => fetch_genre_outcome(&client, &genre, period),
                None => fetch_distribution_outcome(&client, period),
            };
            let _ = tx.send((token, outcome));
        });
    }

    /// Fetch the marked genres concurrently and show the comparison
    fn request_comparison(&mut self, genres: Vec<String>) {
        let token = self.loader.begin();
        let client = self.client.clone();
        let period = self.period;
        let tx = self.tx.clone();

        std::thread::spawn(move || {
            let outcome = fetch_comparison_outcome(&client, &genres, period);
            let _ = tx.send((token, outcome));
        });
    }

    fn export_current(&mut self, format: ExportFormat) {
        let Some(chart) = self.loader.chart() else {
            self.status = Some("No chart to export".to_string());
            return;
        };
        let filename = default_export_name(chart, format);
        let path = std::path::PathBuf::from(&filename);
        self.status = Some(match export_chart(chart, &path) {
            Ok(_) => format!("Exported {}", filename),
            Err(e) => format!("Export failed: {}", e),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_dialog_cursor_clamps() {
        let mut dialog = ExportDialog::new();
        assert_eq!(dialog.selected(), ExportFormat::Png);

        dialog.move_up(); // already at the top
        assert_eq!(dialog.cursor, 0);

        dialog.move_down();
        dialog.move_down();
        assert_eq!(dialog.selected(), ExportFormat::Json);

        dialog.move_down(); // already at the bottom
        assert_eq!(dialog.selected(), ExportFormat::Json);
    }
}
