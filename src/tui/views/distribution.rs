//! Distribution view - vote share across genres
//!
//! The terminal stand-in for the dashboard's pie chart: one ranked row per
//! genre with a colored share bar and percentage.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::chart::{series_color, Chart};
use crate::tui::state::{bar_cells, share, truncate_label};

const LABEL_COLUMN: usize = 18;

/// Draw the genre share list
pub fn draw(frame: &mut Frame, chart: &Chart, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", chart.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);

    let Some(series) = chart.data.datasets.first() else {
        frame.render_widget(block, area);
        return;
    };

    let total: f64 = series.data.iter().sum();
    // Label + bar + "100.0% (9999 votes)" must fit the pane
    let bar_space = (inner.width as usize).saturating_sub(LABEL_COLUMN + 24).max(8);

    let lines: Vec<Line> = chart
        .data
        .labels
        .iter()
        .zip(series.data.iter())
        .enumerate()
        .map(|(i, (label, &value))| {
            let fraction = share(value, total);
            let cells = bar_cells(fraction, bar_space);
            let (r, g, b) = series_color(i);
            Line::from(vec![
                Span::raw(format!(
                    " {:<width$} ",
                    truncate_label(label, LABEL_COLUMN),
                    width = LABEL_COLUMN
                )),
                Span::styled("█".repeat(cells), Style::default().fg(Color::Rgb(r, g, b))),
                Span::styled(
                    format!(" {:>5.1}% ({} votes)", fraction * 100.0, value.round() as i64),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
