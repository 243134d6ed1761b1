//! Bar chart view - top films by votes for one genre

use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
};

use crate::chart::{series_color, Chart};
use crate::tui::state::truncate_label;

/// Draw a single-series vertical bar chart
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

    let n = chart.data.labels.len().max(1);
    let bar_width = ((inner.width as usize / n).saturating_sub(1)).clamp(3, 14) as u16;
    let (r, g, b) = series_color(0);
    let color = Color::Rgb(r, g, b);

    let bars: Vec<Bar> = chart
        .data
        .labels
        .iter()
        .zip(series.data.iter())
        .map(|(label, &value)| {
            Bar::default()
                .value(value.round().max(0.0) as u64)
                .label(Line::from(truncate_label(label, bar_width as usize)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let widget = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(widget, area);
}
