//! Comparison view - grouped bars, one group per film, one bar per genre

use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::chart::{series_color, Chart};
use crate::tui::state::truncate_label;

/// Draw the multi-genre comparison chart with a series legend below it
pub fn draw(frame: &mut Frame, chart: &Chart, area: Rect) {
    let layout = Layout::vertical([Constraint::Min(6), Constraint::Length(1)]).split(area);

    draw_groups(frame, chart, layout[0]);
    draw_legend(frame, chart, layout[1]);
}

fn draw_groups(frame: &mut Frame, chart: &Chart, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", chart.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);

    let data = &chart.data;
    let groups = data.labels.len().max(1);
    let series_count = data.datasets.len().max(1);
    // Each group holds one bar per series plus a gap between groups
    let per_group = (inner.width as usize / groups).saturating_sub(2).max(series_count);
    let bar_width = (per_group / series_count).clamp(1, 8) as u16;

    let mut widget = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2);

    let group_label_width = (bar_width as usize) * series_count;
    for (label_idx, label) in data.labels.iter().enumerate() {
        let bars: Vec<Bar> = data
            .datasets
            .iter()
            .enumerate()
            .map(|(series_idx, series)| {
                let (r, g, b) = series_color(series_idx);
                let value = series.data.get(label_idx).copied().unwrap_or(0.0);
                Bar::default()
                    .value(value.round().max(0.0) as u64)
                    .style(Style::default().fg(Color::Rgb(r, g, b)))
                    .value_style(Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b)))
            })
            .collect();
        widget = widget.data(
            BarGroup::default()
                .label(Line::from(truncate_label(label, group_label_width.max(3))))
                .bars(&bars),
        );
    }

    frame.render_widget(widget, area);
}

fn draw_legend(frame: &mut Frame, chart: &Chart, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, series) in chart.data.datasets.iter().enumerate() {
        let (r, g, b) = series_color(i);
        spans.push(Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))));
        spans.push(Span::raw(format!("{}  ", series.label)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
