//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::chart::ChartKind;
use crate::loader::LoadState;

use super::app::App;
use super::state::truncate_label;
use super::views::{bar, compare, distribution};
use super::widgets::export_dialog;

/// Main draw function - orchestrates all rendering
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Genre bar
        Constraint::Min(10),   // Chart pane
        Constraint::Length(1), // Footer/status
    ])
    .split(area);

    draw_header(frame, app, main_layout[0]);
    draw_genre_bar(frame, app, main_layout[1]);
    draw_chart_pane(frame, app, main_layout[2]);
    draw_footer(frame, app, main_layout[3]);

    if app.show_help {
        draw_help_overlay(frame, area);
    }

    if let Some(dialog) = &app.export_dialog {
        export_dialog::draw(frame, dialog, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_text = format!(
        " cinecharts │ {} │ {}",
        app.selection_label(),
        app.period.label()
    );
    let header =
        Paragraph::new(header_text).style(Style::default().bg(Color::Blue).fg(Color::White).bold());
    frame.render_widget(header, area);
}

/// One pill per genre, the selected one highlighted, marked ones starred
fn draw_genre_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];

    let all_active = app.genre_index.is_none();
    spans.push(Span::styled(
        "[All]",
        if all_active {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        },
    ));
    spans.push(Span::raw(" "));

    for (i, genre) in app.genres.iter().enumerate() {
        let is_active = app.genre_index == Some(i);
        let marked = app.marks.get(i).copied().unwrap_or(false);
        let text = if marked {
            format!("[{}*]", truncate_label(genre, 14))
        } else {
            format!("[{}]", truncate_label(genre, 14))
        };
        let style = if is_active {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else if marked {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The chart pane shows the loading/empty/error placeholders or the chart
fn draw_chart_pane(frame: &mut Frame, app: &App, area: Rect) {
    match app.loader.state() {
        LoadState::Idle | LoadState::Loading => {
            draw_placeholder(frame, area, "Loading chart data...", Color::DarkGray);
        }
        LoadState::Empty => {
            draw_placeholder(
                frame,
                area,
                "No data available for this selection.",
                Color::Cyan,
            );
        }
        LoadState::Failed(message) => {
            draw_placeholder(
                frame,
                area,
                &format!("Error loading chart data: {}", message),
                Color::Red,
            );
        }
        LoadState::Ready => {
            if let Some(chart) = app.loader.chart() {
                match chart.kind {
                    ChartKind::Bar => bar::draw(frame, chart, area),
                    ChartKind::Pie => distribution::draw(frame, chart, area),
                    ChartKind::GroupedBar => compare::draw(frame, chart, area),
                }
            }
        }
    }
}

fn draw_placeholder(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    // Vertically center a short message
    let vertical = Layout::vertical([
        Constraint::Percentage(45),
        Constraint::Length(2),
        Constraint::Percentage(45),
    ])
    .split(inner);
    frame.render_widget(placeholder, vertical[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status {
        Some(status) => format!(" {}", status),
        None => {
            " g/G genre │ p period │ space mark │ enter compare │ e export │ r refresh │ ? help │ q quit"
                .to_string()
        }
    };
    let footer = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 52.min(area.width);
    let height = 14.min(area.height);
    let popup = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(ratatui::widgets::Clear, popup);

    let lines = vec![
        Line::from(""),
        Line::from("  g / →      next genre"),
        Line::from("  G / ←      previous genre"),
        Line::from("  p / tab    cycle period"),
        Line::from("  space      mark genre for comparison"),
        Line::from("  enter      compare marked genres"),
        Line::from("  e          export chart (png/csv/json)"),
        Line::from("  r          refresh"),
        Line::from("  ?          toggle this help"),
        Line::from("  q          quit"),
    ];
    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(help, popup);
}
