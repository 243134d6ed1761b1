//! Export format picker modal

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::tui::app::ExportDialog;

/// Draw the centered export dialog over the main UI
pub fn draw(frame: &mut Frame, dialog: &ExportDialog, area: Rect) {
    let width = 36.min(area.width);
    let height = 9.min(area.height);
    let popup = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Export chart ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let layout =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(inner);

    let items: Vec<ListItem> = ExportDialog::FORMATS
        .iter()
        .enumerate()
        .map(|(i, format)| {
            let selected = i == dialog.cursor;
            let marker = if selected { "▶ " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{}", marker, format.extension().to_uppercase())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), layout[0]);

    let hint = Paragraph::new(" enter export │ esc cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, layout[1]);
}
