//! Terminal dashboard for cinecharts
//!
//! Genre and period selectors, a single chart pane (bar, distribution, or
//! comparison), and an export dialog. Fetches run on background threads;
//! the pane shows the loading/empty/error placeholders while they land.

pub mod app;
pub mod msg; // TEA message types (what happened)
pub mod state; // Pure state transformations (functional core)
pub mod ui;
pub mod views;
pub mod widgets;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{poll, read, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::api::ApiClient;
use crate::dataset::Period;

use app::App;
use msg::{key_to_msg, Msg};

/// Run the TUI application
pub fn run(client: ApiClient, period: Period) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app, ensuring cleanup happens even on error
    let result = run_event_loop(&mut terminal, client, period);

    // Restore terminal - this MUST run even if app fails
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    client: ApiClient,
    period: Period,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(client, period);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // Handle input with timeout
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if poll(timeout)? {
            if let Event::Key(key) = read()? {
                let msg = key_to_msg(
                    key.code,
                    key.modifiers,
                    app.export_dialog.is_some(),
                    app.show_help,
                );
                if msg != Msg::Noop && app.handle_msg(msg) {
                    return Ok(()); // Quit signal
                }
            }
        }

        // Pick up finished fetches (stale ones are dropped by the loader)
        app.poll_results();

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}
