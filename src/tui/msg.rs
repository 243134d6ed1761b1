//! TEA Message Types for the TUI
//!
//! Messages are data describing what the user did, produced by a pure
//! key-mapping function and consumed by a single update path in the app.

use crossterm::event::{KeyCode, KeyModifiers};

/// All possible messages/actions in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    // === Selection ===
    /// Cycle to the next genre (wraps back to the distribution view)
    NextGenre,
    /// Cycle to the previous genre
    PrevGenre,
    /// Cycle the period filter
    CyclePeriod,

    // === Comparison ===
    /// Toggle the highlighted genre's membership in the comparison set
    ToggleMark,
    /// Fetch and show the comparison for the marked genres
    RunComparison,

    // === Data ===
    /// Re-fetch the current selection
    Refresh,

    // === Export Dialog ===
    /// Open the export format picker
    OpenExport,
    /// Move the format cursor up
    ExportUp,
    /// Move the format cursor down
    ExportDown,
    /// Export with the highlighted format
    ExportConfirm,
    /// Close the dialog without exporting
    ExportCancel,

    // === Overlays ===
    /// Toggle the help overlay
    ToggleHelp,

    // === Lifecycle ===
    /// Quit the application
    Quit,
    /// No operation (for unhandled keys)
    Noop,
}

/// Convert a key event to a message
///
/// Pure function: the result only depends on the key and which overlay is
/// open. Dialog and help mode capture keys before normal mode sees them.
pub fn key_to_msg(
    code: KeyCode,
    modifiers: KeyModifiers,
    export_open: bool,
    help_open: bool,
) -> Msg {
    if export_open {
        return match code {
            KeyCode::Esc | KeyCode::Char('q') => Msg::ExportCancel,
            KeyCode::Enter => Msg::ExportConfirm,
            KeyCode::Char('j') | KeyCode::Down => Msg::ExportDown,
            KeyCode::Char('k') | KeyCode::Up => Msg::ExportUp,
            _ => Msg::Noop,
        };
    }

    if help_open {
        return match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Msg::ToggleHelp,
            _ => Msg::Noop,
        };
    }

    match code {
        // Quit
        KeyCode::Char('q') => Msg::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Msg::Quit,

        // Selection
        KeyCode::Char('g') | KeyCode::Right | KeyCode::Char('l') => Msg::NextGenre,
        KeyCode::Char('G') | KeyCode::Left | KeyCode::Char('h') => Msg::PrevGenre,
        KeyCode::Char('p') | KeyCode::Tab => Msg::CyclePeriod,

        // Comparison
        KeyCode::Char(' ') => Msg::ToggleMark,
        KeyCode::Enter => Msg::RunComparison,

        // Data
        KeyCode::Char('r') => Msg::Refresh,

        // Export / help
        KeyCode::Char('e') => Msg::OpenExport,
        KeyCode::Char('?') => Msg::ToggleHelp,

        _ => Msg::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_msg_selection() {
        assert_eq!(key_to_msg(KeyCode::Char('g'), KeyModifiers::NONE, false, false), Msg::NextGenre);
        assert_eq!(key_to_msg(KeyCode::Right, KeyModifiers::NONE, false, false), Msg::NextGenre);
        assert_eq!(key_to_msg(KeyCode::Char('G'), KeyModifiers::SHIFT, false, false), Msg::PrevGenre);
        assert_eq!(key_to_msg(KeyCode::Char('p'), KeyModifiers::NONE, false, false), Msg::CyclePeriod);
    }

    #[test]
    fn test_key_to_msg_quit() {
        assert_eq!(key_to_msg(KeyCode::Char('q'), KeyModifiers::NONE, false, false), Msg::Quit);
        assert_eq!(
            key_to_msg(KeyCode::Char('c'), KeyModifiers::CONTROL, false, false),
            Msg::Quit
        );
    }

    #[test]
    fn test_key_to_msg_export_dialog_captures_keys() {
        assert_eq!(key_to_msg(KeyCode::Char('j'), KeyModifiers::NONE, true, false), Msg::ExportDown);
        assert_eq!(key_to_msg(KeyCode::Enter, KeyModifiers::NONE, true, false), Msg::ExportConfirm);
        assert_eq!(key_to_msg(KeyCode::Esc, KeyModifiers::NONE, true, false), Msg::ExportCancel);
        // 'q' closes the dialog rather than quitting the app
        assert_eq!(key_to_msg(KeyCode::Char('q'), KeyModifiers::NONE, true, false), Msg::ExportCancel);
    }

    #[test]
    fn test_key_to_msg_help_captures_keys() {
        assert_eq!(key_to_msg(KeyCode::Char('?'), KeyModifiers::NONE, false, true), Msg::ToggleHelp);
        assert_eq!(key_to_msg(KeyCode::Char('g'), KeyModifiers::NONE, false, true), Msg::Noop);
    }

    #[test]
    fn test_key_to_msg_comparison() {
        assert_eq!(key_to_msg(KeyCode::Char(' '), KeyModifiers::NONE, false, false), Msg::ToggleMark);
        assert_eq!(key_to_msg(KeyCode::Enter, KeyModifiers::NONE, false, false), Msg::RunComparison);
    }

    #[test]
    fn test_key_to_msg_unhandled() {
        assert_eq!(key_to_msg(KeyCode::Char('z'), KeyModifiers::NONE, false, false), Msg::Noop);
        assert_eq!(key_to_msg(KeyCode::F(5), KeyModifiers::NONE, false, false), Msg::Noop);
    }
}
