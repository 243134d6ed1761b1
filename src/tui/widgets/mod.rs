//! Reusable TUI widgets

pub mod export_dialog;
