//! campusgrid - tabular views over school administration records.
//!
//! This library provides the core shared by the `campusgrid` binary:
//! - `table` - generic table state (filtering, sorting, pagination, selection)
//! - `models` - entity records (admins, students, teachers, events) and session
//! - `provider` - record source abstraction (JSON files, in-memory)
//! - `screen` - per-entity screen controller (reload, confirmed mutations)
//! - `view` - UI-agnostic view models
//! - `util` - dates, clock times, natural ordering keys, input sanitizing
//! - `tui` - interactive terminal UI (ratatui/crossterm)

pub mod models;
pub mod provider;
pub mod screen;
pub mod table;
pub mod tui;
pub mod util;
pub mod view;

/// Crate version, used by the binary and the TUI header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
