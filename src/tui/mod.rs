//! Terminal user interface for browsing one record list.
//!
//! Keys: `/` filter, `s` next sort column, `r` reverse, `n`/`p` page,
//! `j`/`k` select, `d` delete (with confirmation), `R` reload, `q` quit.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use input::{KeyAction, handle_key};
pub use state::{AppState, InputMode};
