//! TUI widgets.

mod confirm;
mod table;

pub use confirm::render_confirm;
pub use table::render_table;
