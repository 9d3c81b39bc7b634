//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen: a disease sidebar, the active form, a result panel and a
//! disclaimer footer.

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
