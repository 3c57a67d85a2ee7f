//! Ratatui front-end: an input panel, the record grid, a footer with status
//! and key hints, and modal overlays for messages and the statistics report.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
