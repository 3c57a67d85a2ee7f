//! Core library surface for the workload statistics TUI.
//!
//! The record store, table model, form controller and statistics reporter do
//! not depend on the terminal front-end, so they can be driven directly by
//! tests or other tooling.
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod stats;
pub mod store;
pub mod table;
pub mod ui;

pub use config::Config;
pub use controller::{AppContext, Confirmation, FormValues};
pub use error::{ActionError, Severity};
pub use models::{Category, CompletedCount, Quality, Record};
pub use stats::{build_report, StatisticsReport};
pub use store::RecordStore;
pub use table::RecordTable;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
