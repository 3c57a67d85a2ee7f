use std::path::PathBuf;

use crate::store::logs_dir_for;

/// Startup settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV file backing the record table.
    pub data_file: PathBuf,
    /// Print the statistics report and exit instead of opening the TUI.
    pub report_only: bool,
    /// Write a rolling log file next to the data file.
    pub log_to_file: bool,
}

impl Config {
    pub fn logs_dir(&self) -> PathBuf {
        logs_dir_for(&self.data_file)
    }
}
