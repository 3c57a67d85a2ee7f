//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::store::default_data_path;

/// Record per-employee production and view a ranked workload report.
#[derive(Parser, Debug)]
#[command(name = "workload-stats", version)]
pub struct CliArgs {
    /// CSV file holding the records (defaults to ~/.workload-stats/employee_data.csv)
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Print the statistics report to stdout and exit
    #[arg(long)]
    pub report: bool,

    /// Do not write a log file
    #[arg(long)]
    pub no_log_file: bool,
}

impl CliArgs {
    /// Resolve defaults and turn the parsed flags into a startup config.
    pub fn into_config(self) -> Result<Config> {
        let data_file = match self.data_file {
            Some(path) => path,
            None => default_data_path()?,
        };
        Ok(Config {
            data_file,
            report_only: self.report,
            log_to_file: !self.no_log_file,
        })
    }
}
