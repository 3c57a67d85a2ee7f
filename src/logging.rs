//! Tracing setup.
//!
//! The TUI owns the terminal, so interactive runs log only to a daily rolling
//! file under `<data dir>/logs/`. `RUST_LOG` overrides the default `info`
//! filter, e.g. `RUST_LOG=workload_stats::store=debug`. The `--report` mode
//! also gets a stderr layer limited to warnings.

use std::fs;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::Config;

const LOG_FILE_NAME: &str = "workload-stats.log";

/// Install the global subscriber. Safe to call once per process.
pub fn init(config: &Config) {
    let file_layer = if config.log_to_file {
        let logs_dir = config.logs_dir();
        match fs::create_dir_all(&logs_dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_NAME);
                Some(
                    fmt::layer()
                        .with_writer(appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_filter(file_filter()),
                )
            }
            Err(err) => {
                eprintln!(
                    "Warning: could not create log directory {}: {err}",
                    logs_dir.display()
                );
                None
            }
        }
    } else {
        None
    };

    let console_layer = config.report_only.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(EnvFilter::new("warn"))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();
}

fn file_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
