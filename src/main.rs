//! Binary entry point: resolve the configuration, set up logging, open the
//! data file and either print the report or drive the Ratatui event loop.
use clap::Parser;
use workload_stats::cli::CliArgs;
use workload_stats::{logging, run_app, App, AppContext, RecordStore};

fn main() -> anyhow::Result<()> {
    let config = CliArgs::parse().into_config()?;
    logging::init(&config);

    let context = AppContext::open(RecordStore::new(&config.data_file))?;

    if config.report_only {
        let report = context.statistics()?;
        println!("{}", report.to_string().trim_end());
        return Ok(());
    }

    let mut app = App::new(context);
    run_app(&mut app)
}
