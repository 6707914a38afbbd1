use std::backtrace::Backtrace;
use std::panic;
use std::path::PathBuf;

use clap::{Parser, command};
use flexi_logger::{Age, Cleanup, Criterion, FileSpec, LogSpecBuilder, Logger, Naming};
use log::{debug, error};
use masterror::AppError;
use tokio::runtime::Handle;
use wallclock_core::config::get_config;
use wallclock_term::{App, TerminalSurface, get_log_spec};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Stdout belongs to the clock display, so logs go to the file only.
    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory("/tmp/wallclock"))
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    );
    let logger = logger.start().unwrap();
    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    debug!("args: {args:?}");

    let (config, config_path) = get_config(args.config_path).unwrap_or_else(|err| {
        error!("Failed to read config: {err}");

        std::process::exit(1);
    });
    debug!("config loaded from {config_path:?}");

    logger.set_new_spec(get_log_spec(&config.log_level));

    let surface = TerminalSurface::new()?;
    let app = App::new(config, surface, Handle::current())?;

    app.run().await
}
