mod cli;

use anicat::error::{ErrorKind, Result};
use anicat_config::Config;
use clap::Parser;
use cli::Cli;
use exn::ResultExt;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 7] = [
    "anicat",
    "anicat_augment",
    "anicat_cache",
    "anicat_config",
    "anicat_library",
    "anicat_normalize",
    "anicat_titles",
];

/// Logs go to stderr; stdout carries nothing but the catalog.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = CRATES.iter().map(|name| format!("{name}={level}")).collect();
        EnvFilter::new(format!("warn,{}", directives.join(",")))
    });
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref(), &cli.overrides()).or_raise(|| ErrorKind::Config)?;
    tracing::debug!(?config, "Configuration loaded");
    let catalog = anicat::run(&cli.titledb, &cli.mediadir, &config)?;

    // Fully serialized before stdout is touched: a failed run prints nothing.
    let mut json = catalog.to_json(cli.pretty).or_raise(|| ErrorKind::Output)?;
    json.push(b'\n');
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&json).or_raise(|| ErrorKind::Output)?;
    stdout.flush().or_raise(|| ErrorKind::Output)?;
    tracing::info!(series = catalog.series.len(), "Catalog written");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}
