mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Default to warn when RUST_LOG is unset
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ssc=warn,ssc_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Write {
            song,
            output,
            cache,
            charts,
        } => commands::write::run(&song, &output, cache, &charts),
        Command::Edit {
            song,
            chart,
            config,
            output,
        } => commands::edit::run(&song, chart, config.as_deref(), output.as_deref()),
        Command::EditName { song, chart } => commands::edit_name::run(&song, chart),
        Command::Inspect { file, json } => commands::inspect::run(&file, json),
    }
}
