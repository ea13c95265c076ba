mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use ecrivain_config::Config;
use std::process;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    match &config {
        Some(_) => log::debug!("Loaded config"),
        None => log::debug!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Render(args) => commands::render(&args, config.as_ref()),
        Commands::Languages { languages } => {
            let extra = languages
                .as_deref()
                .or_else(|| config.as_ref().and_then(|c| c.languages.as_deref()));
            commands::languages(extra, &mut std::io::stdout().lock())
        }
    }
}
