//! Geonoise CLI
//!
//! Command-line interface for the geotagged noise ledger.

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use geonoise::cli::{commands, Cli, Commands};
use geonoise::config::LedgerConfig;
use geonoise::Result;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Geonoise v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("[{}] {}", e.error_code(), e);
        if let Some(suggestion) = e.recovery_suggestion() {
            eprintln!("{}", suggestion);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::load(path)?,
        None => LedgerConfig::default(),
    };
    if let Some(path) = cli.ledger {
        config.ledger_path = path;
    }

    match cli.command {
        Some(cmd) => handle_command(config, cmd),
        None => {
            println!("Geonoise v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(config: LedgerConfig, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::RecordRms { rms, peak, lat, lng } => {
            commands::record_rms(config, rms, peak, &lat, &lng)
        }
        Commands::RecordDb { level, lat, lng } => commands::record_db(config, level, &lat, &lng),
        Commands::List => commands::list(config),
        Commands::Show { id } => commands::show(config, id),
        Commands::Stats => commands::stats(config),
    }
}
