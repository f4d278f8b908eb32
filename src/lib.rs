//! TruckHisab library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod pages;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Login { .. } => commands::login::handle(&cli.command, cfg),
        Commands::ForgotPassword { .. } => commands::forgot::handle(&cli.command, cfg),
        Commands::Logout => commands::logout::handle(cfg),
        Commands::Show { .. } => commands::show::handle(&cli.command, cfg),
        Commands::Users { .. }
        | Commands::Trucks { .. }
        | Commands::Locations { .. }
        | Commands::Entries { .. }
        | Commands::History { .. } => commands::entity::handle(&cli.command, cfg),
        Commands::Profile { .. } => commands::profile::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Apply global flags on top of the loaded configuration.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_database(custom_db)
            .to_string_lossy()
            .to_string();
    }
    if let Some(url) = &cli.api_url {
        cfg.api_url = Some(url.clone());
    }
    if cli.offline {
        cfg.api_url = None;
    }
    // Scoped to this crate so reqwest and friends stay quiet.
    if cli.verbose {
        cfg.log_level = format!("{}=debug", env!("CARGO_CRATE_NAME"));
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    apply_overrides(&cli, &mut cfg);

    logging::init(&cfg.log_level);
    tracing::debug!(database = %cfg.database, api = ?cfg.api_url, "configuration loaded");

    dispatch(&cli, &cfg)
}
