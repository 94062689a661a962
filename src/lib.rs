//! rShiftlog: shifts, daily revenue and the shared commission pool of a
//! small team, kept in SQLite and driven from the command line.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Route a parsed command line to its handler.
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Db { .. } => commands::db::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg),
        Commands::Employee { .. } => commands::employee::handle(cmd, cfg),
        Commands::Entry { .. } => commands::entry::handle(cmd, cfg),
        Commands::Revenue { .. } => commands::revenue::handle(cmd, cfg),
        Commands::Commission { .. } => commands::commission::handle(cmd, cfg),
        Commands::Report { .. } => commands::report::handle(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(cmd, cfg),
    }
}

/// Parse arguments, load the config file and run the command.
/// `--db` takes precedence over the configured database.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
