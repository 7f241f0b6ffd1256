//! Command-line surface for the booking directory.
//!
//! # Responsibility
//! - Resolve configuration (file, `BOOKING_*` environment, flags).
//! - Initialize logging and the database once per process.
//! - Run exactly one read or write use case per invocation.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use booking_core::db::open_db;
use booking_core::{init_logging, BookingConfig, RequestContext};
use clap::Parser;
use log::info;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "booking",
    version,
    about = "Browse and edit the venue/artist/show booking directory",
    long_about = "Browse venues grouped by city and state, search venues and artists, \
                  inspect past and upcoming shows, and list, edit or delete records."
)]
struct Cli {
    /// JSON config file (database_path, log_level, log_dir)
    #[arg(long, global = true, env = "BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file, overrides config and environment
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Start-time style for detail pages and the show listing
    #[arg(long, global = true, value_enum, default_value_t = commands::DateStyle::Raw)]
    date_format: commands::DateStyle,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BookingConfig::load(cli.config.as_deref())
        .context("failed to load booking configuration")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    init_logging(&config.log_level, config.log_sink())
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;
    info!(
        "event=cli_start module=cli status=ok command={} db={}",
        cli.command.name(),
        config.database_path.display()
    );

    let mut conn = open_db(&config.database_path).with_context(|| {
        format!(
            "failed to open database `{}`",
            config.database_path.display()
        )
    })?;
    let mut ctx = RequestContext::new(&mut conn);
    commands::run(cli.command, &mut ctx, cli.date_format)
}
