// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `bishl-licensing` - classify and validate player licenses from the
//! command line.
//!
//! Results are printed to stdout as JSON, logs go to stderr. `RUST_LOG`
//! overrides the `-v`/`-q` verbosity flags.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use bishl_licensing_api::DEFAULT_BATCH_SIZE;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use time::Date;
use time::macros::format_description;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    commands::run(args)
}

/// BISHL player licensing - classification and validation of roster licenses
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// WKO rule table as JSON. If not provided, uses the built-in league table.
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    /// Date ages and suspensions are evaluated on (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long, global = true, value_parser = parse_date)]
    reference_date: Option<Date>,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Reclassify and revalidate every stored player
    #[command(visible_alias = "b")]
    Bootstrap {
        /// Players loaded and processed per page
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },

    /// Classify and validate a player document without storing it
    #[command(visible_alias = "c")]
    Check {
        /// Player document (JSON)
        player: PathBuf,
    },

    /// Revalidate one stored player and write back any change
    #[command(visible_alias = "r")]
    Revalidate {
        /// Id of the stored player
        player_id: String,
    },

    /// Store player documents as they are, without processing them
    Load {
        /// JSON array of player documents
        players: PathBuf,
    },

    /// Sync one federation team roster into the store
    #[command(visible_alias = "i")]
    Import {
        /// Roster document (JSON): club, team and federation players
        roster: PathBuf,

        /// Print what the sync would do without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// License totals by type and status across all stored players
    #[command(visible_alias = "s")]
    Stats {
        /// Players loaded per page
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
