// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fs;
use std::path::Path;

use bishl_licensing::{LicensingConfig, LicensingEngine};
use bishl_licensing_api::{
    BootstrapOptions, ImportOptions, IshdRoster, bootstrap_all_players, check_player,
    classification_stats, import_ishd_roster, revalidate_player,
};
use bishl_licensing_domain::{Player, WkoRuleTable, validate_player_document};
use bishl_licensing_persistence::Persistence;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use crate::{Args, Command};

pub fn run(args: Args) -> Result<()> {
    let reference_date = args
        .reference_date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let engine = LicensingEngine::new(load_config(args.rules.as_deref(), reference_date)?);

    let database = args.database.as_deref();

    match args.command {
        Command::Check { player } => {
            let player: Player = read_json(&player)?;
            print_json(&check_player(&engine, &player)?)
        }
        Command::Bootstrap { batch_size } => {
            let mut store = open_store(database)?;
            let options = BootstrapOptions::with_batch_size(batch_size);
            print_json(&bootstrap_all_players(&mut store, &engine, options)?)
        }
        Command::Revalidate { player_id } => {
            let mut store = open_store(database)?;
            print_json(&revalidate_player(&mut store, &engine, &player_id)?)
        }
        Command::Load { players } => {
            let players: Vec<Player> = read_json(&players)?;
            let mut store = open_store(database)?;
            for player in &players {
                validate_player_document(player, reference_date)
                    .wrap_err_with(|| format!("rejected player {}", player.id))?;
                store.insert_player(player)?;
            }
            info!(count = players.len(), "Loaded players");
            Ok(())
        }
        Command::Import { roster, dry_run } => {
            let roster: IshdRoster = read_json(&roster)?;
            let mut store = open_store(database)?;
            let options = ImportOptions { dry_run };
            print_json(&import_ishd_roster(&mut store, &engine, &roster, options)?)
        }
        Command::Stats { batch_size } => {
            let mut store = open_store(database)?;
            print_json(&classification_stats(&mut store, batch_size)?)
        }
    }
}

fn load_config(rules: Option<&Path>, reference_date: Date) -> Result<LicensingConfig> {
    debug!(%reference_date, "Reference date");
    let Some(path) = rules else {
        return Ok(LicensingConfig::bishl_default(reference_date));
    };
    let table = WkoRuleTable::from_json_file(path)
        .wrap_err_with(|| format!("failed to load rule table {}", path.display()))?;
    info!(path = %path.display(), "Using custom WKO rule table");
    Ok(LicensingConfig::new(table, reference_date))
}

fn open_store(database: Option<&Path>) -> Result<Persistence> {
    if let Some(path) = database {
        info!(path = %path.display(), "Using database file");
        Ok(Persistence::new_with_file(path)?)
    } else {
        info!("Using in-memory database");
        Ok(Persistence::new_in_memory()?)
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
