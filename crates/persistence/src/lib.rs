// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Player document store for the BISHL licensing engine.
//!
//! Players live in a single `SQLite` table. The identity columns are indexed
//! for roster matching, the profile and the assignments are stored as JSON.
//! Every run that changes a player's licenses appends its change set to
//! `license_changes` in the same transaction as the assignment update.
//!
//! ## Testing
//!
//! Tests run against in-memory databases. Each `Persistence::new_in_memory()`
//! call gets its own shared-cache database, so tests never see each other's
//! rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use bishl_licensing_audit::PlayerChangeSet;
use bishl_licensing_domain::{AssignedClub, Player};
use diesel::{Connection, SqliteConnection};
use time::Date;
use tracing::info;

use crate::backend::sqlite::Storage;

pub use data_models::{StoredChangeSet, format_birthdate};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url = format!("file:bishl_licensing_{db_id}?mode=memory&cache=shared");

        let conn = backend::sqlite::open(&url, Storage::Memory)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn = backend::sqlite::open(path_str, Storage::File)?;
        Ok(Self { conn })
    }

    /// Stores a new player.
    ///
    /// # Errors
    ///
    /// Returns `PlayerAlreadyExists` if the id is taken.
    pub fn insert_player(&mut self, player: &Player) -> Result<(), PersistenceError> {
        mutations::insert_player(&mut self.conn, player)
    }

    /// Retrieves a player by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored document is corrupt.
    pub fn get_player(&mut self, player_id: &str) -> Result<Option<Player>, PersistenceError> {
        queries::get_player(&mut self.conn, player_id)
    }

    /// Finds the stored player with this identity.
    ///
    /// Names compare trimmed and case-insensitively. When several stored
    /// players share an identity the one with the lowest id is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_by_identity(
        &mut self,
        first_name: &str,
        last_name: &str,
        birthdate: Date,
    ) -> Result<Option<Player>, PersistenceError> {
        let key = (
            first_name.trim().to_lowercase(),
            last_name.trim().to_lowercase(),
            birthdate,
        );
        let born_on = format_birthdate(birthdate)?;
        let candidates = queries::find_players_born_on(&mut self.conn, &born_on)?;
        Ok(candidates.into_iter().find(|p| p.identity() == key))
    }

    /// Retrieves every player holding an assignment of `team_id`, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_players_assigned_to(
        &mut self,
        team_id: &str,
    ) -> Result<Vec<Player>, PersistenceError> {
        let candidates = queries::find_players_assigned_to(&mut self.conn, team_id)?;
        Ok(candidates
            .into_iter()
            .filter(|p| p.licenses().any(|(_, t)| t.team_id == team_id))
            .collect())
    }

    /// Loads one page of players in id order.
    ///
    /// Pass the id of the last player of the previous page as `after`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_players_page(
        &mut self,
        after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Player>, PersistenceError> {
        let limit = i64::try_from(limit)
            .map_err(|e| PersistenceError::QueryFailed(format!("Invalid page size: {e}")))?;
        queries::load_players_page(&mut self.conn, after, limit)
    }

    /// Counts stored players.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_players(&mut self) -> Result<u64, PersistenceError> {
        let count = queries::count_players(&mut self.conn)?;
        u64::try_from(count).map_err(|e| PersistenceError::QueryFailed(e.to_string()))
    }

    /// Rewrites the assignments of a stored player.
    ///
    /// # Errors
    ///
    /// Returns `PlayerNotFound` if no player has this id.
    pub fn update_assigned_teams(
        &mut self,
        player_id: &str,
        clubs: &[AssignedClub],
    ) -> Result<(), PersistenceError> {
        mutations::update_assigned_teams(&mut self.conn, player_id, clubs)
    }

    /// Appends a change set to the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist.
    pub fn record_license_changes(
        &mut self,
        changes: &PlayerChangeSet,
    ) -> Result<i64, PersistenceError> {
        mutations::record_license_changes(&mut self.conn, changes)
    }

    /// Lists the change sets recorded for a player, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_license_changes(
        &mut self,
        player_id: &str,
    ) -> Result<Vec<StoredChangeSet>, PersistenceError> {
        queries::list_license_changes(&mut self.conn, player_id)
    }

    /// Persists the result of a licensing run on a stored player.
    ///
    /// The assignments and the change set are written in one transaction.
    /// An empty change set is not logged; the assignments are written
    /// regardless, since a roster sync may change fields the engine does
    /// not own.
    ///
    /// # Errors
    ///
    /// Returns `PlayerNotFound` if the player is not stored.
    pub fn save_licensing_result(
        &mut self,
        player: &Player,
        changes: &PlayerChangeSet,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::update_assigned_teams(conn, &player.id, &player.assigned_teams)?;
            if !changes.is_empty() {
                mutations::record_license_changes(conn, changes)?;
            }
            Ok(())
        })?;

        info!(
            player_id = %player.id,
            trigger = %changes.trigger,
            changed = changes.changes.len(),
            "Licensing result persisted"
        );
        Ok(())
    }

    /// Stores a newly imported player together with its first change set.
    ///
    /// # Errors
    ///
    /// Returns `PlayerAlreadyExists` if the id is taken.
    pub fn insert_licensed_player(
        &mut self,
        player: &Player,
        changes: &PlayerChangeSet,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::insert_player(conn, player)?;
            if !changes.is_empty() {
                mutations::record_license_changes(conn, changes)?;
            }
            Ok(())
        })
    }
}
