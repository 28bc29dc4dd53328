// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their mapping to the domain documents.
//!
//! A player is split into the indexed identity columns, the profile (every
//! field except the assignments) and the assignments array. The assignments
//! are the only part the licensing engine ever rewrites.

use bishl_licensing_audit::PlayerChangeSet;
use bishl_licensing_domain::{AssignedClub, Player};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::diesel_schema::{license_changes, players};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a birthdate the way it is stored.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_birthdate(date: Date) -> Result<String, PersistenceError> {
    Ok(date.format(DATE_FORMAT)?)
}

/// The columns a player document is rebuilt from.
///
/// The identity columns only serve lookups and are not selected.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlayerRow {
    pub player_id: String,
    pub profile_json: String,
    pub assigned_teams_json: String,
}

impl PlayerRow {
    /// Reassembles the player document.
    ///
    /// # Errors
    ///
    /// Returns an error if either JSON column does not decode, or the profile
    /// belongs to a different player than the row.
    pub fn into_player(self) -> Result<Player, PersistenceError> {
        let mut player: Player = serde_json::from_str(&self.profile_json)?;
        if player.id != self.player_id {
            return Err(PersistenceError::SerializationError(format!(
                "Stored profile of {} carries id {}",
                self.player_id, player.id
            )));
        }
        player.assigned_teams = serde_json::from_str(&self.assigned_teams_json)?;
        Ok(player)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = players)]
pub struct NewPlayerRow {
    pub player_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    pub profile_json: String,
    pub assigned_teams_json: String,
}

impl NewPlayerRow {
    /// Splits a player document into its stored columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded.
    pub fn from_player(player: &Player) -> Result<Self, PersistenceError> {
        let profile = Player {
            assigned_teams: Vec::new(),
            ..player.clone()
        };
        Ok(Self {
            player_id: player.id.clone(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            birthdate: format_birthdate(player.birthdate)?,
            profile_json: serde_json::to_string(&profile)?,
            assigned_teams_json: encode_assigned_teams(&player.assigned_teams)?,
        })
    }
}

/// Encodes the assignments column.
///
/// # Errors
///
/// Returns an error if the assignments cannot be encoded.
pub fn encode_assigned_teams(clubs: &[AssignedClub]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(clubs)?)
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = license_changes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LicenseChangeRow {
    pub change_id: i64,
    pub player_id: String,
    pub run_trigger: String,
    pub change_count: i32,
    pub change_json: String,
    pub recorded_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = license_changes)]
pub struct NewLicenseChangeRow {
    pub player_id: String,
    pub run_trigger: String,
    pub change_count: i32,
    pub change_json: String,
}

impl NewLicenseChangeRow {
    /// # Errors
    ///
    /// Returns an error if the change set cannot be encoded.
    pub fn from_change_set(changes: &PlayerChangeSet) -> Result<Self, PersistenceError> {
        let change_count = i32::try_from(changes.changes.len())
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        Ok(Self {
            player_id: changes.player_id.clone(),
            run_trigger: changes.trigger.as_str().to_string(),
            change_count,
            change_json: serde_json::to_string(changes)?,
        })
    }
}

/// A change set as read back from the change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredChangeSet {
    pub change_id: i64,
    /// `CURRENT_TIMESTAMP` of the insert, UTC.
    pub recorded_at: String,
    pub change_set: PlayerChangeSet,
}

impl TryFrom<LicenseChangeRow> for StoredChangeSet {
    type Error = PersistenceError;

    fn try_from(row: LicenseChangeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            change_id: row.change_id,
            recorded_at: row.recorded_at,
            change_set: serde_json::from_str(&row.change_json)?,
        })
    }
}
