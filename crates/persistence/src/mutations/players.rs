// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info};

use bishl_licensing_domain::{AssignedClub, Player};

use crate::data_models::{NewPlayerRow, encode_assigned_teams};
use crate::diesel_schema::players;
use crate::error::PersistenceError;

/// Stores a new player document.
///
/// # Errors
///
/// Returns `PlayerAlreadyExists` if the id is taken, or an error if the
/// insert fails.
pub fn insert_player(conn: &mut SqliteConnection, player: &Player) -> Result<(), PersistenceError> {
    let row = NewPlayerRow::from_player(player)?;

    match diesel::insert_into(players::table).values(&row).execute(conn) {
        Ok(_) => {
            info!(player_id = %player.id, licenses = player.license_count(), "Player stored");
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::PlayerAlreadyExists(player.id.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Rewrites the assignments of a stored player.
///
/// This is the only write the licensing engine performs on a player; the
/// profile columns are left untouched.
///
/// # Errors
///
/// Returns `PlayerNotFound` if no row was updated, or an error if the
/// update fails.
pub fn update_assigned_teams(
    conn: &mut SqliteConnection,
    player_id: &str,
    clubs: &[AssignedClub],
) -> Result<(), PersistenceError> {
    let encoded = encode_assigned_teams(clubs)?;

    let updated = diesel::update(players::table)
        .filter(players::player_id.eq(player_id))
        .set((
            players::assigned_teams_json.eq(&encoded),
            players::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::PlayerNotFound(player_id.to_string()));
    }

    debug!(player_id, "Assignments updated");
    Ok(())
}
