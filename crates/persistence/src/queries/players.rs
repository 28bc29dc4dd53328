// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use bishl_licensing_domain::Player;

use crate::data_models::PlayerRow;
use crate::diesel_schema::players;
use crate::error::PersistenceError;

/// Retrieves a player document by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored document is corrupt.
/// Returns `Ok(None)` if no player has this id.
pub fn get_player(
    conn: &mut SqliteConnection,
    player_id: &str,
) -> Result<Option<Player>, PersistenceError> {
    debug!(player_id, "Looking up player");

    players::table
        .filter(players::player_id.eq(player_id))
        .select(PlayerRow::as_select())
        .first(conn)
        .optional()?
        .map(PlayerRow::into_player)
        .transpose()
}

/// Retrieves every player stored with this birthdate, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored document is corrupt.
pub fn find_players_born_on(
    conn: &mut SqliteConnection,
    birthdate: &str,
) -> Result<Vec<Player>, PersistenceError> {
    let rows: Vec<PlayerRow> = players::table
        .filter(players::birthdate.eq(birthdate))
        .order(players::player_id.asc())
        .select(PlayerRow::as_select())
        .load(conn)?;

    rows.into_iter().map(PlayerRow::into_player).collect()
}

/// Retrieves every player whose assignments mention `team_id`, ordered by id.
///
/// Matches the encoded `"teamId":"<id>"` pair in the assignments column, so
/// the result can hold false positives (`LIKE` ignores ASCII case). Callers
/// confirm the assignment on the decoded document.
///
/// # Errors
///
/// Returns an error if the query fails or a stored document is corrupt.
pub fn find_players_assigned_to(
    conn: &mut SqliteConnection,
    team_id: &str,
) -> Result<Vec<Player>, PersistenceError> {
    let encoded = format!("\"teamId\":{}", serde_json::to_string(team_id)?);
    let pattern = format!("%{}%", escape_like(&encoded));

    let rows: Vec<PlayerRow> = players::table
        .filter(players::assigned_teams_json.like(pattern).escape('\\'))
        .order(players::player_id.asc())
        .select(PlayerRow::as_select())
        .load(conn)?;

    debug!(team_id, candidates = rows.len(), "Loaded team holders");
    rows.into_iter().map(PlayerRow::into_player).collect()
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Loads up to `limit` players ordered by id, starting after `after`.
///
/// Keyset paging keeps each page a single indexed range scan regardless of
/// how far into the table the caller is.
///
/// # Errors
///
/// Returns an error if the query fails or a stored document is corrupt.
pub fn load_players_page(
    conn: &mut SqliteConnection,
    after: Option<&str>,
    limit: i64,
) -> Result<Vec<Player>, PersistenceError> {
    let mut query = players::table.select(PlayerRow::as_select()).into_boxed();
    if let Some(after) = after {
        query = query.filter(players::player_id.gt(after));
    }

    let rows: Vec<PlayerRow> = query
        .order(players::player_id.asc())
        .limit(limit)
        .load(conn)?;

    debug!(after, loaded = rows.len(), "Loaded player page");
    rows.into_iter().map(PlayerRow::into_player).collect()
}

/// Counts stored players.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_players(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(players::table.count().get_result(conn)?)
}
