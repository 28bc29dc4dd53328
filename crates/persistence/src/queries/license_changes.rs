// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{LicenseChangeRow, StoredChangeSet};
use crate::diesel_schema::license_changes;
use crate::error::PersistenceError;

/// Lists the recorded change sets of one player, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored change set is corrupt.
pub fn list_license_changes(
    conn: &mut SqliteConnection,
    player_id: &str,
) -> Result<Vec<StoredChangeSet>, PersistenceError> {
    let rows: Vec<LicenseChangeRow> = license_changes::table
        .filter(license_changes::player_id.eq(player_id))
        .order(license_changes::change_id.asc())
        .select(LicenseChangeRow::as_select())
        .load(conn)?;

    rows.into_iter().map(StoredChangeSet::try_from).collect()
}
