// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use bishl_licensing_audit::PlayerChangeSet;

use crate::backend::sqlite::last_insert_rowid;
use crate::data_models::NewLicenseChangeRow;
use crate::diesel_schema::license_changes;
use crate::error::PersistenceError;

/// Appends a change set to the log and returns its id.
///
/// # Errors
///
/// Returns an error if the player does not exist or the insert fails.
pub fn record_license_changes(
    conn: &mut SqliteConnection,
    changes: &PlayerChangeSet,
) -> Result<i64, PersistenceError> {
    let row = NewLicenseChangeRow::from_change_set(changes)?;

    diesel::insert_into(license_changes::table)
        .values(&row)
        .execute(conn)?;
    let change_id = last_insert_rowid(conn)?;

    debug!(
        change_id,
        player_id = %changes.player_id,
        trigger = %changes.trigger,
        count = changes.changes.len(),
        "License changes recorded"
    );
    Ok(change_id)
}
