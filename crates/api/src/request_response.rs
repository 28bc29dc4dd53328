// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use bishl_licensing::ValidationReport;
use bishl_licensing_domain::{Player, Sex, TeamType};
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

time::serde::format_description!(ishd_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(
    ishd_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// Players loaded per page when walking the whole store.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Tuning for the bulk revalidation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Players loaded and processed per page.
    pub batch_size: usize,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BootstrapOptions {
    #[must_use]
    pub const fn with_batch_size(batch_size: usize) -> Self {
        Self { batch_size }
    }
}

/// A stored player the bootstrap run could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedPlayer {
    pub player_id: String,
    pub reason: String,
}

/// Outcome of a bulk revalidation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapSummary {
    /// Players run through the engine, rejected ones included.
    pub processed: usize,
    /// Players whose licenses changed and were written back.
    pub modified: usize,
    pub modified_ids: Vec<String>,
    /// Players whose stored document failed input validation.
    pub rejected: Vec<RejectedPlayer>,
}

/// A classified and validated player with its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLicensingResponse {
    pub player: Player,
    pub report: ValidationReport,
    /// Whether the result was written to the store.
    pub persisted: bool,
}

/// The club a federation roster belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterClub {
    pub club_id: String,
    pub club_name: String,
    #[serde(default)]
    pub club_alias: String,
    pub club_ishd_id: u32,
}

/// The team a federation roster belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterTeam {
    pub team_id: String,
    pub team_name: String,
    #[serde(default)]
    pub team_alias: String,
    pub team_ishd_id: String,
    pub team_age_group: String,
    #[serde(default)]
    pub team_type: TeamType,
    /// Assumed for players the roster creates; the federation does not send it.
    #[serde(default = "default_roster_sex")]
    pub sex: Sex,
}

const fn default_roster_sex() -> Sex {
    Sex::Male
}

/// One player entry as delivered by the federation roster API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IshdRosterPlayer {
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "ishd_date")]
    pub date_of_birth: Date,
    pub license_number: String,
    /// Local time of the federation's last edit, taken as UTC.
    #[serde(default, with = "ishd_timestamp::option")]
    pub last_modification: Option<PrimitiveDateTime>,
}

/// The full roster of one federation team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IshdRoster {
    pub club: RosterClub,
    pub team: RosterTeam,
    #[serde(default)]
    pub players: Vec<IshdRosterPlayer>,
}

/// What a roster sync did to one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterAction {
    /// The player was not stored and has been created.
    AddPlayer,
    /// A club assignment holding the roster team was added.
    AddClub,
    /// The roster team was added to an existing club assignment.
    AddTeam,
    /// The pass number or modification date of the assignment changed.
    UpdateTeam,
    /// The player left the roster; the team assignment was removed.
    RemoveTeam,
    /// The player left the roster and the club assignment became empty.
    RemoveClub,
    /// The player opted out of the sync.
    SkippedUnmanaged,
    /// The merged document failed input validation, or a new player's id is
    /// already taken; nothing was written.
    Rejected,
}

/// One line of the sync log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterLogEntry {
    pub player_id: String,
    pub first_name: String,
    pub last_name: String,
    pub action: RosterAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tuning for a roster sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Log what the sync would do without writing anything.
    pub dry_run: bool,
}

impl ImportOptions {
    #[must_use]
    pub const fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// Outcome of syncing one federation roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Nothing was written; the entries show what a real sync would do.
    #[serde(default)]
    pub dry_run: bool,
    pub entries: Vec<RosterLogEntry>,
}

impl ImportSummary {
    /// Number of log entries with the given action.
    #[must_use]
    pub fn count(&self, action: RosterAction) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }

    pub(crate) fn log(&mut self, player: &Player, action: RosterAction, detail: Option<String>) {
        self.entries.push(RosterLogEntry {
            player_id: player.id.clone(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            action,
            detail,
        });
    }
}
