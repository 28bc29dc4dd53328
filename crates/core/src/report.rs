// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use bishl_licensing_audit::PlayerChangeSet;
use bishl_licensing_domain::{AssignedTeam, LicenseStatus, LicenseType, Player};
use serde::{Deserialize, Serialize};

/// Summary of one validation run over one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub player_id: String,
    /// Licenses whose type, status or reason codes changed in this run.
    pub changed_license_count: usize,
    pub valid_license_count: usize,
    /// Every license that is not VALID.
    pub invalid_license_count: usize,
    /// One line per non-valid license.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Builds the report for a validated player.
    ///
    /// # Arguments
    ///
    /// * `player` - The player after classification and validation
    /// * `changes` - What the run changed compared to the stored player
    #[must_use]
    pub fn new(player: &Player, changes: &PlayerChangeSet) -> Self {
        let (valid, invalid): (Vec<&AssignedTeam>, Vec<&AssignedTeam>) =
            player.licenses().map(|(_, t)| t).partition(|t| t.is_valid());

        Self {
            player_id: player.id.clone(),
            changed_license_count: changes.changes.len(),
            valid_license_count: valid.len(),
            invalid_license_count: invalid.len(),
            errors: invalid.into_iter().map(describe).collect(),
        }
    }

    /// Whether every license of the player is valid.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.invalid_license_count == 0
    }
}

/// `"<team> (<TYPE>): CODE, CODE"`, or the status when no code was recorded.
fn describe(team: &AssignedTeam) -> String {
    let name = if team.team_name.is_empty() {
        &team.team_id
    } else {
        &team.team_name
    };
    let reasons = if team.invalid_reason_codes.is_empty() {
        team.status.to_string()
    } else {
        team.invalid_reason_codes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{name} ({}): {reasons}", team.license_type)
}

/// License totals by type and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationStats {
    pub total_players: usize,
    pub total_licenses: usize,
    pub by_license_type: BTreeMap<LicenseType, usize>,
    pub by_status: BTreeMap<LicenseStatus, usize>,
}

impl ClassificationStats {
    /// Adds one player's licenses to the totals.
    pub fn record(&mut self, player: &Player) {
        self.total_players += 1;
        for (_, team) in player.licenses() {
            self.total_licenses += 1;
            *self.by_license_type.entry(team.license_type).or_default() += 1;
            *self.by_status.entry(team.status).or_default() += 1;
        }
    }

    /// Licenses of the given type.
    #[must_use]
    pub fn licenses_of_type(&self, license_type: LicenseType) -> usize {
        self.by_license_type.get(&license_type).copied().unwrap_or(0)
    }

    /// Licenses with the given status.
    #[must_use]
    pub fn licenses_with_status(&self, status: LicenseStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

impl<'a> FromIterator<&'a Player> for ClassificationStats {
    fn from_iter<I: IntoIterator<Item = &'a Player>>(players: I) -> Self {
        let mut stats = Self::default();
        for player in players {
            stats.record(player);
        }
        stats
    }
}
