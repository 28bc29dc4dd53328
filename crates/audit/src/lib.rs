// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Records of what a licensing run changed.
//!
//! Every persisted run produces one [`PlayerChangeSet`] per player. A change
//! set holds one [`LicenseChange`] per license whose classification or
//! validation outcome differs between the stored and the recomputed
//! document. Runs that change nothing produce an empty set.

use bishl_licensing_domain::{
    AssignedTeam, InvalidReasonCode, LicenseStatus, LicenseType, Player,
};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// What initiated a licensing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    /// A single player was revalidated on request.
    Revalidation,
    /// The batch run over every stored player.
    Bootstrap,
    /// A federation roster sync touched the player.
    RosterImport,
}

impl Trigger {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Revalidation => "REVALIDATION",
            Self::Bootstrap => "BOOTSTRAP",
            Self::RosterImport => "ROSTER_IMPORT",
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The engine-owned fields of one license at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSnapshot {
    pub license_type: LicenseType,
    pub status: LicenseStatus,
    pub invalid_reason_codes: Vec<InvalidReasonCode>,
}

impl LicenseSnapshot {
    /// Captures the classification and validation outcome of `team`.
    #[must_use]
    pub fn of(team: &AssignedTeam) -> Self {
        Self {
            license_type: team.license_type,
            status: team.status,
            invalid_reason_codes: team.invalid_reason_codes.clone(),
        }
    }
}

/// How a license differs between two versions of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// One license whose state differs between two versions of a player.
///
/// A license is identified by its club and team ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseChange {
    pub club_id: String,
    pub team_id: String,
    pub team_name: String,
    /// `None` when the license did not exist before.
    pub before: Option<LicenseSnapshot>,
    /// `None` when the license was removed.
    pub after: Option<LicenseSnapshot>,
}

impl LicenseChange {
    /// Classifies the change.
    ///
    /// # Returns
    ///
    /// `Added` without a `before` snapshot, `Removed` without an `after`
    /// snapshot, `Modified` otherwise.
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        match (&self.before, &self.after) {
            (None, _) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Removed,
            (Some(_), Some(_)) => ChangeKind::Modified,
        }
    }
}

/// All license changes one run made to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerChangeSet {
    pub player_id: String,
    pub trigger: Trigger,
    pub changes: Vec<LicenseChange>,
}

impl PlayerChangeSet {
    /// Computes the changes between two versions of the same player.
    ///
    /// Licenses present in both versions are compared on license type,
    /// status and reason codes. Licenses present in only one version are
    /// reported as added or removed. Changes follow the document order of
    /// `after`, with removals last.
    ///
    /// # Arguments
    ///
    /// * `trigger` - What initiated the run
    /// * `before` - The stored player
    /// * `after` - The recomputed player
    #[must_use]
    pub fn diff(trigger: Trigger, before: &Player, after: &Player) -> Self {
        let find = |player: &Player, club_id: &str, team_id: &str| {
            player
                .licenses()
                .find(|(c, t)| c.club_id == club_id && t.team_id == team_id)
                .map(|(_, t)| LicenseSnapshot::of(t))
        };

        let mut changes: Vec<LicenseChange> = Vec::new();

        for (club, team) in after.licenses() {
            let now = LicenseSnapshot::of(team);
            let was = find(before, &club.club_id, &team.team_id);
            if was.as_ref() != Some(&now) {
                changes.push(LicenseChange {
                    club_id: club.club_id.clone(),
                    team_id: team.team_id.clone(),
                    team_name: team.team_name.clone(),
                    before: was,
                    after: Some(now),
                });
            }
        }

        for (club, team) in before.licenses() {
            if find(after, &club.club_id, &team.team_id).is_none() {
                changes.push(LicenseChange {
                    club_id: club.club_id.clone(),
                    team_id: team.team_id.clone(),
                    team_name: team.team_name.clone(),
                    before: Some(LicenseSnapshot::of(team)),
                    after: None,
                });
            }
        }

        Self {
            player_id: after.id.clone(),
            trigger,
            changes,
        }
    }

    /// Whether the run left the player untouched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of licenses present in both versions whose state changed.
    #[must_use]
    pub fn modified_count(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.kind() == ChangeKind::Modified)
            .count()
    }
}
