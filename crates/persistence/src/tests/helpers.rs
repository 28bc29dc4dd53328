// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bishl_licensing_audit::{PlayerChangeSet, Trigger};
use bishl_licensing_domain::{
    AssignedClub, AssignedTeam, LicenseStatus, LicenseType, Player, Sex, Suspension,
};
use time::macros::date;

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_player(id: &str) -> Player {
    let mut player = Player::new(id, "Lena", "Becker", date!(2010 - 05 - 20), Sex::Female);
    player.assigned_teams = vec![AssignedClub::new(
        "club-1",
        "ERC Ingolstadt",
        vec![AssignedTeam::new("team-1", "U16 A", "U16", "20001")],
    )];
    player.suspensions = vec![Suspension {
        start_date: date!(2026 - 01 - 01),
        end_date: Some(date!(2026 - 01 - 31)),
        global_lock: None,
        team_ids: Vec::new(),
        reason: Some("Match penalty".to_string()),
    }];
    player
}

/// The player after a run that validated its only license as PRIMARY.
pub fn licensed(player: &Player) -> Player {
    let mut after = player.clone();
    for club in &mut after.assigned_teams {
        for team in &mut club.teams {
            team.license_type = LicenseType::Primary;
            team.status = LicenseStatus::Valid;
        }
    }
    after
}

pub fn change_set(before: &Player, after: &Player, trigger: Trigger) -> PlayerChangeSet {
    PlayerChangeSet::diff(trigger, before, after)
}
