// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{LicensingConfig, LicensingEngine};
use bishl_licensing_domain::{
    AssignedClub, AssignedTeam, ClubType, InvalidReasonCode, LicenseStatus, LicenseType, Player,
    Sex, Source, Suspension, TeamType,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const SEASON: Date = date!(2026 - 10 - 18);

pub fn create_test_engine() -> LicensingEngine {
    LicensingEngine::new(LicensingConfig::bishl_default(SEASON))
}

/// Age 15 in the season: U16, not over-age.
pub fn create_u16_boy(clubs: Vec<AssignedClub>) -> Player {
    create_player(date!(2011 - 04 - 01), Sex::Male, clubs)
}

/// Age 14, born after the cutoff: U16 and over-age.
pub fn create_late_born_u16_boy(clubs: Vec<AssignedClub>) -> Player {
    create_player(date!(2012 - 10 - 01), Sex::Male, clubs)
}

pub fn create_player(birthdate: Date, sex: Sex, clubs: Vec<AssignedClub>) -> Player {
    let mut player = Player::new("player-1", "Max", "Muster", birthdate, sex);
    player.assigned_teams = clubs;
    player
}

pub fn club(club_id: &str, teams: Vec<AssignedTeam>) -> AssignedClub {
    AssignedClub::new(club_id, &format!("Club {club_id}"), teams)
}

pub fn club_of_type(club_id: &str, club_type: ClubType, teams: Vec<AssignedTeam>) -> AssignedClub {
    let mut club = club(club_id, teams);
    club.club_type = club_type;
    club
}

/// An unclassified BISHL team with a plain pass number.
pub fn team(team_id: &str, age_group: &str) -> AssignedTeam {
    AssignedTeam::new(team_id, &format!("Team {team_id}"), age_group, "10001")
}

pub fn typed_team(team_id: &str, age_group: &str, license_type: LicenseType) -> AssignedTeam {
    let mut team = team(team_id, age_group);
    team.license_type = license_type;
    team
}

pub fn with_pass_no(mut team: AssignedTeam, pass_no: &str) -> AssignedTeam {
    team.pass_no = pass_no.to_string();
    team
}

pub fn from_ishd(mut team: AssignedTeam) -> AssignedTeam {
    team.source = Source::Ishd;
    team
}

pub fn hobby(mut team: AssignedTeam) -> AssignedTeam {
    team.team_type = TeamType::Hobby;
    team
}

pub fn modified_at(mut team: AssignedTeam, at: OffsetDateTime) -> AssignedTeam {
    team.modify_date = Some(at);
    team
}

/// Pins a team with a state the engine would never produce on its own.
pub fn pinned(mut team: AssignedTeam) -> AssignedTeam {
    team.admin_override = true;
    team.status = LicenseStatus::Invalid;
    team.invalid_reason_codes = vec![InvalidReasonCode::Suspended];
    team
}

pub fn suspension(start: Date, end: Option<Date>, team_ids: Option<&[&str]>) -> Suspension {
    Suspension {
        start_date: start,
        end_date: end,
        global_lock: team_ids.map(|_| false),
        team_ids: team_ids
            .unwrap_or_default()
            .iter()
            .map(|t| (*t).to_string())
            .collect(),
        reason: None,
    }
}

pub const EARLY: OffsetDateTime = datetime!(2026-01-10 09:00 UTC);
pub const LATE: OffsetDateTime = datetime!(2026-03-10 09:00 UTC);

/// Finds a team by id anywhere on the player.
pub fn find<'a>(player: &'a Player, team_id: &str) -> &'a AssignedTeam {
    player
        .licenses()
        .map(|(_, t)| t)
        .find(|t| t.team_id == team_id)
        .unwrap()
}

pub fn codes(player: &Player, team_id: &str) -> Vec<InvalidReasonCode> {
    find(player, team_id).invalid_reason_codes.clone()
}

pub fn assert_valid(player: &Player, team_id: &str) {
    let team = find(player, team_id);
    assert_eq!(
        team.status,
        LicenseStatus::Valid,
        "{team_id} should be valid, codes: {:?}",
        team.invalid_reason_codes
    );
    assert!(team.invalid_reason_codes.is_empty());
}

pub fn assert_invalid_with(player: &Player, team_id: &str, code: InvalidReasonCode) {
    let team = find(player, team_id);
    assert_eq!(team.status, LicenseStatus::Invalid, "{team_id} should be invalid");
    assert!(
        team.invalid_reason_codes.contains(&code),
        "{team_id} should carry {code}, has {:?}",
        team.invalid_reason_codes
    );
}
