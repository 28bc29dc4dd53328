// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bishl_licensing::{LicensingConfig, LicensingEngine};
use bishl_licensing_domain::{AssignedClub, AssignedTeam, Player, Sex, TeamType};
use bishl_licensing_persistence::Persistence;
use time::Date;
use time::macros::{date, datetime};

use crate::{
    ApiError, ImportOptions, ImportSummary, IshdRoster, IshdRosterPlayer, RosterClub, RosterTeam,
    import_ishd_roster,
};

pub const SEASON: Date = date!(2026 - 10 - 18);

pub fn create_test_engine() -> LicensingEngine {
    LicensingEngine::new(LicensingConfig::bishl_default(SEASON))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// A 15 year old boy with one unclassified U16 license.
pub fn create_u16_player(id: &str, first_name: &str, last_name: &str) -> Player {
    let mut player = Player::new(id, first_name, last_name, date!(2011 - 04 - 01), Sex::Male);
    player.assigned_teams = vec![AssignedClub::new(
        "club-1",
        "EHC Klostersee",
        vec![AssignedTeam::new("team-1", "U16", "U16", "10001")],
    )];
    player
}

pub fn store(persistence: &mut Persistence, player: &Player) {
    persistence.insert_player(player).unwrap();
}

pub fn stored(persistence: &mut Persistence, player_id: &str) -> Player {
    persistence.get_player(player_id).unwrap().unwrap()
}

pub fn roster_club() -> RosterClub {
    RosterClub {
        club_id: String::from("club-ishd"),
        club_name: String::from("ESC Dresden"),
        club_alias: String::from("esc-dresden"),
        club_ishd_id: 42,
    }
}

pub fn roster_team() -> RosterTeam {
    RosterTeam {
        team_id: String::from("team-u16"),
        team_name: String::from("U16 I"),
        team_alias: String::from("u16-1"),
        team_ishd_id: String::from("U16 I"),
        team_age_group: String::from("U16"),
        team_type: TeamType::Competitive,
        sex: Sex::Male,
    }
}

pub fn roster_entry(first_name: &str, last_name: &str, license_number: &str) -> IshdRosterPlayer {
    IshdRosterPlayer {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth: date!(2011 - 04 - 01),
        license_number: license_number.to_string(),
        last_modification: Some(datetime!(2026-09-01 12:00:00)),
    }
}

pub fn roster(players: Vec<IshdRosterPlayer>) -> IshdRoster {
    IshdRoster {
        club: roster_club(),
        team: roster_team(),
        players,
    }
}

/// Runs a roster sync that writes its result.
pub fn sync(
    persistence: &mut Persistence,
    engine: &LicensingEngine,
    roster: &IshdRoster,
) -> Result<ImportSummary, ApiError> {
    import_ishd_roster(persistence, engine, roster, ImportOptions::default())
}
