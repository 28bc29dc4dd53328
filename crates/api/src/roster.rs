// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Merging a federation roster into stored player documents.
//!
//! Only assignments sourced from the federation are touched. Assignments a
//! league admin entered for the same team stay as they are, and classification
//! plus validation decide afterwards which of the two survives.

use bishl_licensing_domain::{AssignedClub, AssignedTeam, Player, Source};
use time::Date;

use crate::request_response::{IshdRoster, IshdRosterPlayer, RosterAction, RosterClub, RosterTeam};

/// Matching key of a player: trimmed, lower-cased names and the birthdate.
pub type Identity = (String, String, Date);

#[must_use]
pub fn roster_identity(entry: &IshdRosterPlayer) -> Identity {
    (
        entry.first_name.trim().to_lowercase(),
        entry.last_name.trim().to_lowercase(),
        entry.date_of_birth,
    )
}

/// Deterministic id for a player created by the sync.
///
/// Derived from the identity, so re-running a sync can never create the same
/// person twice.
#[must_use]
pub fn player_id_for(entry: &IshdRosterPlayer) -> String {
    let (first, last, birthdate) = roster_identity(entry);
    let slug = |s: &str| {
        s.split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    };
    format!("ishd-{}-{}-{birthdate}", slug(&last), slug(&first))
}

/// The assignment a roster entry stands for, unclassified.
#[must_use]
pub fn ishd_assignment(team: &RosterTeam, entry: &IshdRosterPlayer) -> AssignedTeam {
    let mut assignment = AssignedTeam::new(
        &team.team_id,
        &team.team_name,
        &team.team_age_group,
        entry.license_number.trim(),
    );
    if !team.team_alias.is_empty() {
        assignment.team_alias.clone_from(&team.team_alias);
    }
    assignment.team_ishd_id = Some(team.team_ishd_id.clone());
    assignment.team_type = team.team_type;
    assignment.source = Source::Ishd;
    assignment.modify_date = entry.last_modification.map(time::PrimitiveDateTime::assume_utc);
    assignment.active = true;
    assignment
}

fn club_assignment(club: &RosterClub, teams: Vec<AssignedTeam>) -> AssignedClub {
    let mut assigned = AssignedClub::new(&club.club_id, &club.club_name, teams);
    if !club.club_alias.is_empty() {
        assigned.club_alias.clone_from(&club.club_alias);
    }
    assigned.club_ishd_id = Some(club.club_ishd_id);
    assigned
}

/// A new player document for an entry no stored player matches.
#[must_use]
pub fn new_player(roster: &IshdRoster, entry: &IshdRosterPlayer) -> Player {
    let mut player = Player::new(
        &player_id_for(entry),
        entry.first_name.trim(),
        entry.last_name.trim(),
        entry.date_of_birth,
        roster.team.sex,
    );
    player.source = Source::Ishd;
    player.assigned_teams = vec![club_assignment(
        &roster.club,
        vec![ishd_assignment(&roster.team, entry)],
    )];
    player
}

/// Adds or refreshes the roster assignment on a stored player.
///
/// # Returns
///
/// What changed, or `None` when the player already holds the assignment
/// unchanged or holds a league-entered assignment for the team.
pub fn merge_entry(
    player: &mut Player,
    club: &RosterClub,
    assignment: AssignedTeam,
) -> Option<RosterAction> {
    let Some(assigned) = player
        .assigned_teams
        .iter_mut()
        .find(|c| c.club_id == club.club_id)
    else {
        player
            .assigned_teams
            .push(club_assignment(club, vec![assignment]));
        return Some(RosterAction::AddClub);
    };

    let Some(existing) = assigned
        .teams
        .iter_mut()
        .find(|t| t.team_id == assignment.team_id)
    else {
        assigned.teams.push(assignment);
        return Some(RosterAction::AddTeam);
    };

    if existing.source != Source::Ishd {
        return None;
    }
    if existing.pass_no == assignment.pass_no && existing.modify_date == assignment.modify_date {
        return None;
    }
    existing.pass_no = assignment.pass_no;
    existing.modify_date = assignment.modify_date;
    Some(RosterAction::UpdateTeam)
}

/// Removes the federation assignment of a team the player is no longer
/// rostered for. A club left without teams is dropped.
pub fn withdraw(player: &mut Player, club_id: &str, team_id: &str) -> Option<RosterAction> {
    let index = player
        .assigned_teams
        .iter()
        .position(|c| c.club_id == club_id)?;
    let club = &mut player.assigned_teams[index];

    let before = club.teams.len();
    club.teams
        .retain(|t| !(t.team_id == team_id && t.source == Source::Ishd));
    if club.teams.len() == before {
        return None;
    }

    if club.teams.is_empty() {
        player.assigned_teams.remove(index);
        Some(RosterAction::RemoveClub)
    } else {
        Some(RosterAction::RemoveTeam)
    }
}

/// Whether the player holds a federation assignment of this team.
#[must_use]
pub fn holds_ishd_assignment(player: &Player, club_id: &str, team_id: &str) -> bool {
    player
        .licenses()
        .any(|(c, t)| c.club_id == club_id && t.team_id == team_id && t.source == Source::Ishd)
}
