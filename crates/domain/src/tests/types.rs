// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AssignedClub, AssignedTeam, ClubType, InvalidReasonCode, LicenseRef, LicenseStatus,
    LicenseType, Player, Sex, Source, Suspension, TeamType,
};
use time::macros::date;

const PLAYER_DOCUMENT: &str = r#"{
    "_id": "64f0c0ffee",
    "firstName": "Lena",
    "lastName": "Berg",
    "birthdate": "2011-05-04",
    "sex": "FEMALE",
    "managedByISHD": false,
    "assignedTeams": [
        {
            "clubId": "club-a",
            "clubName": "Spreewölfe",
            "clubType": "DEVELOPMENT",
            "teams": [
                {
                    "teamId": "team-1",
                    "teamName": "U16 I",
                    "teamAlias": "u16-1",
                    "teamAgeGroup": "U16",
                    "teamType": "HOBBY",
                    "passNo": "4711A",
                    "source": "ISHD",
                    "licenseType": "SECONDARY",
                    "status": "INVALID",
                    "invalidReasonCodes": ["IMPORT_CONFLICT", "SUSPENDED"],
                    "modifyDate": "2026-02-01T10:00:00Z",
                    "validFrom": "2026-01-01",
                    "validTo": "2026-12-31",
                    "adminOverride": true
                }
            ]
        }
    ],
    "suspensions": [
        { "startDate": "2026-03-01", "globalLock": false, "teamIds": ["team-1"] }
    ]
}"#;

#[test]
fn test_player_document_deserializes_wire_names() {
    let player: Player = serde_json::from_str(PLAYER_DOCUMENT).unwrap();

    assert_eq!(player.id, "64f0c0ffee");
    assert_eq!(player.birthdate, date!(2011 - 05 - 04));
    assert_eq!(player.sex, Sex::Female);
    assert!(!player.managed_by_ishd);
    // display names are optional on the wire
    assert_eq!(player.display_first_name, "");

    let club: &AssignedClub = &player.assigned_teams[0];
    assert_eq!(club.club_type, ClubType::Development);

    let team: &AssignedTeam = &club.teams[0];
    assert_eq!(team.team_type, TeamType::Hobby);
    assert_eq!(team.source, Source::Ishd);
    assert_eq!(team.license_type, LicenseType::Secondary);
    assert_eq!(team.status, LicenseStatus::Invalid);
    assert_eq!(
        team.invalid_reason_codes,
        vec![InvalidReasonCode::ImportConflict, InvalidReasonCode::Suspended]
    );
    assert_eq!(team.valid_to, Some(date!(2026 - 12 - 31)));
    assert!(team.modify_date.is_some());
    assert!(team.admin_override);

    assert_eq!(player.suspensions.len(), 1);
    assert_eq!(player.suspensions[0].end_date, None);
}

#[test]
fn test_missing_classification_fields_default_to_unknown() {
    let json = r#"{"teamId": "t1", "teamAgeGroup": "U13"}"#;
    let team: AssignedTeam = serde_json::from_str(json).unwrap();

    assert_eq!(team.license_type, LicenseType::Unknown);
    assert_eq!(team.status, LicenseStatus::Unknown);
    assert_eq!(team.source, Source::Bishl);
    assert!(team.invalid_reason_codes.is_empty());
    assert!(!team.admin_override);
}

#[test]
fn test_managed_by_ishd_defaults_to_true() {
    let json = r#"{"_id": "p", "firstName": "A", "lastName": "B", "birthdate": "2000-01-01", "sex": "MALE"}"#;
    let player: Player = serde_json::from_str(json).unwrap();
    assert!(player.managed_by_ishd);
}

#[test]
fn test_reason_codes_serialize_to_wire_names() {
    let json = serde_json::to_string(&vec![
        InvalidReasonCode::UnknownLicenceType,
        InvalidReasonCode::LoanAgeGroupConflict,
        InvalidReasonCode::ExceedsWkoLimit,
    ])
    .unwrap();
    assert_eq!(
        json,
        r#"["UNKNOWN_LICENCE_TYPE","LOAN_AGE_GROUP_CONFLICT","EXCEEDS_WKO_LIMIT"]"#
    );
    assert_eq!(
        InvalidReasonCode::HobbyPlayerConflict.as_str(),
        "HOBBY_PLAYER_CONFLICT"
    );
}

#[test]
fn test_invalidate_records_each_code_once() {
    let mut team = AssignedTeam::new("t1", "Team 1", "U16", "123");
    team.status = LicenseStatus::Valid;

    team.invalidate(InvalidReasonCode::MultiplePrimary);
    team.invalidate(InvalidReasonCode::MultiplePrimary);
    team.invalidate(InvalidReasonCode::Suspended);

    assert_eq!(team.status, LicenseStatus::Invalid);
    assert_eq!(
        team.invalid_reason_codes,
        vec![InvalidReasonCode::MultiplePrimary, InvalidReasonCode::Suspended]
    );
}

#[test]
fn test_suspension_activity_is_inclusive() {
    let suspension = Suspension {
        start_date: date!(2026 - 03 - 01),
        end_date: Some(date!(2026 - 03 - 31)),
        global_lock: None,
        team_ids: Vec::new(),
        reason: None,
    };

    assert!(!suspension.is_active_on(date!(2026 - 02 - 28)));
    assert!(suspension.is_active_on(date!(2026 - 03 - 01)));
    assert!(suspension.is_active_on(date!(2026 - 03 - 31)));
    assert!(!suspension.is_active_on(date!(2026 - 04 - 01)));
    assert!(suspension.is_global());
    assert!(suspension.covers_team("any"));
}

#[test]
fn test_team_scoped_suspension_covers_listed_teams_only() {
    let suspension = Suspension {
        start_date: date!(2026 - 03 - 01),
        end_date: None,
        global_lock: Some(false),
        team_ids: vec![String::from("t1")],
        reason: Some(String::from("Game misconduct")),
    };

    assert!(suspension.is_active_on(date!(2030 - 01 - 01)));
    assert!(suspension.covers_team("t1"));
    assert!(!suspension.covers_team("t2"));
}

#[test]
fn test_license_refs_follow_document_order() {
    let mut player = Player::new("p1", "Max", "Muster", date!(2011 - 01 - 01), Sex::Male);
    let mut pinned = AssignedTeam::new("t2", "Team 2", "U19", "2");
    pinned.admin_override = true;
    player.assigned_teams = vec![
        AssignedClub::new(
            "c1",
            "Club 1",
            vec![AssignedTeam::new("t1", "Team 1", "U16", "1"), pinned],
        ),
        AssignedClub::new("c2", "Club 2", vec![AssignedTeam::new("t3", "Team 3", "U16", "3")]),
    ];

    assert_eq!(player.license_count(), 3);
    assert_eq!(
        player.license_refs(),
        vec![
            LicenseRef { club: 0, team: 0 },
            LicenseRef { club: 0, team: 1 },
            LicenseRef { club: 1, team: 0 },
        ]
    );
    assert_eq!(
        player.open_license_refs(),
        vec![LicenseRef { club: 0, team: 0 }, LicenseRef { club: 1, team: 0 }]
    );
    assert_eq!(player.team(LicenseRef { club: 1, team: 0 }).team_id, "t3");
}

#[test]
fn test_identity_ignores_case_and_whitespace() {
    let a = Player::new("p1", " Max ", "MUSTER", date!(2011 - 01 - 01), Sex::Male);
    let b = Player::new("p2", "max", "Muster", date!(2011 - 01 - 01), Sex::Male);
    let c = Player::new("p3", "max", "Muster", date!(2011 - 01 - 02), Sex::Male);

    assert_eq!(a.identity(), b.identity());
    assert_ne!(a.identity(), c.identity());
}

#[test]
fn test_source_precedence_prefers_bishl() {
    assert!(Source::Bishl.precedence() < Source::Called.precedence());
    assert!(Source::Called.precedence() < Source::Ishd.precedence());
}
