// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bishl_licensing_audit::Trigger;
use bishl_licensing_domain::{LicenseStatus, LicenseType};
use time::macros::date;

use super::helpers::{
    create_test_engine, create_test_persistence, create_u16_player, store, stored,
};
use crate::{ApiError, check_player, revalidate_player};

#[test]
fn test_check_player_classifies_without_storing() {
    let engine = create_test_engine();
    let player = create_u16_player("p-1", "Jonas", "Huber");

    let response = check_player(&engine, &player).unwrap();

    let team = &response.player.assigned_teams[0].teams[0];
    assert_eq!(team.license_type, LicenseType::Primary);
    assert_eq!(team.status, LicenseStatus::Valid);
    assert!(!response.persisted);
    assert!(response.report.is_clean());
    assert_eq!(response.report.changed_license_count, 1);
}

#[test]
fn test_check_player_rejects_future_birthdate() {
    let engine = create_test_engine();
    let mut player = create_u16_player("p-1", "Jonas", "Huber");
    player.birthdate = date!(2027 - 01 - 01);

    let result = check_player(&engine, &player);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "birthdate"
    ));
}

#[test]
fn test_revalidate_unknown_player_fails() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();

    let result = revalidate_player(&mut persistence, &engine, "missing");

    assert_eq!(result, Err(ApiError::PlayerNotFound(String::from("missing"))));
}

#[test]
fn test_revalidate_writes_back_changed_player() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();
    store(&mut persistence, &create_u16_player("p-1", "Jonas", "Huber"));

    let response = revalidate_player(&mut persistence, &engine, "p-1").unwrap();

    assert!(response.persisted);
    let saved = stored(&mut persistence, "p-1");
    assert_eq!(saved, response.player);
    assert_eq!(
        saved.assigned_teams[0].teams[0].license_type,
        LicenseType::Primary
    );

    let log = persistence.list_license_changes("p-1").unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].change_set.trigger, Trigger::Revalidation);
}

#[test]
fn test_revalidate_unchanged_player_writes_nothing() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();
    store(&mut persistence, &create_u16_player("p-1", "Jonas", "Huber"));
    revalidate_player(&mut persistence, &engine, "p-1").unwrap();

    let response = revalidate_player(&mut persistence, &engine, "p-1").unwrap();

    assert!(!response.persisted);
    assert_eq!(response.report.changed_license_count, 0);
    assert_eq!(persistence.list_license_changes("p-1").unwrap().len(), 1);
}
