// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bishl_licensing_audit::Trigger;
use bishl_licensing_domain::{LicenseStatus, LicenseType};
use time::macros::date;

use super::helpers::{create_test_engine, create_test_persistence, create_u16_player, store};
use crate::{ApiError, BootstrapOptions, bootstrap_all_players, classification_stats};

fn seed(persistence: &mut bishl_licensing_persistence::Persistence, count: usize) {
    for i in 0..count {
        let player = create_u16_player(&format!("p-{i:02}"), "Jonas", &format!("Huber{i}"));
        store(persistence, &player);
    }
}

#[test]
fn test_default_batch_size_is_one_thousand() {
    assert_eq!(BootstrapOptions::default().batch_size, 1000);
}

#[test]
fn test_bootstrap_walks_every_page() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();
    seed(&mut persistence, 5);

    let summary =
        bootstrap_all_players(&mut persistence, &engine, BootstrapOptions::with_batch_size(2))
            .unwrap();

    assert_eq!(summary.processed, 5);
    assert_eq!(summary.modified, 5);
    assert_eq!(
        summary.modified_ids,
        ["p-00", "p-01", "p-02", "p-03", "p-04"]
    );
    assert!(summary.rejected.is_empty());

    let log = persistence.list_license_changes("p-03").unwrap();
    assert_eq!(log[0].change_set.trigger, Trigger::Bootstrap);
}

#[test]
fn test_bootstrap_handles_exact_page_multiple() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();
    seed(&mut persistence, 4);

    let summary =
        bootstrap_all_players(&mut persistence, &engine, BootstrapOptions::with_batch_size(2))
            .unwrap();

    assert_eq!(summary.processed, 4);
}

#[test]
fn test_second_bootstrap_changes_nothing() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();
    seed(&mut persistence, 3);
    bootstrap_all_players(&mut persistence, &engine, BootstrapOptions::default()).unwrap();

    let summary =
        bootstrap_all_players(&mut persistence, &engine, BootstrapOptions::default()).unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.modified, 0);
    assert_eq!(persistence.list_license_changes("p-00").unwrap().len(), 1);
}

#[test]
fn test_bootstrap_reports_and_skips_malformed_players() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();
    seed(&mut persistence, 2);
    let mut broken = create_u16_player("p-99", "Lukas", "Kaiser");
    broken.birthdate = date!(2030 - 01 - 01);
    store(&mut persistence, &broken);

    let summary =
        bootstrap_all_players(&mut persistence, &engine, BootstrapOptions::default()).unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.modified, 2);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].player_id, "p-99");
    assert!(persistence.list_license_changes("p-99").unwrap().is_empty());
}

#[test]
fn test_bootstrap_rejects_zero_batch_size() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();

    let result =
        bootstrap_all_players(&mut persistence, &engine, BootstrapOptions::with_batch_size(0));

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_classification_stats_totals_stored_licenses() {
    let mut persistence = create_test_persistence();
    let engine = create_test_engine();
    seed(&mut persistence, 3);

    let before = classification_stats(&mut persistence, 2).unwrap();
    assert_eq!(before.total_players, 3);
    assert_eq!(before.licenses_of_type(LicenseType::Unknown), 3);
    assert_eq!(before.licenses_with_status(LicenseStatus::Unknown), 3);

    bootstrap_all_players(&mut persistence, &engine, BootstrapOptions::default()).unwrap();
    let after = classification_stats(&mut persistence, 2).unwrap();

    assert_eq!(after.total_licenses, 3);
    assert_eq!(after.licenses_of_type(LicenseType::Primary), 3);
    assert_eq!(after.licenses_with_status(LicenseStatus::Valid), 3);
    assert_eq!(after.licenses_with_status(LicenseStatus::Unknown), 0);
}
