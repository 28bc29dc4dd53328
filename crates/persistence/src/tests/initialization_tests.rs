// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_persistence, create_test_player};
use crate::Persistence;

#[test]
fn test_persistence_initialization() {
    assert!(Persistence::new_in_memory().is_ok());
}

#[test]
fn test_migrations_create_an_empty_store() {
    let mut persistence = create_test_persistence();
    assert_eq!(persistence.count_players().unwrap(), 0);
    assert!(persistence.list_license_changes("nobody").unwrap().is_empty());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = create_test_persistence();
    let mut db2 = create_test_persistence();

    db1.insert_player(&create_test_player("p-1")).unwrap();

    assert_eq!(db1.count_players().unwrap(), 1);
    assert_eq!(db2.count_players().unwrap(), 0);
}

#[test]
fn test_file_database_survives_reopen() {
    let path = std::env::temp_dir().join(format!(
        "bishl-licensing-{}-reopen.sqlite",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence.insert_player(&create_test_player("p-1")).unwrap();
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.count_players().unwrap(), 1);
    assert!(reopened.get_player("p-1").unwrap().is_some());

    drop(reopened);
    let _ = std::fs::remove_file(&path);
}
