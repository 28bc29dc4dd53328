// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Player, PlayerProfile, Sex, WkoRuleTable};
use time::Date;
use time::macros::date;

const SEASON: Date = date!(2026 - 10 - 18);

fn profile(birthdate: Date, sex: Sex) -> PlayerProfile {
    let player = Player::new("p1", "Test", "Player", birthdate, sex);
    PlayerProfile::derive(&player, &WkoRuleTable::default(), SEASON)
}

#[test]
fn test_age_ignores_birthday_within_year() {
    assert_eq!(profile(date!(2011 - 01 - 01), Sex::Male).age, 15);
    assert_eq!(profile(date!(2011 - 12 - 31), Sex::Male).age, 15);
}

#[test]
fn test_calendar_year_cutoffs() {
    let cases = [
        (date!(2007 - 12 - 31), Sex::Male, "HERREN"),
        (date!(2000 - 06 - 01), Sex::Female, "DAMEN"),
        (date!(2008 - 01 - 01), Sex::Male, "U19"),
        (date!(2010 - 12 - 31), Sex::Female, "U19"),
        (date!(2011 - 01 - 01), Sex::Male, "U16"),
        (date!(2012 - 12 - 31), Sex::Male, "U16"),
        (date!(2013 - 05 - 05), Sex::Female, "U13"),
        (date!(2016 - 05 - 05), Sex::Male, "U10"),
        (date!(2019 - 05 - 05), Sex::Male, "U8"),
    ];

    for (birthdate, sex, expected) in cases {
        let profile = profile(birthdate, sex);
        assert_eq!(
            profile.age_group.as_deref(),
            Some(expected),
            "born {birthdate} ({sex})"
        );
    }
}

#[test]
fn test_sort_order_follows_age_group() {
    let p = profile(date!(2011 - 03 - 01), Sex::Male);
    assert_eq!(p.sort_order, Some(4));
    assert!(p.is_own_group("u16"));
    assert!(!p.is_own_group("U19"));
    assert_eq!(
        p.rule(&WkoRuleTable::default()).map(|r| r.age_group.as_str()),
        Some("U16")
    );
}

#[test]
fn test_late_born_boys_are_over_age() {
    // youngest U19 year, born after the season cutoff
    assert!(profile(date!(2010 - 10 - 01), Sex::Male).over_age);
    assert!(!profile(date!(2010 - 08 - 31), Sex::Male).over_age);
    assert!(!profile(date!(2010 - 03 - 15), Sex::Male).over_age);
    // older U19 years never qualify
    assert!(!profile(date!(2009 - 12 - 01), Sex::Male).over_age);
}

#[test]
fn test_girls_are_over_age_across_their_group() {
    assert!(profile(date!(2011 - 01 - 01), Sex::Female).over_age);
    assert!(profile(date!(2008 - 01 - 01), Sex::Female).over_age);
    assert!(profile(date!(2007 - 01 - 01), Sex::Female).over_age);
    assert!(!profile(date!(2006 - 01 - 01), Sex::Female).over_age);
}

#[test]
fn test_youngest_group_is_never_over_age() {
    assert!(!profile(date!(2020 - 12 - 01), Sex::Male).over_age);
}

#[test]
fn test_uncovered_player_has_no_group() {
    let table = WkoRuleTable::new(vec![
        WkoRuleTable::default().rule("HERREN").unwrap().clone(),
    ])
    .unwrap();
    let player = Player::new("p1", "Test", "Player", date!(2015 - 01 - 01), Sex::Male);
    let profile = PlayerProfile::derive(&player, &table, SEASON);

    assert_eq!(profile.age_group, None);
    assert_eq!(profile.sort_order, None);
    assert!(!profile.over_age);
    assert!(!profile.is_own_group("HERREN"));
}
