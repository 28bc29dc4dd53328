// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::helpers::{
    SEASON, assert_valid, club, codes, create_player, create_u16_boy, pinned, typed_team,
};
use crate::validate::{determine_anchor, enforce_known_status, reset};
use crate::{Anchor, AnchorKind, Context, Evaluation, PASSES, Validator};
use bishl_licensing_domain::{
    InvalidReasonCode, LicenseRef, LicenseRule, LicenseStatus, LicenseType, Sex, WkoRule,
    WkoRuleTable,
};
use time::macros::date;

use LicenseType::{Overage, Primary, Secondary, Unknown};

fn rule(age_group: &str, sort_order: u8, min_age: u8, max_age: Option<u8>) -> WkoRule {
    WkoRule {
        age_group: age_group.to_string(),
        sort_order,
        sex: vec![Sex::Male, Sex::Female],
        min_age,
        max_age,
        secondary_rules: Vec::new(),
        over_age_rules: Vec::new(),
        over_age_eligibility: Vec::new(),
        max_total_age_classes: BTreeMap::new(),
    }
}

/// Three groups where the youngest may play up into both older ones.
fn create_three_group_table() -> WkoRuleTable {
    let mut youth = rule("YOUTH", 3, 0, Some(14));
    youth.secondary_rules = vec![
        LicenseRule::new("JUNIOR", &[Sex::Male, Sex::Female]),
        LicenseRule::new("SENIOR", &[Sex::Male, Sex::Female]),
    ];
    WkoRuleTable::new(vec![
        rule("SENIOR", 1, 20, None),
        rule("JUNIOR", 2, 15, Some(19)),
        youth,
    ])
    .unwrap()
}

#[test]
fn test_passes_run_in_documented_order() {
    let names: Vec<&str> = PASSES.iter().map(|(name, _)| *name).collect();
    assert_eq!(names.first(), Some(&"reset"));
    assert_eq!(names.last(), Some(&"final_status"));

    let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert!(position("import_conflict") < position("primary_consistency"));
    assert!(position("loan_consistency") < position("anchor"));
    assert!(position("anchor") < position("club_consistency"));
    assert!(position("primary_age_group") < position("secondary_age_group"));
    assert!(position("target_quota") < position("total_age_classes"));
    assert!(position("hobby_conflict") < position("suspensions"));
}

#[test]
fn test_reset_skips_pinned_licenses() {
    let rules = WkoRuleTable::default();
    let locked = pinned(typed_team("t1", "U16", Primary));
    let mut t2 = typed_team("t2", "U16", Primary);
    t2.invalidate(InvalidReasonCode::Suspended);
    let player = create_u16_boy(vec![club("c1", vec![locked.clone(), t2])]);
    let ctx = Context::new(&player, &rules, SEASON);

    let eval = reset(Evaluation::new(player), &ctx);

    assert_eq!(eval.player.assigned_teams[0].teams[0], locked);
    assert_valid(&eval.player, "t2");
}

#[test]
fn test_anchor_prefers_primary_clubs() {
    let rules = WkoRuleTable::default();
    let player = create_u16_boy(vec![
        club("c1", vec![typed_team("t1", "U19", Secondary)]),
        club("c2", vec![typed_team("t2", "U16", Primary)]),
    ]);
    let ctx = Context::new(&player, &rules, SEASON);

    let eval = determine_anchor(reset(Evaluation::new(player), &ctx), &ctx);
    assert_eq!(
        eval.anchor,
        Some(Anchor {
            clubs: vec![1],
            kind: AnchorKind::Primary,
        })
    );
}

#[test]
fn test_anchor_falls_back_to_sole_valid_license() {
    let rules = WkoRuleTable::default();
    let player = create_u16_boy(vec![
        club("c1", vec![typed_team("t1", "U19", Unknown)]),
        club("c2", vec![typed_team("t2", "U13", Overage)]),
    ]);
    let ctx = Context::new(&player, &rules, SEASON);

    let mut eval = reset(Evaluation::new(player), &ctx);
    eval.player.assigned_teams[0].teams[0].invalidate(InvalidReasonCode::UnknownLicenceType);
    let eval = determine_anchor(eval, &ctx);

    let sole = LicenseRef { club: 1, team: 0 };
    let anchor = eval.anchor.unwrap();
    assert_eq!(anchor.kind, AnchorKind::SoleValid(sole));
    assert!(anchor.contains(1));
    assert!(anchor.is_sole_license(sole));
}

#[test]
fn test_no_anchor_without_primary_or_sole_license() {
    let rules = WkoRuleTable::default();
    let player = create_u16_boy(vec![
        club("c1", vec![typed_team("t1", "U19", Secondary)]),
        club("c2", vec![typed_team("t2", "U13", Overage)]),
    ]);
    let ctx = Context::new(&player, &rules, SEASON);

    let eval = determine_anchor(reset(Evaluation::new(player), &ctx), &ctx);
    assert_eq!(eval.anchor, None);
}

#[test]
fn test_final_status_resolves_unknown() {
    let rules = WkoRuleTable::default();
    let player = create_u16_boy(vec![club(
        "c1",
        vec![typed_team("t1", "U16", Primary), typed_team("t2", "U19", Unknown)],
    )]);
    let ctx = Context::new(&player, &rules, SEASON);

    // straight from the document: both statuses are still UNKNOWN
    let eval = enforce_known_status(Evaluation::new(player), &ctx);

    assert_eq!(eval.player.assigned_teams[0].teams[0].status, LicenseStatus::Valid);
    assert_eq!(
        eval.player.assigned_teams[0].teams[1].invalid_reason_codes,
        vec![InvalidReasonCode::UnknownLicenceType]
    );
}

#[test]
fn test_primary_group_is_kept_before_older_groups() {
    let validator = Validator::new(Arc::new(create_three_group_table()));
    let player = create_player(
        date!(2016 - 01 - 01),
        Sex::Female,
        vec![club(
            "c1",
            vec![
                typed_team("t1", "SENIOR", Secondary),
                typed_team("t2", "JUNIOR", Secondary),
                typed_team("t3", "YOUTH", Primary),
            ],
        )],
    );

    let validated = validator.validate(&player, SEASON);

    assert_valid(&validated, "t3");
    assert_valid(&validated, "t1");
    assert_eq!(codes(&validated, "t2"), vec![InvalidReasonCode::ExceedsWkoLimit]);
}

#[test]
fn test_alternate_table_changes_outcome() {
    // same player and licenses; a larger cap keeps all three groups
    let mut rules: Vec<WkoRule> = create_three_group_table().rules().to_vec();
    for rule in &mut rules {
        rule.max_total_age_classes.insert(Sex::Female, 3);
    }
    let validator = Validator::new(Arc::new(WkoRuleTable::new(rules).unwrap()));
    let player = create_player(
        date!(2016 - 01 - 01),
        Sex::Female,
        vec![club(
            "c1",
            vec![
                typed_team("t1", "SENIOR", Secondary),
                typed_team("t2", "JUNIOR", Secondary),
                typed_team("t3", "YOUTH", Primary),
            ],
        )],
    );

    let validated = validator.validate(&player, SEASON);
    assert!(validated.licenses().all(|(_, t)| t.is_valid()));
}
