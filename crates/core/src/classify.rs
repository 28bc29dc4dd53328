// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! License type classification.
//!
//! The classifier fills in `licenseType` for assignments that do not have
//! one yet. It runs a fixed sequence of heuristics; each one only looks at
//! assignments that are still `UNKNOWN`, so earlier passes always win.
//! Assignments pinned by an administrator are invisible to every pass, and
//! LOAN and SPECIAL assignments are frozen.

use std::sync::Arc;

use bishl_licensing_domain::{
    ClubType, LicenseRef, LicenseType, Player, PlayerProfile, Source, WkoRuleTable,
};
use time::Date;
use tracing::debug;

/// Assigns license types using pass-number suffixes and the WKO rule table.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Arc<WkoRuleTable>,
}

impl Classifier {
    /// Creates a classifier over the given rule table.
    #[must_use]
    pub const fn new(rules: Arc<WkoRuleTable>) -> Self {
        Self { rules }
    }

    /// Classifies every open assignment of `player`.
    ///
    /// Only `licenseType` (and, for suffix hints, the owning club's
    /// `clubType`) is written. Status fields are left alone.
    ///
    /// # Arguments
    ///
    /// * `player` - The player to classify
    /// * `reference_date` - The date the player's age group is derived on
    ///
    /// # Returns
    ///
    /// A classified copy of the player.
    #[must_use]
    pub fn classify(&self, player: &Player, reference_date: Date) -> Player {
        let profile = PlayerProfile::derive(player, &self.rules, reference_date);
        let mut player = player.clone();
        let candidates = candidates(&player);

        if let [single] = candidates.as_slice() {
            classify_single(&mut player, *single, &self.rules, &profile);
            return player;
        }

        apply_suffix_hints(&mut player, &candidates);
        match_own_age_group(&mut player, &candidates, &profile);
        detect_overage(&mut player, &candidates, &self.rules, &profile);
        anchor_ishd_primaries(&mut player, &candidates);
        demote_in_primary_clubs(&mut player, &candidates);
        promote_last_unknown(&mut player, &candidates);

        debug!(
            player_id = %player.id,
            candidates = candidates.len(),
            unresolved = unknown(&player, &candidates).len(),
            "Classified licenses"
        );

        player
    }
}

/// Open assignments that are not frozen.
fn candidates(player: &Player) -> Vec<LicenseRef> {
    player
        .open_license_refs()
        .into_iter()
        .filter(|r| {
            !matches!(
                player.team(*r).license_type,
                LicenseType::Loan | LicenseType::Special
            )
        })
        .collect()
}

fn unknown(player: &Player, candidates: &[LicenseRef]) -> Vec<LicenseRef> {
    candidates
        .iter()
        .copied()
        .filter(|r| player.team(*r).license_type == LicenseType::Unknown)
        .collect()
}

/// A lone assignment is typed by comparing age groups.
fn classify_single(
    player: &mut Player,
    r: LicenseRef,
    rules: &WkoRuleTable,
    profile: &PlayerProfile,
) {
    if player.team(r).license_type != LicenseType::Unknown {
        return;
    }

    let team_age_group = player.team(r).team_age_group.clone();
    let own_rule = profile.rule(rules);

    let license_type = if profile.is_own_group(&team_age_group) {
        LicenseType::Primary
    } else if own_rule.is_some_and(|rule| {
        rule.over_age_rule_for(&team_age_group, profile.sex)
            .is_some()
    }) {
        LicenseType::Overage
    } else if own_rule.is_some_and(|rule| {
        rule.secondary_rule_for(&team_age_group, profile.sex)
            .is_some()
    }) {
        LicenseType::Secondary
    } else {
        LicenseType::Primary
    };

    player.team_mut(r).license_type = license_type;
}

/// `F` marks a development-squad primary, `A` a secondary, `L` a loan.
fn apply_suffix_hints(player: &mut Player, candidates: &[LicenseRef]) {
    for r in unknown(player, candidates) {
        let pass_no = player.team(r).pass_no.trim().to_uppercase();
        let (license_type, club_type) = match pass_no.chars().last() {
            Some('F') => (LicenseType::Primary, Some(ClubType::Development)),
            Some('A') => (LicenseType::Secondary, None),
            Some('L') => (LicenseType::Loan, Some(ClubType::Loan)),
            _ => continue,
        };

        player.team_mut(r).license_type = license_type;
        if let Some(club_type) = club_type {
            player.assigned_teams[r.club].club_type = club_type;
        }
    }
}

fn match_own_age_group(player: &mut Player, candidates: &[LicenseRef], profile: &PlayerProfile) {
    for r in unknown(player, candidates) {
        if profile.is_own_group(&player.team(r).team_age_group) {
            player.team_mut(r).license_type = LicenseType::Primary;
        }
    }
}

/// A team exactly one rank below the player's own group is a play-down.
fn detect_overage(
    player: &mut Player,
    candidates: &[LicenseRef],
    rules: &WkoRuleTable,
    profile: &PlayerProfile,
) {
    let Some(own_rank) = profile.sort_order else {
        return;
    };

    for r in unknown(player, candidates) {
        if rules.rank(&player.team(r).team_age_group) == own_rank.checked_add(1) {
            player.team_mut(r).license_type = LicenseType::Overage;
        }
    }
}

fn club_has_primary(player: &Player, candidates: &[LicenseRef], club: usize) -> bool {
    candidates
        .iter()
        .any(|r| r.club == club && player.team(*r).license_type == LicenseType::Primary)
}

fn clubs_of(candidates: &[LicenseRef]) -> Vec<usize> {
    let mut clubs: Vec<usize> = candidates.iter().map(|r| r.club).collect();
    clubs.dedup();
    clubs
}

/// In a club without a primary, the first imported assignment becomes one.
fn anchor_ishd_primaries(player: &mut Player, candidates: &[LicenseRef]) {
    for club in clubs_of(candidates) {
        if club_has_primary(player, candidates, club) {
            continue;
        }
        let first_import = unknown(player, candidates)
            .into_iter()
            .find(|r| r.club == club && player.team(*r).source == Source::Ishd);
        if let Some(r) = first_import {
            player.team_mut(r).license_type = LicenseType::Primary;
        }
    }
}

fn demote_in_primary_clubs(player: &mut Player, candidates: &[LicenseRef]) {
    for club in clubs_of(candidates) {
        if !club_has_primary(player, candidates, club) {
            continue;
        }
        for r in unknown(player, candidates) {
            if r.club == club {
                player.team_mut(r).license_type = LicenseType::Secondary;
            }
        }
    }
}

fn promote_last_unknown(player: &mut Player, candidates: &[LicenseRef]) {
    if let [last] = unknown(player, candidates).as_slice() {
        player.team_mut(*last).license_type = LicenseType::Primary;
    }
}
