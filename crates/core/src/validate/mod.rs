// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! License status validation.
//!
//! Validation is a pipeline of passes. Each pass takes the current
//! [`Evaluation`] by value and returns the next one, so every rule can be
//! exercised on its own and the order in [`PASSES`] is the whole story.
//!
//! ## Conventions shared by all passes
//!
//! - Assignments with `adminOverride` are never read or written.
//! - A pass only moves a license to INVALID and appends a reason code once.
//!   Only [`reset`] sets licenses back to VALID.
//! - Missing rule-table entries mean "not allowed".

mod age;
mod anchor;
mod status;
mod structure;
mod wko;

use std::sync::Arc;

use bishl_licensing_domain::{LicenseRef, Player, PlayerProfile, WkoRule, WkoRuleTable};
use time::Date;
use tracing::debug;

pub(crate) use age::{check_primary_age_groups, check_secondary_age_groups};
pub(crate) use anchor::{check_club_consistency, determine_anchor};
pub(crate) use status::{check_dates, check_hobby_conflict, check_suspensions, enforce_known_status};
pub(crate) use structure::{
    check_import_conflicts, check_loans, check_primaries, check_unknown_types, reset,
};
pub(crate) use wko::{check_target_quotas, check_total_age_classes};

/// Read-only inputs every pass sees.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    pub rules: &'a WkoRuleTable,
    pub profile: PlayerProfile,
    pub reference_date: Date,
}

impl<'a> Context<'a> {
    /// Builds the context for `player`.
    #[must_use]
    pub fn new(player: &Player, rules: &'a WkoRuleTable, reference_date: Date) -> Self {
        Self {
            rules,
            profile: PlayerProfile::derive(player, rules, reference_date),
            reference_date,
        }
    }

    /// The rule of the player's own age group.
    #[must_use]
    pub fn own_rule(&self) -> Option<&'a WkoRule> {
        self.profile.rule(self.rules)
    }
}

/// How the anchor club was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// One or more clubs hold a valid primary license.
    Primary,
    /// No valid primary exists; the player's only valid license defines the club.
    SoleValid(LicenseRef),
}

/// The club(s) secondary and over-age licenses must belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Indices into `Player::assigned_teams`.
    pub clubs: Vec<usize>,
    pub kind: AnchorKind,
}

impl Anchor {
    #[must_use]
    pub fn contains(&self, club: usize) -> bool {
        self.clubs.contains(&club)
    }

    /// Whether `r` is the single license the anchor was derived from.
    #[must_use]
    pub fn is_sole_license(&self, r: LicenseRef) -> bool {
        self.kind == AnchorKind::SoleValid(r)
    }
}

/// State threaded through the validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub player: Player,
    /// Set by [`determine_anchor`]; `None` before that pass or when no anchor exists.
    pub anchor: Option<Anchor>,
}

impl Evaluation {
    #[must_use]
    pub const fn new(player: Player) -> Self {
        Self {
            player,
            anchor: None,
        }
    }

    /// Licenses the passes may look at.
    #[must_use]
    pub fn open(&self) -> Vec<LicenseRef> {
        self.player.open_license_refs()
    }
}

/// A single validation rule.
pub type Pass = fn(Evaluation, &Context<'_>) -> Evaluation;

/// The validation rules in the order they run.
pub const PASSES: [(&str, Pass); 15] = [
    ("reset", reset),
    ("unknown_license_type", check_unknown_types),
    ("import_conflict", check_import_conflicts),
    ("primary_consistency", check_primaries),
    ("loan_consistency", check_loans),
    ("anchor", determine_anchor),
    ("club_consistency", check_club_consistency),
    ("primary_age_group", check_primary_age_groups),
    ("secondary_age_group", check_secondary_age_groups),
    ("target_quota", check_target_quotas),
    ("total_age_classes", check_total_age_classes),
    ("date_sanity", check_dates),
    ("hobby_conflict", check_hobby_conflict),
    ("suspensions", check_suspensions),
    ("final_status", enforce_known_status),
];

/// Computes `status` and `invalidReasonCodes` for classified licenses.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Arc<WkoRuleTable>,
}

impl Validator {
    /// Creates a validator over the given rule table.
    #[must_use]
    pub const fn new(rules: Arc<WkoRuleTable>) -> Self {
        Self { rules }
    }

    /// Runs every pass in order.
    ///
    /// # Arguments
    ///
    /// * `player` - A classified player
    /// * `reference_date` - The date age groups and suspensions are evaluated on
    ///
    /// # Returns
    ///
    /// A validated copy of the player.
    #[must_use]
    pub fn validate(&self, player: &Player, reference_date: Date) -> Player {
        let ctx = Context::new(player, &self.rules, reference_date);
        let mut eval = Evaluation::new(player.clone());

        for (name, pass) in PASSES {
            eval = pass(eval, &ctx);
            debug!(
                player_id = %eval.player.id,
                pass = name,
                invalid = eval.player.licenses().filter(|(_, t)| !t.is_valid()).count(),
                "Validation pass complete"
            );
        }

        eval.player
    }
}
