// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod age_group;
mod error;
mod types;
mod validation;
mod wko;

#[cfg(test)]
mod tests;

pub use age_group::PlayerProfile;
pub use error::DomainError;
pub use types::{
    AssignedClub, AssignedTeam, ClubType, InvalidReasonCode, LicenseRef, LicenseStatus,
    LicenseType, Player, Position, Sex, Source, Suspension, TeamType,
};
pub use validation::{validate_player_document, validate_rule_table};
pub use wko::{
    DEFAULT_MAX_TOTAL_AGE_CLASSES, LicenseRule, MonthDay, OverAgeCriterion, WkoRule,
    WkoRuleTable, same_age_group,
};
