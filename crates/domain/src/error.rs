// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use time::Date;

/// Errors raised while checking input documents and rule tables.
///
/// Classification and validation themselves never fail. These errors only
/// surface at the boundary, before a document enters the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A player-level field is missing or malformed.
    #[error("Invalid player '{player_id}': {reason}")]
    InvalidPlayer {
        /// The player identifier (may be empty when that is the problem).
        player_id: String,
        /// Description of the problem.
        reason: String,
    },
    /// A team assignment is missing required data.
    #[error("Invalid assignment for player '{player_id}' (club '{club_id}', team '{team_id}'): {reason}")]
    InvalidAssignment {
        /// The player identifier.
        player_id: String,
        /// The club the assignment belongs to.
        club_id: String,
        /// The team identifier.
        team_id: String,
        /// Description of the problem.
        reason: String,
    },
    /// A suspension has an impossible date range.
    #[error("Invalid suspension for player '{player_id}': {reason}")]
    InvalidSuspension {
        /// The player identifier.
        player_id: String,
        /// Description of the problem.
        reason: String,
    },
    /// The birthdate lies after the reference date.
    #[error("Birthdate {birthdate} of player '{player_id}' is after the reference date {reference_date}")]
    BirthdateInFuture {
        /// The player identifier.
        player_id: String,
        /// The offending birthdate.
        birthdate: Date,
        /// The date classification runs against.
        reference_date: Date,
    },
    /// The rule table contains no rules.
    #[error("WKO rule table is empty")]
    EmptyRuleTable,
    /// Two rules share an age group key.
    #[error("Duplicate age group '{0}' in WKO rule table")]
    DuplicateAgeGroup(String),
    /// Two rules share a sort order.
    #[error("Duplicate sort order {sort_order} in WKO rule table")]
    DuplicateSortOrder {
        /// The duplicated rank.
        sort_order: u8,
    },
    /// A secondary or over-age rule targets an age group the table does not define.
    #[error("Age group '{age_group}' references unknown target age group '{target}'")]
    UnknownTargetAgeGroup {
        /// The rule holding the reference.
        age_group: String,
        /// The missing target.
        target: String,
    },
    /// An age range is inverted.
    #[error("Age group '{age_group}' has min age {min_age} above max age {max_age}")]
    InvalidAgeRange {
        /// The rule with the bad range.
        age_group: String,
        /// Lower bound.
        min_age: u8,
        /// Upper bound.
        max_age: u8,
    },
    /// The rule table document could not be parsed.
    #[error("Failed to parse WKO rule table: {0}")]
    RuleTableParse(String),
    /// The rule table file could not be read.
    #[error("Failed to read WKO rule table from '{path}': {reason}")]
    RuleTableIo {
        /// The file path.
        path: String,
        /// The I/O error message.
        reason: String,
    },
}
