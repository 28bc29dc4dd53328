// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bishl_licensing::CoreError;
use bishl_licensing_domain::DomainError;
use bishl_licensing_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No player is stored under this id.
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for {field}: {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The store failed.
    #[error("Persistence error: {0}")]
    Persistence(PersistenceError),
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::PlayerNotFound(id) => Self::PlayerNotFound(id),
            other => Self::Persistence(other),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// Document problems become `InvalidInput`, rule table problems
/// `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message = err.to_string();
    match err {
        DomainError::InvalidPlayer { .. } => ApiError::InvalidInput {
            field: String::from("player"),
            message,
        },
        DomainError::InvalidAssignment { .. } => ApiError::InvalidInput {
            field: String::from("assignedTeams"),
            message,
        },
        DomainError::InvalidSuspension { .. } => ApiError::InvalidInput {
            field: String::from("suspensions"),
            message,
        },
        DomainError::BirthdateInFuture { .. } => ApiError::InvalidInput {
            field: String::from("birthdate"),
            message,
        },
        DomainError::EmptyRuleTable
        | DomainError::DuplicateAgeGroup(_)
        | DomainError::DuplicateSortOrder { .. }
        | DomainError::UnknownTargetAgeGroup { .. }
        | DomainError::InvalidAgeRange { .. }
        | DomainError::RuleTableParse(_)
        | DomainError::RuleTableIo { .. } => ApiError::DomainRuleViolation {
            rule: String::from("wko_rule_table"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
