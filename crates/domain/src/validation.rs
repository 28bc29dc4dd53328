// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Player;
use crate::wko::{WkoRule, same_age_group};
use std::collections::HashSet;
use time::Date;

/// Checks that a player document is complete enough to classify.
///
/// This is the fail-fast gate in front of the engine. It does not judge
/// eligibility; that is the validator's job.
///
/// # Arguments
///
/// * `player` - The player document
/// * `reference_date` - The date classification runs against
///
/// # Errors
///
/// Returns an error if:
/// - The player id, first name or last name is empty
/// - The birthdate is after the reference date
/// - A club has an empty id, or a team has an empty id or age group
/// - A team id appears twice within one club
/// - A suspension ends before it starts
pub fn validate_player_document(player: &Player, reference_date: Date) -> Result<(), DomainError> {
    // Rule: identity fields must be present
    if player.id.trim().is_empty() {
        return Err(DomainError::InvalidPlayer {
            player_id: player.id.clone(),
            reason: String::from("Player id cannot be empty"),
        });
    }
    if player.first_name.trim().is_empty() || player.last_name.trim().is_empty() {
        return Err(DomainError::InvalidPlayer {
            player_id: player.id.clone(),
            reason: String::from("First and last name are required"),
        });
    }

    if player.birthdate > reference_date {
        return Err(DomainError::BirthdateInFuture {
            player_id: player.id.clone(),
            birthdate: player.birthdate,
            reference_date,
        });
    }

    for club in &player.assigned_teams {
        if club.club_id.trim().is_empty() {
            return Err(DomainError::InvalidPlayer {
                player_id: player.id.clone(),
                reason: String::from("Assigned club without club id"),
            });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for team in &club.teams {
            let fail = |reason: &str| DomainError::InvalidAssignment {
                player_id: player.id.clone(),
                club_id: club.club_id.clone(),
                team_id: team.team_id.clone(),
                reason: reason.to_string(),
            };

            if team.team_id.trim().is_empty() {
                return Err(fail("Team id cannot be empty"));
            }
            if team.team_age_group.trim().is_empty() {
                return Err(fail("Team age group cannot be empty"));
            }
            if !seen.insert(team.team_id.as_str()) {
                return Err(fail("Team is assigned twice within the club"));
            }
        }
    }

    for suspension in &player.suspensions {
        if let Some(end) = suspension.end_date
            && end < suspension.start_date
        {
            return Err(DomainError::InvalidSuspension {
                player_id: player.id.clone(),
                reason: format!(
                    "Suspension ends ({end}) before it starts ({})",
                    suspension.start_date
                ),
            });
        }
    }

    Ok(())
}

/// Checks a list of rules for internal consistency.
///
/// # Errors
///
/// Returns an error if:
/// - The list is empty
/// - An age group key or sort order appears twice
/// - A rule's `min_age` exceeds its `max_age`
/// - A secondary or over-age rule targets an age group that is not defined
pub fn validate_rule_table(rules: &[WkoRule]) -> Result<(), DomainError> {
    if rules.is_empty() {
        return Err(DomainError::EmptyRuleTable);
    }

    let mut keys: Vec<&str> = Vec::with_capacity(rules.len());
    let mut orders: HashSet<u8> = HashSet::new();

    for rule in rules {
        if keys.iter().any(|k| same_age_group(k, &rule.age_group)) {
            return Err(DomainError::DuplicateAgeGroup(rule.age_group.clone()));
        }
        keys.push(&rule.age_group);

        if !orders.insert(rule.sort_order) {
            return Err(DomainError::DuplicateSortOrder {
                sort_order: rule.sort_order,
            });
        }

        if let Some(max_age) = rule.max_age
            && rule.min_age > max_age
        {
            return Err(DomainError::InvalidAgeRange {
                age_group: rule.age_group.clone(),
                min_age: rule.min_age,
                max_age,
            });
        }
    }

    for rule in rules {
        for target in rule
            .secondary_rules
            .iter()
            .chain(rule.over_age_rules.iter())
            .map(|r| &r.target_age_group)
        {
            if !keys.iter().any(|k| same_age_group(k, target)) {
                return Err(DomainError::UnknownTargetAgeGroup {
                    age_group: rule.age_group.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    Ok(())
}
