// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived player attributes: age group and over-age flag.
//!
//! Age groups use calendar-year cutoffs. The age of a player is the
//! reference year minus the birth year, regardless of the birthday.

use time::Date;

use crate::types::{Player, Sex};
use crate::wko::{MonthDay, WkoRule, WkoRuleTable};

/// Attributes of a player computed against a rule table and a reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub sex: Sex,
    /// Reference year minus birth year.
    pub age: i32,
    /// The natural age group; `None` when no rule covers the player.
    pub age_group: Option<String>,
    /// Rank of the natural age group.
    pub sort_order: Option<u8>,
    /// Whether the player may use over-age (play-down) licenses.
    pub over_age: bool,
}

impl PlayerProfile {
    /// Derives the profile of `player` on `reference_date`.
    #[must_use]
    pub fn derive(player: &Player, rules: &WkoRuleTable, reference_date: Date) -> Self {
        let age: i32 = reference_date.year() - player.birthdate.year();
        let rule: Option<&WkoRule> = rules.age_group_for(player.sex, age);
        let birthday = MonthDay {
            month: u8::from(player.birthdate.month()),
            day: player.birthdate.day(),
        };
        let over_age = rule.is_some_and(|r| {
            r.over_age_eligibility
                .iter()
                .any(|c| c.matches(player.sex, age, birthday))
        });

        Self {
            sex: player.sex,
            age,
            age_group: rule.map(|r| r.age_group.clone()),
            sort_order: rule.map(|r| r.sort_order),
            over_age,
        }
    }

    /// The rule of the player's own age group.
    #[must_use]
    pub fn rule<'a>(&self, rules: &'a WkoRuleTable) -> Option<&'a WkoRule> {
        self.age_group.as_deref().and_then(|g| rules.rule(g))
    }

    /// Whether `team_age_group` is the player's own group.
    #[must_use]
    pub fn is_own_group(&self, team_age_group: &str) -> bool {
        self.age_group
            .as_deref()
            .is_some_and(|g| crate::wko::same_age_group(g, team_age_group))
    }
}
