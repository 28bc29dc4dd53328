// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The WKO (Wettkampfordnung) age-group rule table.
//!
//! One [`WkoRule`] exists per age group. Rules are ranked by `sort_order`,
//! where a lower value means an older group (`HERREN` = 1 … `U8` = 7).
//!
//! ## Rule kinds
//!
//! - `secondary_rules` permit playing up into an older group
//! - `over_age_rules` permit playing down into a younger group and require
//!   the player's over-age flag
//! - `over_age_eligibility` defines who in this group carries that flag
//! - `max_total_age_classes` caps distinct age groups per sex
//!
//! The table is immutable once built and is handed to the engine
//! explicitly, so alternate tables can be used side by side.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::Sex;
use crate::validation::validate_rule_table;

/// Cap on distinct age groups when a rule does not name one for a sex.
pub const DEFAULT_MAX_TOTAL_AGE_CLASSES: u8 = 2;

/// Whether two age group keys denote the same group.
#[must_use]
pub fn same_age_group(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Permission to hold a license in another age group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRule {
    pub target_age_group: String,
    pub sex: Vec<Sex>,
    /// Maximum number of licenses in the target group; `None` is unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_licenses: Option<u8>,
    /// Only usable through an administrator override.
    #[serde(default)]
    pub requires_admin: bool,
}

impl LicenseRule {
    /// Creates a rule without quota or admin requirement.
    #[must_use]
    pub fn new(target_age_group: &str, sex: &[Sex]) -> Self {
        Self {
            target_age_group: target_age_group.to_string(),
            sex: sex.to_vec(),
            max_licenses: None,
            requires_admin: false,
        }
    }

    /// Sets the quota.
    #[must_use]
    pub const fn with_max_licenses(mut self, max: u8) -> Self {
        self.max_licenses = Some(max);
        self
    }

    /// Marks the rule as admin-only.
    #[must_use]
    pub const fn admin_only(mut self) -> Self {
        self.requires_admin = true;
        self
    }

    fn applies(&self, target: &str, sex: Sex) -> bool {
        same_age_group(&self.target_age_group, target) && self.sex.contains(&sex)
    }
}

/// A calendar day within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u8,
    pub day: u8,
}

/// Criterion under which a player of an age group counts as over-age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverAgeCriterion {
    pub sex: Vec<Sex>,
    /// Oldest age (reference year minus birth year) the criterion covers.
    pub max_age: u8,
    /// If set, the birthday must fall strictly after this day of the year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born_after: Option<MonthDay>,
}

impl OverAgeCriterion {
    /// Whether a player with this sex, age and birthday matches.
    #[must_use]
    pub fn matches(&self, sex: Sex, age: i32, birthday: MonthDay) -> bool {
        self.sex.contains(&sex)
            && age <= i32::from(self.max_age)
            && self.born_after.is_none_or(|cutoff| birthday > cutoff)
    }
}

/// WKO configuration of one age group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WkoRule {
    pub age_group: String,
    pub sort_order: u8,
    pub sex: Vec<Sex>,
    pub min_age: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u8>,
    #[serde(default)]
    pub secondary_rules: Vec<LicenseRule>,
    #[serde(default)]
    pub over_age_rules: Vec<LicenseRule>,
    #[serde(default)]
    pub over_age_eligibility: Vec<OverAgeCriterion>,
    #[serde(default)]
    pub max_total_age_classes: BTreeMap<Sex, u8>,
}

impl WkoRule {
    /// Whether a player of this sex and age naturally belongs to this group.
    #[must_use]
    pub fn covers(&self, sex: Sex, age: i32) -> bool {
        self.sex.contains(&sex)
            && age >= i32::from(self.min_age)
            && self.max_age.is_none_or(|max| age <= i32::from(max))
    }

    /// The play-up rule for `target`, if any applies to `sex`.
    #[must_use]
    pub fn secondary_rule_for(&self, target: &str, sex: Sex) -> Option<&LicenseRule> {
        self.secondary_rules.iter().find(|r| r.applies(target, sex))
    }

    /// The play-down rule for `target`, if any applies to `sex`.
    #[must_use]
    pub fn over_age_rule_for(&self, target: &str, sex: Sex) -> Option<&LicenseRule> {
        self.over_age_rules.iter().find(|r| r.applies(target, sex))
    }

    /// Smallest `max_licenses` among all rules that apply to `target` for `sex`.
    #[must_use]
    pub fn quota_for(&self, target: &str, sex: Sex) -> Option<u8> {
        self.secondary_rules
            .iter()
            .chain(self.over_age_rules.iter())
            .filter(|r| r.applies(target, sex))
            .filter_map(|r| r.max_licenses)
            .min()
    }

    /// Cap on distinct age groups for `sex`.
    #[must_use]
    pub fn max_total_age_classes(&self, sex: Sex) -> u8 {
        self.max_total_age_classes
            .get(&sex)
            .copied()
            .unwrap_or(DEFAULT_MAX_TOTAL_AGE_CLASSES)
    }
}

/// The validated, immutable WKO rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WkoRule>", into = "Vec<WkoRule>")]
pub struct WkoRuleTable {
    /// Rules ordered by `sort_order`.
    rules: Vec<WkoRule>,
}

impl TryFrom<Vec<WkoRule>> for WkoRuleTable {
    type Error = DomainError;

    fn try_from(rules: Vec<WkoRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<WkoRuleTable> for Vec<WkoRule> {
    fn from(table: WkoRuleTable) -> Self {
        table.rules
    }
}

impl WkoRuleTable {
    /// Builds a table after checking it for consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, has duplicate keys or ranks,
    /// inverted age ranges, or rules that target unknown age groups.
    pub fn new(mut rules: Vec<WkoRule>) -> Result<Self, DomainError> {
        validate_rule_table(&rules)?;
        rules.sort_by_key(|r| r.sort_order);
        Ok(Self { rules })
    }

    /// Parses a table from a JSON array of rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the table is inconsistent.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let rules: Vec<WkoRule> =
            serde_json::from_str(json).map_err(|e| DomainError::RuleTableParse(e.to_string()))?;
        Self::new(rules)
    }

    /// Reads and parses a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DomainError::RuleTableIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// All rules, oldest group first.
    #[must_use]
    pub fn rules(&self) -> &[WkoRule] {
        &self.rules
    }

    /// Looks up the rule for an age group key (case-insensitive).
    #[must_use]
    pub fn rule(&self, age_group: &str) -> Option<&WkoRule> {
        self.rules
            .iter()
            .find(|r| same_age_group(&r.age_group, age_group))
    }

    /// Rank of an age group; unknown groups have no rank.
    #[must_use]
    pub fn rank(&self, age_group: &str) -> Option<u8> {
        self.rule(age_group).map(|r| r.sort_order)
    }

    /// The natural age group of a player with this sex and age.
    #[must_use]
    pub fn age_group_for(&self, sex: Sex, age: i32) -> Option<&WkoRule> {
        self.rules.iter().find(|r| r.covers(sex, age))
    }

    /// The league's standard table.
    #[must_use]
    pub fn bishl_default() -> Self {
        let both = [Sex::Male, Sex::Female];
        let all_two: BTreeMap<Sex, u8> = both
            .iter()
            .map(|s| (*s, DEFAULT_MAX_TOTAL_AGE_CLASSES))
            .collect();
        let sep_1 = Some(MonthDay { month: 8, day: 31 });

        let rules = vec![
            WkoRule {
                age_group: String::from("HERREN"),
                sort_order: 1,
                sex: vec![Sex::Male],
                min_age: 19,
                max_age: None,
                secondary_rules: Vec::new(),
                over_age_rules: Vec::new(),
                over_age_eligibility: Vec::new(),
                max_total_age_classes: all_two.clone(),
            },
            WkoRule {
                age_group: String::from("DAMEN"),
                sort_order: 2,
                sex: vec![Sex::Female],
                min_age: 19,
                max_age: None,
                secondary_rules: vec![LicenseRule::new("HERREN", &[Sex::Female])],
                over_age_rules: vec![LicenseRule::new("U19", &[Sex::Female]).with_max_licenses(2)],
                over_age_eligibility: vec![OverAgeCriterion {
                    sex: vec![Sex::Female],
                    max_age: 19,
                    born_after: None,
                }],
                max_total_age_classes: all_two.clone(),
            },
            WkoRule {
                age_group: String::from("U19"),
                sort_order: 3,
                sex: both.to_vec(),
                min_age: 16,
                max_age: Some(18),
                secondary_rules: vec![
                    LicenseRule::new("HERREN", &both),
                    LicenseRule::new("DAMEN", &[Sex::Female]),
                ],
                over_age_rules: vec![LicenseRule::new("U16", &both).with_max_licenses(3)],
                over_age_eligibility: vec![
                    OverAgeCriterion {
                        sex: vec![Sex::Female],
                        max_age: 18,
                        born_after: None,
                    },
                    OverAgeCriterion {
                        sex: vec![Sex::Male],
                        max_age: 16,
                        born_after: sep_1,
                    },
                ],
                max_total_age_classes: all_two.clone(),
            },
            WkoRule {
                age_group: String::from("U16"),
                sort_order: 4,
                sex: both.to_vec(),
                min_age: 14,
                max_age: Some(15),
                secondary_rules: vec![
                    LicenseRule::new("U19", &both),
                    LicenseRule::new("DAMEN", &[Sex::Female]).admin_only(),
                ],
                over_age_rules: vec![LicenseRule::new("U13", &both).with_max_licenses(3)],
                over_age_eligibility: vec![
                    OverAgeCriterion {
                        sex: vec![Sex::Female],
                        max_age: 15,
                        born_after: None,
                    },
                    OverAgeCriterion {
                        sex: vec![Sex::Male],
                        max_age: 14,
                        born_after: sep_1,
                    },
                ],
                max_total_age_classes: all_two.clone(),
            },
            WkoRule {
                age_group: String::from("U13"),
                sort_order: 5,
                sex: both.to_vec(),
                min_age: 12,
                max_age: Some(13),
                secondary_rules: vec![LicenseRule::new("U16", &both)],
                over_age_rules: vec![LicenseRule::new("U10", &both).with_max_licenses(3)],
                over_age_eligibility: vec![
                    OverAgeCriterion {
                        sex: vec![Sex::Female],
                        max_age: 13,
                        born_after: None,
                    },
                    OverAgeCriterion {
                        sex: vec![Sex::Male],
                        max_age: 12,
                        born_after: sep_1,
                    },
                ],
                max_total_age_classes: all_two.clone(),
            },
            WkoRule {
                age_group: String::from("U10"),
                sort_order: 6,
                sex: both.to_vec(),
                min_age: 10,
                max_age: Some(11),
                secondary_rules: vec![LicenseRule::new("U13", &both)],
                over_age_rules: vec![LicenseRule::new("U8", &both).with_max_licenses(2)],
                over_age_eligibility: vec![OverAgeCriterion {
                    sex: both.to_vec(),
                    max_age: 10,
                    born_after: sep_1,
                }],
                max_total_age_classes: all_two.clone(),
            },
            WkoRule {
                age_group: String::from("U8"),
                sort_order: 7,
                sex: both.to_vec(),
                min_age: 0,
                max_age: Some(9),
                secondary_rules: vec![LicenseRule::new("U10", &both).with_max_licenses(2)],
                over_age_rules: Vec::new(),
                over_age_eligibility: Vec::new(),
                max_total_age_classes: all_two,
            },
        ];

        Self { rules }
    }
}

impl Default for WkoRuleTable {
    fn default() -> Self {
        Self::bishl_default()
    }
}
