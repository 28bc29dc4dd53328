// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The kind of license a player holds for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    /// Main home-club license for the natural age group.
    Primary,
    /// Play-up license in an older age group, tied to the primary club.
    Secondary,
    /// Play-down license in a younger age group.
    Overage,
    /// License at a club other than the primary club.
    Loan,
    /// Manually granted special license.
    Special,
    /// Not yet classified.
    #[default]
    Unknown,
}

impl LicenseType {
    /// All license types in report order.
    pub const ALL: [Self; 6] = [
        Self::Primary,
        Self::Secondary,
        Self::Overage,
        Self::Loan,
        Self::Special,
        Self::Unknown,
    ];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Secondary => "SECONDARY",
            Self::Overage => "OVERAGE",
            Self::Loan => "LOAN",
            Self::Special => "SPECIAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validation outcome of a single license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseStatus {
    /// The license may be used.
    Valid,
    /// At least one rule rejected the license.
    Invalid,
    /// Not yet validated.
    #[default]
    Unknown,
}

impl LicenseStatus {
    /// All statuses in report order.
    pub const ALL: [Self; 3] = [Self::Valid, Self::Invalid, Self::Unknown];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Invalid => "INVALID",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a license was marked invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvalidReasonCode {
    UnknownLicenceType,
    MultiplePrimary,
    TooManyLoan,
    LoanClubConflict,
    LoanAgeGroupConflict,
    ImportConflict,
    ConflictingClub,
    AgeGroupViolation,
    OverageNotAllowed,
    ExceedsWkoLimit,
    HobbyPlayerConflict,
    Suspended,
}

impl InvalidReasonCode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownLicenceType => "UNKNOWN_LICENCE_TYPE",
            Self::MultiplePrimary => "MULTIPLE_PRIMARY",
            Self::TooManyLoan => "TOO_MANY_LOAN",
            Self::LoanClubConflict => "LOAN_CLUB_CONFLICT",
            Self::LoanAgeGroupConflict => "LOAN_AGE_GROUP_CONFLICT",
            Self::ImportConflict => "IMPORT_CONFLICT",
            Self::ConflictingClub => "CONFLICTING_CLUB",
            Self::AgeGroupViolation => "AGE_GROUP_VIOLATION",
            Self::OverageNotAllowed => "OVERAGE_NOT_ALLOWED",
            Self::ExceedsWkoLimit => "EXCEEDS_WKO_LIMIT",
            Self::HobbyPlayerConflict => "HOBBY_PLAYER_CONFLICT",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl std::fmt::Display for InvalidReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an assignment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    /// Entered in the league system.
    #[default]
    Bishl,
    /// Imported from the federation (ISHD) roster sync.
    Ishd,
    /// Called up for a match.
    Called,
}

impl Source {
    /// Preference when several sources compete for the same slot (lower wins).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Bishl => 0,
            Self::Called => 1,
            Self::Ishd => 2,
        }
    }
}

/// Which pool of a club a license belongs to.
///
/// MAIN and DEVELOPMENT are independent pools for primary uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClubType {
    #[default]
    Main,
    Development,
    Loan,
}

/// Competitive or hobby team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamType {
    #[default]
    Competitive,
    Hobby,
}

/// Player sex as used by the WKO rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Playing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Skater,
    Goalie,
}

/// One team assignment (license) of a player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTeam {
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_ishd_id: Option<String>,
    #[serde(default)]
    pub team_type: TeamType,
    pub team_age_group: String,
    /// License number; its suffix carries classification hints.
    #[serde(default)]
    pub pass_no: String,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub license_type: LicenseType,
    #[serde(default)]
    pub status: LicenseStatus,
    #[serde(default)]
    pub invalid_reason_codes: Vec<InvalidReasonCode>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modify_date: Option<OffsetDateTime>,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<Date>,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<Date>,
    /// Pinned by an administrator: neither classification nor validation may touch it.
    #[serde(default)]
    pub admin_override: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_no: Option<u16>,
}

impl AssignedTeam {
    /// Creates an unclassified BISHL assignment.
    ///
    /// The team alias defaults to the team id.
    #[must_use]
    pub fn new(team_id: &str, team_name: &str, team_age_group: &str, pass_no: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
            team_name: team_name.to_string(),
            team_alias: team_id.to_string(),
            team_age_group: team_age_group.to_string(),
            pass_no: pass_no.to_string(),
            ..Self::default()
        }
    }

    /// Adds a reason code (once) and marks the license invalid.
    pub fn invalidate(&mut self, code: InvalidReasonCode) {
        self.status = LicenseStatus::Invalid;
        if !self.invalid_reason_codes.contains(&code) {
            self.invalid_reason_codes.push(code);
        }
    }

    /// Whether the license is currently valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status == LicenseStatus::Valid
    }
}

/// A club a player is assigned to, with the teams inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedClub {
    pub club_id: String,
    #[serde(default)]
    pub club_name: String,
    #[serde(default)]
    pub club_alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_ishd_id: Option<u32>,
    #[serde(default)]
    pub club_type: ClubType,
    #[serde(default)]
    pub teams: Vec<AssignedTeam>,
}

impl AssignedClub {
    /// Creates a MAIN club assignment with the given teams.
    #[must_use]
    pub fn new(club_id: &str, club_name: &str, teams: Vec<AssignedTeam>) -> Self {
        Self {
            club_id: club_id.to_string(),
            club_name: club_name.to_string(),
            club_alias: club_id.to_string(),
            teams,
            ..Self::default()
        }
    }
}

/// A date-ranged ban, global or scoped to specific teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suspension {
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    /// `None` or `Some(true)` locks every team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_lock: Option<bool>,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Suspension {
    /// Whether the suspension is in force on `date` (both ends inclusive).
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        self.start_date <= date && self.end_date.is_none_or(|end| date <= end)
    }

    /// Whether the suspension applies to every team of the player.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.global_lock.unwrap_or(true)
    }

    /// Whether the suspension applies to the given team.
    #[must_use]
    pub fn covers_team(&self, team_id: &str) -> bool {
        self.is_global() || self.team_ids.iter().any(|t| t == team_id)
    }
}

/// Addresses one license inside `Player::assigned_teams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LicenseRef {
    /// Index into `assigned_teams`.
    pub club: usize,
    /// Index into the club's `teams`.
    pub team: usize,
}

/// A player document with its roster assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub display_first_name: String,
    #[serde(default)]
    pub display_last_name: String,
    #[serde(with = "iso_date")]
    pub birthdate: Date,
    pub sex: Sex,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub assigned_teams: Vec<AssignedClub>,
    #[serde(default)]
    pub suspensions: Vec<Suspension>,
    /// Whether the federation sync may modify this player.
    #[serde(default = "default_managed_by_ishd", rename = "managedByISHD")]
    pub managed_by_ishd: bool,
}

const fn default_managed_by_ishd() -> bool {
    true
}

impl Player {
    /// Creates a player without assignments.
    ///
    /// Display names default to the legal names.
    #[must_use]
    pub fn new(id: &str, first_name: &str, last_name: &str, birthdate: Date, sex: Sex) -> Self {
        Self {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            display_first_name: first_name.to_string(),
            display_last_name: last_name.to_string(),
            birthdate,
            sex,
            position: Position::Skater,
            source: Source::Bishl,
            assigned_teams: Vec::new(),
            suspensions: Vec::new(),
            managed_by_ishd: true,
        }
    }

    /// References to every license, in document order.
    #[must_use]
    pub fn license_refs(&self) -> Vec<LicenseRef> {
        self.assigned_teams
            .iter()
            .enumerate()
            .flat_map(|(club, c)| (0..c.teams.len()).map(move |team| LicenseRef { club, team }))
            .collect()
    }

    /// References to every license not pinned by an administrator.
    #[must_use]
    pub fn open_license_refs(&self) -> Vec<LicenseRef> {
        self.license_refs()
            .into_iter()
            .filter(|r| !self.team(*r).admin_override)
            .collect()
    }

    /// Iterates over `(club, team)` pairs in document order.
    pub fn licenses(&self) -> impl Iterator<Item = (&AssignedClub, &AssignedTeam)> {
        self.assigned_teams
            .iter()
            .flat_map(|club| club.teams.iter().map(move |team| (club, team)))
    }

    /// Returns the club holding the referenced license.
    ///
    /// # Panics
    ///
    /// Panics if the reference does not point into this player.
    #[must_use]
    pub fn club(&self, r: LicenseRef) -> &AssignedClub {
        &self.assigned_teams[r.club]
    }

    /// Returns the referenced license.
    ///
    /// # Panics
    ///
    /// Panics if the reference does not point into this player.
    #[must_use]
    pub fn team(&self, r: LicenseRef) -> &AssignedTeam {
        &self.assigned_teams[r.club].teams[r.team]
    }

    /// Returns the referenced license mutably.
    ///
    /// # Panics
    ///
    /// Panics if the reference does not point into this player.
    pub fn team_mut(&mut self, r: LicenseRef) -> &mut AssignedTeam {
        &mut self.assigned_teams[r.club].teams[r.team]
    }

    /// Total number of licenses across all clubs.
    #[must_use]
    pub fn license_count(&self) -> usize {
        self.assigned_teams.iter().map(|c| c.teams.len()).sum()
    }

    /// Identity key used to match imported players: `(first, last, birthdate)`.
    #[must_use]
    pub fn identity(&self) -> (String, String, Date) {
        (
            self.first_name.trim().to_lowercase(),
            self.last_name.trim().to_lowercase(),
            self.birthdate,
        )
    }
}
