// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural rules: license types, import sources, primaries and loans.

use std::cmp::Ordering;
use std::collections::HashSet;

use bishl_licensing_domain::{
    ClubType, InvalidReasonCode, LicenseRef, LicenseStatus, LicenseType, Player, Source,
    same_age_group,
};

use super::{Context, Evaluation};

/// Marks every open license VALID and clears its reason codes.
pub(crate) fn reset(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    for r in eval.open() {
        let team = eval.player.team_mut(r);
        team.status = LicenseStatus::Valid;
        team.invalid_reason_codes.clear();
    }
    eval.anchor = None;
    eval
}

pub(crate) fn check_unknown_types(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    for r in eval.open() {
        if eval.player.team(r).license_type == LicenseType::Unknown {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::UnknownLicenceType);
        }
    }
    eval
}

fn pool_key(player: &Player, r: LicenseRef) -> (ClubType, LicenseType) {
    (player.club(r).club_type, player.team(r).license_type)
}

/// An imported license never displaces a league-entered one of the same pool.
pub(crate) fn check_import_conflicts(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    let open = eval.open();
    let bishl_pools: HashSet<(ClubType, LicenseType)> = open
        .iter()
        .filter(|r| {
            let team = eval.player.team(**r);
            team.source == Source::Bishl && team.is_valid()
        })
        .map(|r| pool_key(&eval.player, *r))
        .collect();

    for r in open {
        if eval.player.team(r).source == Source::Ishd
            && bishl_pools.contains(&pool_key(&eval.player, r))
        {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::ImportConflict);
        }
    }
    eval
}

/// Preference order among competing primaries: source, then oldest
/// modification (undated last), then team alias.
fn primary_preference(player: &Player, a: LicenseRef, b: LicenseRef) -> Ordering {
    let (a, b) = (player.team(a), player.team(b));
    a.source
        .precedence()
        .cmp(&b.source.precedence())
        .then_with(|| match (a.modify_date, b.modify_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.team_alias.cmp(&b.team_alias))
}

/// At most one valid primary per club pool.
pub(crate) fn check_primaries(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    let primaries: Vec<LicenseRef> = eval
        .open()
        .into_iter()
        .filter(|r| {
            let team = eval.player.team(*r);
            team.license_type == LicenseType::Primary && team.is_valid()
        })
        .collect();

    let mut pools: Vec<ClubType> = primaries
        .iter()
        .map(|r| eval.player.club(*r).club_type)
        .collect();
    pools.sort();
    pools.dedup();

    for pool in pools {
        let mut candidates: Vec<LicenseRef> = primaries
            .iter()
            .copied()
            .filter(|r| eval.player.club(*r).club_type == pool)
            .collect();
        if candidates.len() < 2 {
            continue;
        }

        candidates.sort_by(|a, b| primary_preference(&eval.player, *a, *b));
        for r in candidates.into_iter().skip(1) {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::MultiplePrimary);
        }
    }
    eval
}

/// A player may hold one loan, alone in its club and in its age group.
pub(crate) fn check_loans(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    let open = eval.open();
    let loans: Vec<LicenseRef> = open
        .iter()
        .copied()
        .filter(|r| {
            let team = eval.player.team(*r);
            team.license_type == LicenseType::Loan && team.is_valid()
        })
        .collect();

    match loans.as_slice() {
        [] => {}
        [loan] => {
            let loan = *loan;
            let loan_age_group = eval.player.team(loan).team_age_group.clone();
            let mut age_group_clash = false;

            for r in open.into_iter().filter(|r| *r != loan) {
                if r.club == loan.club {
                    eval.player
                        .team_mut(r)
                        .invalidate(InvalidReasonCode::LoanClubConflict);
                } else if same_age_group(&eval.player.team(r).team_age_group, &loan_age_group) {
                    age_group_clash = true;
                }
            }

            if age_group_clash {
                eval.player
                    .team_mut(loan)
                    .invalidate(InvalidReasonCode::LoanAgeGroupConflict);
            }
        }
        _ => {
            for r in loans {
                eval.player
                    .team_mut(r)
                    .invalidate(InvalidReasonCode::TooManyLoan);
            }
        }
    }
    eval
}
