// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Age-group compliance of valid licenses.
//!
//! Play-up needs a non-admin secondary rule of the player's own group. Play-down
//! needs the over-age flag and an over-age rule. Unknown groups never comply.

use bishl_licensing_domain::{InvalidReasonCode, LicenseRef, LicenseType, LicenseRule};

use super::{Context, Evaluation};

fn usable(rule: Option<&LicenseRule>) -> bool {
    rule.is_some_and(|r| !r.requires_admin)
}

/// Same group, or an older group reachable through a secondary rule.
fn may_play_up(ctx: &Context<'_>, team_age_group: &str) -> bool {
    if ctx.profile.is_own_group(team_age_group) {
        return true;
    }
    let (Some(own), Some(team_rank)) = (ctx.own_rule(), ctx.rules.rank(team_age_group)) else {
        return false;
    };
    team_rank < own.sort_order && usable(own.secondary_rule_for(team_age_group, ctx.profile.sex))
}

fn may_play_down(ctx: &Context<'_>, team_age_group: &str) -> bool {
    ctx.own_rule()
        .is_some_and(|own| usable(own.over_age_rule_for(team_age_group, ctx.profile.sex)))
}

fn valid_of_types(eval: &Evaluation, types: &[LicenseType]) -> Vec<LicenseRef> {
    eval.open()
        .into_iter()
        .filter(|r| {
            let team = eval.player.team(*r);
            team.is_valid() && types.contains(&team.license_type)
        })
        .collect()
}

pub(crate) fn check_primary_age_groups(mut eval: Evaluation, ctx: &Context<'_>) -> Evaluation {
    for r in valid_of_types(&eval, &[LicenseType::Primary]) {
        if !may_play_up(ctx, &eval.player.team(r).team_age_group) {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::AgeGroupViolation);
        }
    }
    eval
}

/// Over-age licenses skip the flag check when they are the player's only
/// valid license.
pub(crate) fn check_secondary_age_groups(mut eval: Evaluation, ctx: &Context<'_>) -> Evaluation {
    let licenses = valid_of_types(
        &eval,
        &[LicenseType::Secondary, LicenseType::Overage, LicenseType::Loan],
    );

    for r in licenses {
        let team = eval.player.team(r);
        let code = if team.license_type == LicenseType::Overage {
            let waived = eval.anchor.as_ref().is_some_and(|a| a.is_sole_license(r));
            let allowed =
                (ctx.profile.over_age || waived) && may_play_down(ctx, &team.team_age_group);
            (!allowed).then_some(InvalidReasonCode::OverageNotAllowed)
        } else {
            (!may_play_up(ctx, &team.team_age_group))
                .then_some(InvalidReasonCode::AgeGroupViolation)
        };

        if let Some(code) = code {
            eval.player.team_mut(r).invalidate(code);
        }
    }
    eval
}
