// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! WKO participation limits.

use bishl_licensing_domain::{
    DEFAULT_MAX_TOTAL_AGE_CLASSES, InvalidReasonCode, LicenseRef, LicenseStatus, LicenseType,
    Player, same_age_group,
};

use super::{Context, Evaluation};

/// Distinct age groups of `refs`, in first-seen order.
fn age_groups(player: &Player, refs: &[LicenseRef]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for r in refs {
        let group = &player.team(*r).team_age_group;
        if !groups.iter().any(|g| same_age_group(g, group)) {
            groups.push(group.clone());
        }
    }
    groups
}

fn in_group(player: &Player, refs: &[LicenseRef], group: &str) -> Vec<LicenseRef> {
    refs.iter()
        .copied()
        .filter(|r| same_age_group(&player.team(*r).team_age_group, group))
        .collect()
}

/// Caps valid licenses per foreign age group at the rule's `maxLicenses`.
///
/// The first licenses in document order are kept.
pub(crate) fn check_target_quotas(mut eval: Evaluation, ctx: &Context<'_>) -> Evaluation {
    let Some(own) = ctx.own_rule() else {
        return eval;
    };

    let valid: Vec<LicenseRef> = eval
        .open()
        .into_iter()
        .filter(|r| eval.player.team(*r).is_valid())
        .collect();

    for group in age_groups(&eval.player, &valid) {
        if ctx.profile.is_own_group(&group) {
            continue;
        }
        let Some(max) = own.quota_for(&group, ctx.profile.sex) else {
            continue;
        };

        for r in in_group(&eval.player, &valid, &group)
            .into_iter()
            .skip(usize::from(max))
        {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::ExceedsWkoLimit);
        }
    }
    eval
}

/// Valid, or invalid only because another primary of the pool won.
fn structurally_valid(player: &Player, r: LicenseRef) -> bool {
    let team = player.team(r);
    match team.status {
        LicenseStatus::Valid => true,
        LicenseStatus::Invalid => {
            team.invalid_reason_codes == [InvalidReasonCode::MultiplePrimary]
        }
        LicenseStatus::Unknown => false,
    }
}

/// Caps the number of distinct age groups a player takes part in.
///
/// Groups holding a valid primary are kept first, then older groups before
/// younger ones. Every license of a dropped group is invalidated.
pub(crate) fn check_total_age_classes(mut eval: Evaluation, ctx: &Context<'_>) -> Evaluation {
    let cap = ctx.own_rule().map_or(DEFAULT_MAX_TOTAL_AGE_CLASSES, |own| {
        own.max_total_age_classes(ctx.profile.sex)
    });

    let open = eval.open();
    let counted: Vec<LicenseRef> = open
        .iter()
        .copied()
        .filter(|r| structurally_valid(&eval.player, *r))
        .collect();

    let mut groups = age_groups(&eval.player, &counted);
    if groups.len() <= usize::from(cap) {
        return eval;
    }

    let holds_primary = |group: &str| {
        in_group(&eval.player, &counted, group).iter().any(|r| {
            let team = eval.player.team(*r);
            team.is_valid() && team.license_type == LicenseType::Primary
        })
    };
    // stable: ties keep first-seen order
    groups.sort_by_key(|g| (!holds_primary(g), ctx.rules.rank(g).unwrap_or(u8::MAX)));

    for group in groups.split_off(usize::from(cap)) {
        for r in in_group(&eval.player, &open, &group) {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::ExceedsWkoLimit);
        }
    }
    eval
}
