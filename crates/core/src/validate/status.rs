// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bishl_licensing_domain::{InvalidReasonCode, LicenseStatus, LicenseType, TeamType};

use super::{Context, Evaluation};

/// A validity window that ends before it starts is an import error.
pub(crate) fn check_dates(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    for r in eval.open() {
        let team = eval.player.team(r);
        if let (Some(from), Some(to)) = (team.valid_from, team.valid_to)
            && from > to
        {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::ImportConflict);
        }
    }
    eval
}

/// Hobby and competitive play exclude each other.
pub(crate) fn check_hobby_conflict(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    let open = eval.open();
    let has_valid = |team_type: TeamType| {
        open.iter().any(|r| {
            let team = eval.player.team(*r);
            team.is_valid() && team.team_type == team_type
        })
    };

    if has_valid(TeamType::Hobby) && has_valid(TeamType::Competitive) {
        for r in open {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::HobbyPlayerConflict);
        }
    }
    eval
}

pub(crate) fn check_suspensions(mut eval: Evaluation, ctx: &Context<'_>) -> Evaluation {
    let active: Vec<_> = eval
        .player
        .suspensions
        .iter()
        .filter(|s| s.is_active_on(ctx.reference_date))
        .cloned()
        .collect();
    if active.is_empty() {
        return eval;
    }

    for r in eval.open() {
        let team_id = eval.player.team(r).team_id.clone();
        if active.iter().any(|s| s.covers_team(&team_id)) {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::Suspended);
        }
    }
    eval
}

/// No open license leaves validation with an UNKNOWN status.
pub(crate) fn enforce_known_status(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    for r in eval.open() {
        let team = eval.player.team_mut(r);
        if team.status != LicenseStatus::Unknown {
            continue;
        }
        if team.license_type == LicenseType::Unknown {
            team.invalidate(InvalidReasonCode::UnknownLicenceType);
        } else {
            team.status = LicenseStatus::Valid;
        }
    }
    eval
}
