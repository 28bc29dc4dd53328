// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bishl_licensing_domain::{InvalidReasonCode, LicenseRef, LicenseType};

use super::{Anchor, AnchorKind, Context, Evaluation};

/// Finds the club(s) that play-up and play-down licenses are tied to.
///
/// Clubs holding a valid primary win. Without one, a player with exactly
/// one valid license is anchored to that license's club.
pub(crate) fn determine_anchor(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    let valid: Vec<LicenseRef> = eval
        .open()
        .into_iter()
        .filter(|r| eval.player.team(*r).is_valid())
        .collect();

    let mut primary_clubs: Vec<usize> = valid
        .iter()
        .filter(|r| eval.player.team(**r).license_type == LicenseType::Primary)
        .map(|r| r.club)
        .collect();
    primary_clubs.dedup();

    eval.anchor = if !primary_clubs.is_empty() {
        Some(Anchor {
            clubs: primary_clubs,
            kind: AnchorKind::Primary,
        })
    } else if let [sole] = valid.as_slice() {
        Some(Anchor {
            clubs: vec![sole.club],
            kind: AnchorKind::SoleValid(*sole),
        })
    } else {
        None
    };
    eval
}

/// Secondary and over-age licenses must sit in an anchor club.
///
/// Without an anchor there is nothing to compare against and the pass is a
/// no-op.
pub(crate) fn check_club_consistency(mut eval: Evaluation, _ctx: &Context<'_>) -> Evaluation {
    let Some(anchor) = eval.anchor.clone() else {
        return eval;
    };

    for r in eval.open() {
        let license_type = eval.player.team(r).license_type;
        if matches!(license_type, LicenseType::Secondary | LicenseType::Overage)
            && !anchor.contains(r.club)
        {
            eval.player
                .team_mut(r)
                .invalidate(InvalidReasonCode::ConflictingClub);
        }
    }
    eval
}
