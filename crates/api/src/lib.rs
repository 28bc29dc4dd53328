// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service operations of the BISHL licensing engine.
//!
//! This crate sits between callers (the CLI, a future HTTP layer) and the
//! engine plus the store. It owns the decisions the engine leaves to its
//! caller: which players to load, when to write back, and how federation
//! rosters are merged into stored documents.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;
mod roster;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    bootstrap_all_players, check_player, classification_stats, import_ishd_roster,
    revalidate_player,
};
pub use request_response::{
    BootstrapOptions, BootstrapSummary, DEFAULT_BATCH_SIZE, ImportOptions, ImportSummary,
    IshdRoster, IshdRosterPlayer, PlayerLicensingResponse, RejectedPlayer, RosterAction,
    RosterClub, RosterLogEntry, RosterTeam,
};
pub use roster::player_id_for;
