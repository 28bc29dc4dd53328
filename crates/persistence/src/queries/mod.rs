// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `players`: player documents, identity lookup, keyset pages
//! - `license_changes`: the per-player change log

pub mod license_changes;
pub mod players;

pub use license_changes::list_license_changes;
pub use players::{
    count_players, find_players_assigned_to, find_players_born_on, get_player, load_players_page,
};
