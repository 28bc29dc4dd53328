// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `players`: inserting players and rewriting their assignments
//! - `license_changes`: appending to the change log

pub mod license_changes;
pub mod players;

pub use license_changes::record_license_changes;
pub use players::{insert_player, update_assigned_teams};
