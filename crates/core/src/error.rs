// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bishl_licensing_domain::DomainError;
use thiserror::Error;

/// Errors that can occur before a player enters the engine.
///
/// Classification and validation never fail once a document is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The player document was rejected by input validation.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
}
