// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! The license classification and validation engine.
//!
//! A player flows through two phases:
//!
//! 1. [`Classifier`] fills in missing license types
//! 2. [`Validator`] computes status and reason codes
//!
//! [`LicensingEngine`] runs both against one [`LicensingConfig`] and reports
//! what changed. Nothing in this crate performs I/O.

mod classify;
mod config;
mod engine;
mod error;
mod report;
mod validate;

#[cfg(test)]
mod tests;

pub use classify::Classifier;
pub use config::LicensingConfig;
pub use engine::{LicensingEngine, LicensingOutcome};
pub use error::CoreError;
pub use report::{ClassificationStats, ValidationReport};
pub use validate::{Anchor, AnchorKind, Context, Evaluation, PASSES, Pass, Validator};
