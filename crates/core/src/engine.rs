// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bishl_licensing_audit::{PlayerChangeSet, Trigger};
use bishl_licensing_domain::{Player, validate_player_document};
use tracing::{debug, info};

use crate::classify::Classifier;
use crate::config::LicensingConfig;
use crate::error::CoreError;
use crate::report::ValidationReport;
use crate::validate::Validator;

/// The result of running a player through the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensingOutcome {
    /// The classified and validated player.
    pub player: Player,
    pub report: ValidationReport,
    /// License changes relative to the input document.
    pub changes: PlayerChangeSet,
}

impl LicensingOutcome {
    /// Whether the run changed anything that must be persisted.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Classifier and validator bound to one configuration.
#[derive(Debug, Clone)]
pub struct LicensingEngine {
    config: LicensingConfig,
    classifier: Classifier,
    validator: Validator,
}

impl LicensingEngine {
    /// Creates an engine; both phases share the configured rule table.
    #[must_use]
    pub fn new(config: LicensingConfig) -> Self {
        let classifier = Classifier::new(config.rules().clone());
        let validator = Validator::new(config.rules().clone());
        Self {
            config,
            classifier,
            validator,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &LicensingConfig {
        &self.config
    }

    /// Runs only the classifier.
    #[must_use]
    pub fn classify(&self, player: &Player) -> Player {
        self.classifier
            .classify(player, self.config.reference_date())
    }

    /// Runs only the validator. The player should already be classified.
    #[must_use]
    pub fn validate(&self, player: &Player) -> Player {
        self.validator
            .validate(player, self.config.reference_date())
    }

    /// Checks, classifies and validates a player.
    ///
    /// # Arguments
    ///
    /// * `player` - The stored or submitted player document
    /// * `trigger` - What initiated the run, recorded on the change set
    ///
    /// # Returns
    ///
    /// The annotated player with its report and change set.
    ///
    /// # Errors
    ///
    /// Returns an error if the document fails input validation. No
    /// classification happens in that case.
    pub fn process(&self, player: &Player, trigger: Trigger) -> Result<LicensingOutcome, CoreError> {
        validate_player_document(player, self.config.reference_date())?;

        let classified = self.classify(player);
        let validated = self.validate(&classified);
        let changes = PlayerChangeSet::diff(trigger, player, &validated);
        let report = ValidationReport::new(&validated, &changes);

        if changes.is_empty() {
            debug!(player_id = %player.id, "Licenses unchanged");
        } else {
            info!(
                player_id = %player.id,
                trigger = %trigger,
                changed = report.changed_license_count,
                valid = report.valid_license_count,
                invalid = report.invalid_license_count,
                "Licenses updated"
            );
        }

        Ok(LicensingOutcome {
            player: validated,
            report,
            changes,
        })
    }
}
