// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use bishl_licensing_domain::WkoRuleTable;
use time::Date;

/// Immutable inputs shared by every licensing run of a process.
#[derive(Debug, Clone)]
pub struct LicensingConfig {
    rules: Arc<WkoRuleTable>,
    reference_date: Date,
}

impl LicensingConfig {
    /// Creates a configuration from an owned rule table.
    ///
    /// # Arguments
    ///
    /// * `rules` - The WKO rule table
    /// * `reference_date` - The date age groups and suspensions are evaluated on
    #[must_use]
    pub fn new(rules: WkoRuleTable, reference_date: Date) -> Self {
        Self::with_shared_rules(Arc::new(rules), reference_date)
    }

    /// Creates a configuration around an already shared rule table.
    #[must_use]
    pub const fn with_shared_rules(rules: Arc<WkoRuleTable>, reference_date: Date) -> Self {
        Self {
            rules,
            reference_date,
        }
    }

    /// Configuration with the league's standard rule table.
    #[must_use]
    pub fn bishl_default(reference_date: Date) -> Self {
        Self::new(WkoRuleTable::bishl_default(), reference_date)
    }

    #[must_use]
    pub const fn rules(&self) -> &Arc<WkoRuleTable> {
        &self.rules
    }

    #[must_use]
    pub const fn reference_date(&self) -> Date {
        self.reference_date
    }
}
