// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only store of jurisdiction rule sets.
//!
//! Loaded once at startup from a JSON array of rule sets and shared across
//! handlers. Lookups are by city (case-insensitive) and pincode, and only
//! active rule sets are returned.

use plancheck_core::RuleSet;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Rule store loading errors.
#[derive(Debug, Error)]
pub enum RuleStoreError {
    #[error("Failed to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rules file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Jurisdiction listing entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionSummary {
    pub city_name: String,
    pub pincode: String,
    pub status: plancheck_core::RuleStatus,
    pub rule_count: usize,
}

/// In-memory rule sets keyed by jurisdiction.
#[derive(Debug, Default)]
pub struct RuleStore {
    sets: Vec<Arc<RuleSet>>,
}

impl RuleStore {
    pub fn from_sets(sets: Vec<RuleSet>) -> Self {
        Self {
            sets: sets.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, RuleStoreError> {
        let sets: Vec<RuleSet> = serde_json::from_str(content)?;
        Ok(Self::from_sets(sets))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RuleStoreError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RuleStoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&content)
    }

    /// Active rule set for a jurisdiction.
    pub fn find(&self, city: &str, pincode: &str) -> Option<Arc<RuleSet>> {
        let city = city.trim().to_lowercase();
        let pincode = pincode.trim();

        self.sets
            .iter()
            .find(|set| {
                set.is_active() && set.city_name.to_lowercase() == city && set.pincode == pincode
            })
            .cloned()
    }

    pub fn jurisdictions(&self) -> Vec<JurisdictionSummary> {
        self.sets
            .iter()
            .map(|set| JurisdictionSummary {
                city_name: set.city_name.clone(),
                pincode: set.pincode.clone(),
                status: set.status,
                rule_count: set.rules.len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
