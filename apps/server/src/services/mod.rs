// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for rule lookup.

pub mod rule_store;

pub use rule_store::{JurisdictionSummary, RuleStore};
