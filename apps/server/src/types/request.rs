// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use plancheck_core::{ExtractionMode, PageGeometry, RawScale};
use serde::Deserialize;

/// Plan verification request: parsed page geometry plus jurisdiction and scale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub pincode: String,

    /// Scale declaration, e.g. `{"value": 1, "unit": "inch", "equals": 8, "equalsUnit": "feet"}`.
    #[serde(default)]
    pub scale: Option<RawScale>,

    /// Identify rooms by fill color (default) or by text label.
    #[serde(default)]
    pub mode: ExtractionMode,

    /// Shapes and text runs per page, as produced by the document parser.
    #[serde(default)]
    pub pages: Vec<PageGeometry>,
}

impl VerifyRequest {
    /// Names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.pincode.trim().is_empty() {
            missing.push("pincode");
        }
        match &self.scale {
            None => missing.push("scale"),
            Some(scale) if scale.has_missing_fields() => missing.push("scale"),
            Some(_) => {}
        }
        missing
    }
}
