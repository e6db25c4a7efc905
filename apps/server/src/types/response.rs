// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use plancheck_core::{ExtractionMode, ExtractionReport, RawScale};
use serde::Serialize;

/// Jurisdiction the plan was checked against.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub city: String,
    pub pincode: String,
}

/// Plan verification response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub status: &'static str,
    pub message: String,
    pub city: String,
    pub pincode: String,
    /// Scale as submitted.
    pub scale: RawScale,
    pub mode: ExtractionMode,
    /// Rooms, per-type counts and compliance summary.
    #[serde(flatten)]
    pub report: ExtractionReport,
    pub location: Location,
}
