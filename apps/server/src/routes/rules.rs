// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building rule lookup endpoints.

use crate::error::ApiError;
use crate::services::JurisdictionSummary;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use plancheck_core::RuleSet;

/// GET /api/v1/rules - All jurisdictions in the store.
pub async fn list(State(state): State<AppState>) -> Json<Vec<JurisdictionSummary>> {
    Json(state.rules.jurisdictions())
}

/// GET /api/v1/rules/:city/:pincode - Active rule set for a jurisdiction.
pub async fn get_rules(
    State(state): State<AppState>,
    Path((city, pincode)): Path<(String, String)>,
) -> Result<Json<RuleSet>, ApiError> {
    let rules = state
        .rules
        .find(&city, &pincode)
        .ok_or_else(|| ApiError::RulesNotFound {
            city: city.clone(),
            pincode: pincode.clone(),
        })?;

    Ok(Json(rules.as_ref().clone()))
}
