// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan verification endpoint.

use crate::error::ApiError;
use crate::types::{Location, VerifyRequest, VerifyResponse};
use crate::AppState;
use axum::{extract::State, Json};
use plancheck_core::{extract, ScaleSpec};

/// POST /api/v1/verify - Classify rooms and check them against local rules.
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Rejecting verification request");
        return Err(ApiError::MissingFields(missing.join(", ")));
    }

    let VerifyRequest {
        city,
        pincode,
        scale,
        mode,
        pages,
    } = request;
    let raw_scale = scale.ok_or_else(|| ApiError::MissingFields("scale".into()))?;

    // Reject unusable scales here; the core would silently keep points
    let spec = ScaleSpec::parse(&raw_scale)?;

    let rules = state
        .rules
        .find(&city, &pincode)
        .ok_or_else(|| ApiError::RulesNotFound {
            city: city.clone(),
            pincode: pincode.clone(),
        })?;

    tracing::info!(
        city = %city,
        pincode = %pincode,
        scale = %spec,
        ?mode,
        pages = pages.len(),
        "Verifying plan"
    );

    let scale_for_task = raw_scale.clone();
    let report =
        tokio::task::spawn_blocking(move || extract(mode, &pages, &scale_for_task, &rules)).await?;

    let summary = report.compliance_summary;
    tracing::info!(
        city = %city,
        rooms = summary.total,
        compliant = summary.compliant,
        non_compliant = summary.non_compliant,
        "Plan verified"
    );

    Ok(Json(VerifyResponse {
        status: "success",
        message: format!("Successfully extracted {} rooms", summary.total),
        location: Location {
            city: city.clone(),
            pincode: pincode.clone(),
        },
        city,
        pincode,
        scale: raw_scale,
        mode,
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::RuleStore;
    use plancheck_core::RoomType;
    use std::sync::Arc;

    fn state() -> AppState {
        let rules = RuleStore::from_json(include_str!("../../data/rules.json")).unwrap();
        AppState {
            rules: Arc::new(rules),
            config: Arc::new(Config::from_env()),
        }
    }

    fn request(body: serde_json::Value) -> VerifyRequest {
        serde_json::from_value(body).unwrap()
    }

    fn plan_body(scale_value: serde_json::Value) -> serde_json::Value {
        // 1/8 inch = 1 foot: a 90pt square is 10ft x 10ft
        serde_json::json!({
            "city": "Mumbai",
            "pincode": "400001",
            "scale": {"value": scale_value, "unit": "inch", "equals": "1", "equalsUnit": "feet"},
            "pages": [{
                "page": 1,
                "height": 792,
                "shapes": [
                    {"boundingBox": {"x0": 0, "y0": 0, "x1": 90, "y1": 90}, "fillColor": [0.61, 0.16, 0.69]},
                    {"boundingBox": {"x0": 0, "y0": 0, "x1": 400, "y1": 2}, "fillColor": [0, 0, 0]},
                    {"boundingBox": {"x0": 100, "y0": 0, "x1": 190, "y1": 90}, "fillColor": [1.0, 1.0, 1.0]}
                ]
            }]
        })
    }

    #[tokio::test]
    async fn test_verify_classifies_and_checks_rooms() {
        let Json(response) = verify(State(state()), Json(request(plan_body("0.125".into()))))
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.report.rooms.len(), 2);
        assert_eq!(response.report.count(RoomType::Kitchen), 1);
        assert_eq!(response.report.count(RoomType::Other), 1);

        let kitchen = &response.report.rooms[0];
        assert_eq!(kitchen.real_dimensions.area, 100.0);
        // Mumbai kitchens carry free-text requirements
        assert!(!kitchen.compliance_status);
        assert_eq!(kitchen.compliance_message, "Must have exhaust fan provision");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["location"]["city"], "Mumbai");
        assert_eq!(json["complianceSummary"]["total"], 2);
        assert_eq!(json["roomCounts"]["kitchen"], 1);
    }

    #[tokio::test]
    async fn test_verify_rejects_missing_fields() {
        let body = serde_json::json!({"city": "Mumbai", "pages": []});
        let err = verify(State(state()), Json(request(body))).await.unwrap_err();

        match err {
            ApiError::MissingFields(fields) => assert_eq!(fields, "pincode, scale"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_verify_reports_null_scale_numbers_as_missing() {
        let mut body = plan_body(serde_json::Value::Null);
        body["scale"].as_object_mut().unwrap().remove("equals");

        let err = verify(State(state()), Json(request(body))).await.unwrap_err();
        match err {
            ApiError::MissingFields(fields) => assert_eq!(fields, "scale"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_verify_rejects_non_positive_scale() {
        let err = verify(State(state()), Json(request(plan_body((-1.0).into()))))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidScale(_)));
    }

    #[tokio::test]
    async fn test_verify_unknown_jurisdiction() {
        let mut body = plan_body("0.125".into());
        body["city"] = "Atlantis".into();
        let err = verify(State(state()), Json(request(body))).await.unwrap_err();
        assert!(matches!(err, ApiError::RulesNotFound { .. }));
    }

    #[tokio::test]
    async fn test_verify_label_mode() {
        let body = serde_json::json!({
            "city": "Pune",
            "pincode": "411001",
            "mode": "label",
            "scale": {"value": 1, "unit": "cm", "equals": 1, "equalsUnit": "meters"},
            "pages": [{
                "page": 1,
                "height": 842,
                "shapes": [{"bbox": {"x0": 0, "y0": 0, "x1": 144, "y1": 144}}],
                "labels": [{"text": "BED ROOM", "bbox": {"x0": 60, "y0": 60, "x1": 84, "y1": 70}}]
            }]
        });

        let Json(response) = verify(State(state()), Json(request(body))).await.unwrap();
        let room = &response.report.rooms[0];
        // 2in = 5.08cm -> 5.08m per side
        assert_eq!(room.real_dimensions.width, 5.08);
        assert_eq!(room.room_type, RoomType::Bedroom);
        assert!(room.compliance_status);
    }
}
