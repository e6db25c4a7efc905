// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// Number of jurisdictions loaded into the rule store.
    pub jurisdictions: usize,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
    pub limits: Limits,
}

/// Request limits enforced by the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub max_body_size_mb: usize,
    pub request_timeout_secs: u64,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Health check endpoint.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "plancheck-server",
        jurisdictions: state.rules.len(),
    })
}

/// GET / - API information endpoint.
pub async fn info(State(state): State<AppState>) -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "plancheck-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Floor plan room classification and building rule compliance",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/verify",
                description: "Classify rooms on parsed plan pages and check them against local rules",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/rules",
                description: "List jurisdictions with building rules",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/rules/:city/:pincode",
                description: "Active building rules for a jurisdiction",
            },
        ],
        limits: Limits {
            max_body_size_mb: state.config.max_body_size_mb,
            request_timeout_secs: state.config.request_timeout_secs,
        },
    })
}
