// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PlanCheck Server - Floor plan compliance checking over HTTP.
//!
//! This server accepts already-parsed floor plan geometry (filled shapes and
//! text runs per page), identifies rooms by fill color or by label, converts
//! their dimensions to real-world units and checks them against the building
//! rules of a jurisdiction.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/verify` - Extract rooms and check compliance
//! - `GET /api/v1/rules` - List jurisdictions
//! - `GET /api/v1/rules/:city/:pincode` - Rules for one jurisdiction

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::RuleStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RuleStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    tracing::info!(
        port = config.port,
        rules_path = %config.rules_path,
        max_body_size_mb = config.max_body_size_mb,
        request_timeout_secs = config.request_timeout_secs,
        "Starting PlanCheck Server"
    );

    let rules = RuleStore::load(&config.rules_path)
        .await
        .with_context(|| format!("loading building rules from {}", config.rules_path))?;
    if rules.is_empty() {
        tracing::warn!("Rules file has no jurisdictions; every verification will return 404");
    } else {
        tracing::info!(jurisdictions = rules.len(), "Building rules loaded");
    }

    let state = AppState {
        rules: Arc::new(rules),
        config: Arc::new(config.clone()),
    };

    let app = Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        .route("/api/v1/health", get(routes::health::check))
        .route("/api/v1/verify", post(routes::verify::verify))
        .route("/api/v1/rules", get(routes::rules::list))
        .route("/api/v1/rules/:city/:pincode", get(routes::rules::get_rules))
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_body_size_mb * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,plancheck_server=debug"));

    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
