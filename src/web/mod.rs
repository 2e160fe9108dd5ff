//! Web API module.
//!
//! This module exposes the floor SVG pipeline over HTTP.
//!
//! # Endpoints
//!
//! - `GET /health-check` - Health check
//! - `GET /floors` - List floors with their locations
//! - `GET /floors/{number}/svg` - Floor plan tinted by quarter sales

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::{APP_NAME, SVG_CONTENT_TYPE};
use crate::error::PipelineError;
use crate::models::FloorListing;
use crate::services::{FloorSvgService, PgFloorStore, SalesClient, SvgCache};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Floor SVG pipeline (owns the store, sales source, and cache)
    floors: FloorSvgService,
}

impl AppState {
    /// Creates a new application state around a pipeline.
    pub fn new(floors: FloorSvgService) -> Self {
        Self { floors }
    }

    /// Builds the production state: pooled Postgres store, metrics client,
    /// and an empty response cache.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = PgFloorStore::connect_lazy(&config.database)?;
        let sales = SalesClient::from_config(&config.sales)?;

        Ok(Self::new(FloorSvgService::new(
            Arc::new(store),
            Arc::new(sales),
            Arc::new(SvgCache::new()),
        )))
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Maps a pipeline failure to the HTTP status reported to clients.
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::FloorNotFound { .. } | PipelineError::NoLocations { .. } => {
            StatusCode::NOT_FOUND
        }
        PipelineError::Authentication { .. } | PipelineError::RemoteFetch { .. } => {
            StatusCode::BAD_GATEWAY
        }
        PipelineError::ImageDecode(_)
        | PipelineError::InvalidLocationCode { .. }
        | PipelineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn pipeline_error(context: &str, err: PipelineError) -> (StatusCode, Json<ApiError>) {
    let status = status_for(&err);
    warn!(status = status.as_u16(), "{context}: {err}");
    (status, Json(ApiError::with_details(context, err.to_string())))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health-check - Health check endpoint.
async fn health_check() -> &'static str {
    "⚕️"
}

/// GET /floors - List all floors with their nested locations.
async fn list_floors(
    State(state): State<AppState>,
) -> Result<Json<Vec<FloorListing>>, (StatusCode, Json<ApiError>)> {
    let floors = state
        .floors
        .store()
        .list_floors()
        .await
        .map_err(|e| pipeline_error("Failed to list floors", e))?;

    Ok(Json(floors))
}

/// GET /floors/{number}/svg - Floor plan tinted by quarter sales.
async fn floor_svg(
    State(state): State<AppState>,
    Path(number): Path<i32>,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let svg = state
        .floors
        .floor_svg(number)
        .await
        .map_err(|e| pipeline_error("Failed to render floor", e))?;

    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response())
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Floor plans are embedded by dashboards served from other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health-check", get(health_check))
        .route("/floors", get(list_floors))
        .route("/floors/{number}/svg", get(floor_svg))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the state cannot be built or the listener fails.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;

    info!("Starting {} on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
