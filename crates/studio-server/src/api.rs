use std::sync::Arc;

use axum::{
    extract::State,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use studio_service::{EditRequest, EditedImage, GenerateRequest, GeneratedImage, ImageService};
use studio_shared::catalog::{AiModel, AI_MODELS};
use studio_shared::presets::FILTER_PRESETS;
use studio_shared::ActiveFilters;

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ImageService>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    // Client-side routes resolve to index.html.
    let static_dir = &state.config.static_dir;
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/info", get(server_info))
        .route("/api/models", get(list_models))
        .route("/api/presets", get(list_presets))
        .route("/api/generate", post(generate_image))
        .route("/api/edit", post(edit_image))
        .fallback_service(frontend)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    simulate_latency: bool,
    failure_rate: f64,
}

#[derive(Serialize)]
struct PresetResponse {
    key: &'static str,
    name: &'static str,
    filters: ActiveFilters,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        simulate_latency: state.config.simulate_latency,
        failure_rate: state.config.failure_rate,
    })
}

async fn list_models() -> Json<&'static [AiModel]> {
    Json(AI_MODELS)
}

async fn list_presets() -> Json<Vec<PresetResponse>> {
    Json(
        FILTER_PRESETS
            .iter()
            .map(|p| PresetResponse {
                key: p.key,
                name: p.name,
                filters: p.adjustments(),
            })
            .collect(),
    )
}

/// Stateless proxy to the image service; nothing is recorded server-side.
async fn generate_image(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GeneratedImage>, ServerError> {
    if req.prompt.trim().is_empty() {
        return Err(ServerError::BadRequest("prompt must not be empty".into()));
    }

    let result = state.service.generate(req).await?;
    info!(
        model = %result.model,
        processing_ms = result.processing_time_ms,
        "Image generated via API"
    );
    Ok(Json(result))
}

async fn edit_image(
    State(state): State<AppState>,
    Json(req): Json<EditRequest>,
) -> Result<Json<EditedImage>, ServerError> {
    if req.image_url.trim().is_empty() || req.prompt.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "image_url and prompt are required".into(),
        ));
    }

    let result = state.service.edit(req).await?;
    info!(edit_type = %result.edit_type, "Image edited via API");
    Ok(Json(result))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
