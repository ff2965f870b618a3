use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod files;
pub mod search;

pub const HEALTH_MESSAGE: &str = "小黄聚合搜索服务正常运行";

/// Router knobs that come from configuration rather than state.
#[derive(Clone, Debug)]
pub struct RouterOptions {
    pub max_upload_bytes: usize,
    pub static_dir: Option<PathBuf>,
}

impl RouterOptions {
    pub fn from_config(cfg: &configs::AppConfig) -> Self {
        Self {
            max_upload_bytes: cfg.storage.max_upload_bytes,
            static_dir: cfg.server.static_dir.clone(),
        }
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self { max_upload_bytes: configs::StorageConfig::default().max_upload_bytes, static_dir: None }
    }
}

#[utoipa::path(get, path = "/api/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health::ok(HEALTH_MESSAGE))
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: API routes, metrics, docs and the
/// optional static frontend fallback.
pub fn build_router(state: ServerState, cors: CorsLayer, opts: &RouterOptions) -> Router {
    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/upload", post(files::upload))
        .route("/api/files", get(files::list))
        .route("/api/files/:storage_key", delete(files::delete))
        .route("/api/download/:storage_key", get(files::download))
        .route("/api/search", get(search::search))
        .route("/api/hot", get(search::hot))
        .route("/api/openapi.json", get(openapi_json))
        .route("/metrics", get(metrics))
        .layer(DefaultBodyLimit::max(opts.max_upload_bytes))
        .with_state(state);

    let app = match &opts.static_dir {
        // 未匹配的路径交给前端静态资源，找不到时回退到 index.html
        Some(dir) => api.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))),
        None => api,
    };

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            // 每次请求创建 INFO 级 span，失败（5xx 等）以 ERROR 记录
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
