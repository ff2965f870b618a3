use std::{net::SocketAddr, sync::Arc, time::Duration};

use configs::AppConfig;
use service::{
    runtime,
    search::{GitHubClient, GitHubSettings, SearchService},
    storage::{LocalFileStore, StorageSettings},
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::observability;
use crate::routes::{self, RouterOptions};
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the file store and search service from configuration.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let file_store = LocalFileStore::init(StorageSettings::new(&cfg.storage.upload_dir)).await?;

    let github = GitHubClient::new(GitHubSettings {
        api_base: cfg.search.github_api_base.clone(),
        per_page: cfg.search.per_page,
        timeout: Duration::from_secs(cfg.search.timeout_secs),
        user_agent: cfg.search.user_agent.clone(),
    })?;
    let search = Arc::new(SearchService::new(Arc::new(github)));

    Ok(ServerState { file_store, search })
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.storage.upload_dir, cfg.server.static_dir.as_deref()).await?;
    observability::init_metrics();

    let state = build_state(&cfg).await?;
    let app = routes::build_router(state, build_cors(), &RouterOptions::from_config(&cfg));

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, upload_dir = %cfg.storage.upload_dir.display(), "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
