use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use service::search::{SearchResult, SearchScope};
use utoipa::IntoParams;

use crate::errors::ApiError;
use crate::observability::SEARCH_REQUESTS_TOTAL;
use crate::state::ServerState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search keyword.
    pub q: Option<String>,
    /// One of `all`, `github`, `article`, `video`, `product`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotKeywordsResponse {
    pub hot_keywords: Vec<&'static str>,
}

#[utoipa::path(
    get, path = "/api/search", tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "Aggregated results"),
        (status = 400, description = "Missing keyword")
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    let scope = SearchScope::parse(params.kind.as_deref());
    let results = state.search.search(&query, scope).await?;
    SEARCH_REQUESTS_TOTAL.inc();
    Ok(Json(SearchResponse { query, total: results.len(), results }))
}

#[utoipa::path(get, path = "/api/hot", tag = "search", responses((status = 200, description = "Hot keywords")))]
pub async fn hot(State(state): State<ServerState>) -> Json<HotKeywordsResponse> {
    Json(HotKeywordsResponse { hot_keywords: state.search.hot_keywords().to_vec() })
}
