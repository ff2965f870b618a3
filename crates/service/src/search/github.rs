use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use super::{RepositorySearch, ResultDetails, ResultId, ResultKind, SearchResult};
use crate::errors::ServiceError;

const NO_DESCRIPTION: &str = "暂无描述";
const UNKNOWN_LANGUAGE: &str = "未知";

#[derive(Clone, Debug)]
pub struct GitHubSettings {
    /// API root without trailing slash, e.g. `https://api.github.com`.
    pub api_base: String,
    pub per_page: u32,
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Deserialize)]
struct RepoSearchPage {
    #[serde(default)]
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    id: u64,
    full_name: String,
    html_url: String,
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    language: Option<String>,
}

impl From<RepoItem> for SearchResult {
    fn from(item: RepoItem) -> Self {
        SearchResult {
            id: ResultId::Numeric(item.id),
            title: item.full_name,
            url: item.html_url,
            source: "GitHub".into(),
            kind: ResultKind::Github,
            snippet: item
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.into()),
            details: ResultDetails::Repository {
                stars: item.stargazers_count,
                forks: item.forks_count,
                language: item.language.unwrap_or_else(|| UNKNOWN_LANGUAGE.into()),
            },
        }
    }
}

/// Client for the GitHub repository search endpoint, best starred first.
pub struct GitHubClient {
    http: reqwest::Client,
    settings: GitHubSettings,
}

impl GitHubClient {
    pub fn new(settings: GitHubSettings) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;
        Ok(Self { http, settings })
    }
}

#[async_trait]
impl RepositorySearch for GitHubClient {
    async fn search_repositories(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        let url = format!("{}/search/repositories", self.settings.api_base);
        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", query.to_string()),
                ("per_page", self.settings.per_page.to_string()),
                ("sort", "stars".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;
        let page = resp
            .json::<RepoSearchPage>()
            .await
            .map_err(|e| ServiceError::Upstream(format!("parse error: {e}")))?;
        debug!(%query, count = page.items.len(), "github search returned");
        Ok(page.items.into_iter().map(SearchResult::from).collect())
    }
}
