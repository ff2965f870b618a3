//! Aggregated search: GitHub repositories plus the built-in article, video
//! and product catalogs.

pub mod catalog;
pub mod github;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::ServiceError;

pub use github::{GitHubClient, GitHubSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Github,
    Article,
    Video,
    Product,
}

impl ResultKind {
    pub const ALL: [ResultKind; 4] = [Self::Github, Self::Article, Self::Video, Self::Product];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Article => "article",
            Self::Video => "video",
            Self::Product => "product",
        }
    }
}

/// GitHub ids are numeric, catalog ids are strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultId {
    Numeric(u64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultDetails {
    Repository { stars: u64, forks: u64, language: String },
    Article { views: u64, likes: u64 },
    Video { duration: String, views: String },
    Product { price: String, sales: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: ResultId,
    pub title: String,
    pub url: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub snippet: String,
    #[serde(flatten)]
    pub details: ResultDetails,
}

/// Which categories a search covers, from the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    All,
    Only(ResultKind),
    /// Unknown `type` values match nothing.
    Unrecognized,
}

impl SearchScope {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("all") => Self::All,
            Some(other) => ResultKind::ALL
                .into_iter()
                .find(|k| k.as_str() == other)
                .map(Self::Only)
                .unwrap_or(Self::Unrecognized),
        }
    }

    pub fn includes(&self, kind: ResultKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(k) => *k == kind,
            Self::Unrecognized => false,
        }
    }
}

/// Source of repository results; implemented by [`GitHubClient`].
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    async fn search_repositories(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError>;
}

pub struct SearchService {
    repositories: Arc<dyn RepositorySearch>,
}

impl SearchService {
    pub fn new(repositories: Arc<dyn RepositorySearch>) -> Self {
        Self { repositories }
    }

    /// Results in category order github, article, video, product.
    /// A failing repository lookup degrades to no repository results.
    pub async fn search(&self, query: &str, scope: SearchScope) -> Result<Vec<SearchResult>, ServiceError> {
        if query.trim().is_empty() {
            return Err(ServiceError::InvalidQuery("missing search keyword".into()));
        }

        let mut results = Vec::new();
        if scope.includes(ResultKind::Github) {
            match self.repositories.search_repositories(query).await {
                Ok(found) => results.extend(found),
                Err(e) => warn!(%query, error = %e, "repository search failed"),
            }
        }
        if scope.includes(ResultKind::Article) {
            results.extend(catalog::articles(query));
        }
        if scope.includes(ResultKind::Video) {
            results.extend(catalog::videos(query));
        }
        if scope.includes(ResultKind::Product) {
            results.extend(catalog::products(query));
        }

        info!(%query, ?scope, count = results.len(), "search completed");
        Ok(results)
    }

    pub fn hot_keywords(&self) -> &'static [&'static str] {
        catalog::HOT_KEYWORDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRepos(Result<Vec<SearchResult>, String>);

    #[async_trait]
    impl RepositorySearch for FixedRepos {
        async fn search_repositories(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError> {
            match &self.0 {
                Ok(items) => Ok(items
                    .iter()
                    .cloned()
                    .map(|mut r| {
                        r.title = format!("{query}/{}", r.title);
                        r
                    })
                    .collect()),
                Err(msg) => Err(ServiceError::Upstream(msg.clone())),
            }
        }
    }

    fn repo(id: u64) -> SearchResult {
        SearchResult {
            id: ResultId::Numeric(id),
            title: "repo".into(),
            url: format!("https://github.com/o/{id}"),
            source: "GitHub".into(),
            kind: ResultKind::Github,
            snippet: "s".into(),
            details: ResultDetails::Repository { stars: 1, forks: 2, language: "Rust".into() },
        }
    }

    #[test]
    fn scope_parsing() {
        assert_eq!(SearchScope::parse(None), SearchScope::All);
        assert_eq!(SearchScope::parse(Some("all")), SearchScope::All);
        assert_eq!(SearchScope::parse(Some("video")), SearchScope::Only(ResultKind::Video));
        assert_eq!(SearchScope::parse(Some("books")), SearchScope::Unrecognized);
        assert!(!SearchScope::Unrecognized.includes(ResultKind::Article));
    }

    #[tokio::test]
    async fn all_scope_orders_categories() -> Result<(), anyhow::Error> {
        let svc = SearchService::new(Arc::new(FixedRepos(Ok(vec![repo(1), repo(2)]))));
        let results = svc.search("Rust", SearchScope::All).await?;
        assert_eq!(results.len(), 2 + 3 + 3 + 3);
        let kinds: Vec<_> = results.iter().map(|r| r.kind).collect();
        assert_eq!(&kinds[..2], &[ResultKind::Github, ResultKind::Github]);
        assert_eq!(kinds[2], ResultKind::Article);
        assert_eq!(kinds[5], ResultKind::Video);
        assert_eq!(kinds[8], ResultKind::Product);
        assert_eq!(results[0].title, "Rust/repo");
        Ok(())
    }

    #[tokio::test]
    async fn single_scope_skips_other_categories() -> Result<(), anyhow::Error> {
        let svc = SearchService::new(Arc::new(FixedRepos(Ok(vec![repo(1)]))));
        let results = svc.search("Vue", SearchScope::Only(ResultKind::Article)).await?;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.kind == ResultKind::Article));

        let none = svc.search("Vue", SearchScope::Unrecognized).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn repository_failure_degrades_gracefully() -> Result<(), anyhow::Error> {
        let svc = SearchService::new(Arc::new(FixedRepos(Err("rate limited".into()))));
        let results = svc.search("React", SearchScope::All).await?;
        assert_eq!(results.len(), 9);
        assert!(results.iter().all(|r| r.kind != ResultKind::Github));
        Ok(())
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let svc = SearchService::new(Arc::new(FixedRepos(Ok(vec![]))));
        let err = svc.search("   ", SearchScope::All).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidQuery(_)));
    }

    #[test]
    fn result_serializes_flat() {
        let v = serde_json::to_value(repo(7)).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["type"], "github");
        assert_eq!(v["stars"], 1);
        assert_eq!(v["language"], "Rust");
        assert!(v.get("details").is_none());
    }
}
