//! News-search provider clients
//!
//! - `GNewsClient`: the GNews v4 REST API (production)
//! - `MockSearchClient`: canned or synthesized articles (testing)

use super::query::SearchRequest;
use crate::model::{Article, Publisher};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Errors from news-search calls.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("no API key configured (set {0})")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse provider response: {0}")]
    Parse(String),
}

/// Where a provider article was published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// An article as the search provider returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub source: ProviderSource,
}

impl ProviderArticle {
    /// Normalize into the common row shape; `title` becomes `headline`.
    pub fn into_article(self) -> Article {
        Article {
            headline: self.title,
            description: self.description.unwrap_or_default(),
            url: self.url,
            published_date: self.published_at,
            publisher: Publisher::new(self.source.name, self.source.url),
        }
    }
}

/// Client trait for news search providers.
#[async_trait]
pub trait NewsSearchClient: Send + Sync {
    /// Fetch up to `max_results` articles for one request.
    async fn fetch(
        &self,
        request: &SearchRequest,
        max_results: usize,
    ) -> Result<Vec<ProviderArticle>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct GNewsResponse {
    #[serde(default)]
    articles: Vec<ProviderArticle>,
}

/// GNews v4 client.
#[derive(Debug, Clone)]
pub struct GNewsClient {
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    language: String,
    country: String,
    http: reqwest::Client,
}

impl GNewsClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://gnews.io/api/v4";

    pub fn new(api_key: Option<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key,
            api_key_env: "GNEWS_API_KEY".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Name of the environment variable the key was expected in, for error messages.
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = name.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Endpoint path and query parameters for a request (API key excluded).
    ///
    /// GNews has no dedicated location or site parameters: keywords and
    /// locations become a plain `search?q=`, a site becomes `q=site:<domain>`.
    /// Topics and date bounds go to `top-headlines` as `category`, `from`
    /// and `to`.
    fn endpoint(&self, request: &SearchRequest, max_results: usize) -> (&'static str, Vec<(String, String)>) {
        let mut params = vec![
            ("lang".to_string(), self.language.clone()),
            ("country".to_string(), self.country.clone()),
            ("max".to_string(), max_results.to_string()),
        ];
        let path = match request {
            SearchRequest::Keyword(q) | SearchRequest::Location(q) => {
                params.push(("q".to_string(), q.clone()));
                "search"
            }
            SearchRequest::Site(site) => {
                params.push(("q".to_string(), format!("site:{}", site)));
                "search"
            }
            SearchRequest::Top => "top-headlines",
            SearchRequest::Topic(topic) => {
                params.push(("category".to_string(), topic.to_lowercase()));
                "top-headlines"
            }
            SearchRequest::Since(date) => {
                params.push(("from".to_string(), format!("{}T00:00:00Z", date)));
                "top-headlines"
            }
            SearchRequest::Until(date) => {
                params.push(("to".to_string(), format!("{}T23:59:59Z", date)));
                "top-headlines"
            }
        };
        (path, params)
    }
}

#[async_trait]
impl NewsSearchClient for GNewsClient {
    async fn fetch(
        &self,
        request: &SearchRequest,
        max_results: usize,
    ) -> Result<Vec<ProviderArticle>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::MissingApiKey(self.api_key_env.clone()))?;
        let (path, mut params) = self.endpoint(request, max_results);
        tracing::debug!(%request, path, "gnews request");
        params.push(("apikey".to_string(), api_key.to_string()));

        let response = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .query(&params)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let parsed: GNewsResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(parsed.articles)
    }
}

/// Mock client for testing.
///
/// Requests with registered articles return them; any other request
/// synthesizes `max_results` articles titled after the request.
pub struct MockSearchClient {
    responses: HashMap<String, Vec<ProviderArticle>>,
    failure: Option<String>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every fetch fails with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Register articles for a request.
    pub fn with_articles(mut self, request: SearchRequest, articles: Vec<ProviderArticle>) -> Self {
        self.responses.insert(request.to_string(), articles);
        self
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to construct a provider article for testing.
pub fn mock_article(title: &str, description: &str) -> ProviderArticle {
    let slug: String = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    ProviderArticle {
        title: title.to_string(),
        description: Some(description.to_string()),
        url: format!("https://news.example.com/{}", slug),
        published_at: "2024-11-05T12:00:00Z".to_string(),
        source: ProviderSource {
            name: "Example News".to_string(),
            url: "https://news.example.com".to_string(),
        },
    }
}

#[async_trait]
impl NewsSearchClient for MockSearchClient {
    async fn fetch(
        &self,
        request: &SearchRequest,
        max_results: usize,
    ) -> Result<Vec<ProviderArticle>, SearchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(message) = &self.failure {
            return Err(SearchError::Transport(message.clone()));
        }
        let key = request.to_string();
        if let Some(articles) = self.responses.get(&key) {
            return Ok(articles.iter().take(max_results).cloned().collect());
        }
        Ok((1..=max_results)
            .map(|i| {
                mock_article(
                    &format!("Headline {} for {}", i, key),
                    &format!("Story {} about {}.", i, key),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn provider_title_becomes_headline() {
        let article = mock_article("Votes counted", "Long night.").into_article();
        assert_eq!(article.headline, "Votes counted");
        assert_eq!(article.description, "Long night.");
        assert_eq!(article.publisher.title, "Example News");
        assert_eq!(article.published_date, "2024-11-05T12:00:00Z");
    }

    #[test]
    fn provider_article_parses_gnews_payload() {
        let raw = r#"{
            "totalArticles": 1,
            "articles": [{
                "title": "Rover lands",
                "description": null,
                "content": "...",
                "url": "https://example.com/rover",
                "image": "https://example.com/rover.png",
                "publishedAt": "2024-02-01T08:00:00Z",
                "source": {"name": "Space Daily", "url": "https://example.com"}
            }]
        }"#;
        let parsed: GNewsResponse = serde_json::from_str(raw).unwrap();
        let article = parsed.articles[0].clone().into_article();
        assert_eq!(article.headline, "Rover lands");
        assert_eq!(article.description, "");
        assert_eq!(article.publisher.href, "https://example.com");
    }

    #[test]
    fn gnews_endpoints() {
        let client = GNewsClient::new(Some("key".into()));

        let (path, params) = client.endpoint(&SearchRequest::Keyword("election".into()), 3);
        assert_eq!(path, "search");
        assert!(params.contains(&("q".to_string(), "election".to_string())));
        assert!(params.contains(&("max".to_string(), "3".to_string())));

        let (path, params) = client.endpoint(&SearchRequest::Site("example.com".into()), 1);
        assert_eq!(path, "search");
        assert!(params.contains(&("q".to_string(), "site:example.com".to_string())));
        let (_, params) = client.endpoint(&SearchRequest::Location("Paris".into()), 1);
        assert!(params.contains(&("q".to_string(), "Paris".to_string())));

        let (path, params) = client.endpoint(&SearchRequest::Topic("WORLD".into()), 1);
        assert_eq!(path, "top-headlines");
        assert!(params.contains(&("category".to_string(), "world".to_string())));

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let (_, params) = client.endpoint(&SearchRequest::Since(date), 1);
        assert!(params.contains(&("from".to_string(), "2024-01-02T00:00:00Z".to_string())));
    }

    #[tokio::test]
    async fn gnews_without_key_fails_before_any_request() {
        let client = GNewsClient::new(None).with_base_url("http://127.0.0.1:9");
        let err = client.fetch(&SearchRequest::Top, 1).await.unwrap_err();
        assert!(matches!(err, SearchError::MissingApiKey(ref var) if var == "GNEWS_API_KEY"));
    }

    #[tokio::test]
    async fn mock_synthesizes_and_records() {
        let client = MockSearchClient::new()
            .with_articles(SearchRequest::Top, vec![mock_article("Top story", "Big.")]);

        let top = client.fetch(&SearchRequest::Top, 5).await.unwrap();
        assert_eq!(top.len(), 1);

        let synthesized = client
            .fetch(&SearchRequest::Keyword("space".into()), 2)
            .await
            .unwrap();
        assert_eq!(synthesized.len(), 2);
        assert_eq!(synthesized[0].title, "Headline 1 for keyword=space");

        assert_eq!(client.requests().len(), 2);
    }
}
