//! GitHub repository-search client
//!
//! ## API Reference
//!
//! Endpoint: `GET /search/repositories?q=...&sort=stars&order=desc&per_page=N`
//! Returns: `{ total_count, items: [ { name, full_name, description, html_url,
//! stargazers_count, forks_count, language, topics, created_at, updated_at, pushed_at } ] }`
//!
//! Anonymous search allows 10 requests/minute; a token raises that to 30.
//! The token is sent as `Authorization: Bearer <token>`.

use super::http::JsonClient;
use super::rate_limit::SlidingWindowLimiter;
use super::CodeSource;
use crate::error::AlphaError;
use crate::scoring::Repository;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

pub const SOURCE_NAME: &str = "github";

const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RawRepository>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    #[serde(default)]
    name: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    pushed_at: Option<String>,
}

impl From<RawRepository> for Repository {
    fn from(raw: RawRepository) -> Self {
        Repository {
            name: raw.name,
            full_name: raw.full_name,
            description: raw.description.filter(|d| !d.trim().is_empty()),
            url: raw.html_url,
            stars: raw.stargazers_count,
            forks: raw.forks_count,
            language: raw.language,
            topics: raw.topics,
            created_at: raw.created_at.unwrap_or_default(),
            updated_at: raw.updated_at.unwrap_or_default(),
            pushed_at: raw.pushed_at.unwrap_or_default(),
        }
    }
}

/// Repositories tagged `topic` with recent pushes and a star floor
pub fn trending_query(topic: &str, since: NaiveDate, min_stars: u64) -> String {
    format!(
        "topic:{} stars:>{} pushed:>{}",
        topic,
        min_stars,
        since.format("%Y-%m-%d")
    )
}

/// Repositories tagged `topic` created after `since`
pub fn new_repos_query(topic: &str, since: NaiveDate) -> String {
    format!("topic:{} created:>{}", topic, since.format("%Y-%m-%d"))
}

/// Free-text search used when no repository carries the topic tag
pub fn keyword_query(keyword: &str, since: NaiveDate, min_stars: u64) -> String {
    format!(
        "{} stars:>{} pushed:>{}",
        keyword.trim(),
        min_stars,
        since.format("%Y-%m-%d")
    )
}

/// Lowercase, hyphen-separated form accepted by the `topic:` qualifier
pub fn topic_slug(topic: &str) -> String {
    topic
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub struct GitHubClient {
    http: JsonClient,
}

impl GitHubClient {
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout: Duration,
        limiter: SlidingWindowLimiter,
    ) -> Result<Self, AlphaError> {
        let bearer = token.map(|t| format!("Bearer {}", t));
        let auth = bearer.as_deref().map(|value| ("authorization", value));
        let http = JsonClient::new(SOURCE_NAME, base_url, timeout, limiter, auth)?
            .with_header("accept", "application/vnd.github+json")
            .with_header("x-github-api-version", "2022-11-28");

        if token.is_none() {
            log::info!("🐙 GitHub search running anonymously (lower rate limit)");
        }

        Ok(Self { http })
    }
}

#[async_trait]
impl CodeSource for GitHubClient {
    async fn search_repositories(&self, query: &str, limit: usize) -> Result<Vec<Repository>, AlphaError> {
        let per_page = limit.clamp(1, MAX_PER_PAGE);
        let response: SearchResponse = self
            .http
            .get_json(
                "/search/repositories",
                &[
                    ("q", query.to_string()),
                    ("sort", "stars".to_string()),
                    ("order", "desc".to_string()),
                    ("per_page", per_page.to_string()),
                ],
            )
            .await?;

        let mut repos = parse_search(response);
        repos.truncate(limit);
        log::debug!("🐙 {} repositories for '{}'", repos.len(), query);
        Ok(repos)
    }
}

fn parse_search(response: SearchResponse) -> Vec<Repository> {
    response
        .items
        .into_iter()
        .filter(|raw| !raw.full_name.is_empty())
        .map(Repository::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_search_payload() {
        let json = r#"{
            "total_count": 3,
            "items": [
                {"name": "servers", "full_name": "modelcontextprotocol/servers",
                 "description": "Reference servers", "html_url": "https://github.com/modelcontextprotocol/servers",
                 "stargazers_count": 12000, "forks_count": 900, "language": "TypeScript",
                 "topics": ["mcp"], "created_at": "2024-11-19T01:10:17Z",
                 "updated_at": "2026-03-01T10:00:00Z", "pushed_at": "2026-03-01T09:00:00Z"},
                {"name": "bare", "full_name": "someone/bare", "html_url": "https://github.com/someone/bare",
                 "description": "  ", "language": null},
                {"name": "broken"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let repos = parse_search(response);

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].stars, 12000);
        assert_eq!(repos[0].url, "https://github.com/modelcontextprotocol/servers");
        assert_eq!(repos[0].created_day(), "2024-11-19");
        assert_eq!(repos[1].description, None);
        assert_eq!(repos[1].stars, 0);
        assert_eq!(repos[1].created_at, "");
    }

    #[test]
    fn test_query_builders() {
        let since = day(2026, 2, 22);
        assert_eq!(trending_query("mcp", since, 10), "topic:mcp stars:>10 pushed:>2026-02-22");
        assert_eq!(new_repos_query("ai-agents", since), "topic:ai-agents created:>2026-02-22");
        assert_eq!(
            keyword_query(" vector db ", since, 10),
            "vector db stars:>10 pushed:>2026-02-22"
        );
    }

    #[test]
    fn test_topic_slug() {
        assert_eq!(topic_slug("Vector Database"), "vector-database");
        assert_eq!(topic_slug(" rust_async  runtime "), "rust-async-runtime");
        assert_eq!(topic_slug("mcp"), "mcp");
    }

    #[test]
    fn test_token_is_sent_as_bearer() {
        let client = GitHubClient::new(
            "https://api.github.com",
            Some("ghp_example"),
            Duration::from_secs(5),
            SlidingWindowLimiter::per_minute(SOURCE_NAME, 10),
        );
        assert!(client.is_ok());

        let bad = GitHubClient::new(
            "https://api.github.com",
            Some("bad\ntoken"),
            Duration::from_secs(5),
            SlidingWindowLimiter::per_minute(SOURCE_NAME, 10),
        );
        assert!(matches!(bad, Err(AlphaError::InvalidParameter(_))));
    }

    #[tokio::test]
    #[ignore] // Run only when testing with live API
    async fn test_search_live() {
        let client = GitHubClient::new(
            "https://api.github.com",
            None,
            Duration::from_secs(30),
            SlidingWindowLimiter::per_minute(SOURCE_NAME, 10),
        )
        .unwrap();

        let since = chrono::Utc::now().date_naive() - chrono::Duration::days(30);
        let repos = client
            .search_repositories(&trending_query("mcp", since, 10), 5)
            .await
            .unwrap();
        assert!(repos.len() <= 5);
    }
}
