//! Community MCP server catalog (awesome-mcp-servers README)
//!
//! The list is one markdown file; entries look like
//! `- [owner/name](https://...) 🐍 ☁️ - Description` (a `:` separator also
//! occurs). Badge emoji between the link and the separator are skipped.

use super::http::JsonClient;
use super::rate_limit::SlidingWindowLimiter;
use super::CatalogSource;
use crate::error::AlphaError;
use crate::scoring::McpServer;
use async_trait::async_trait;
use std::time::Duration;

pub const SOURCE_NAME: &str = "awesome-mcp";

const REQUESTS_PER_MINUTE: u32 = 10;

pub struct McpCatalogClient {
    http: JsonClient,
}

impl McpCatalogClient {
    /// `url` points at the raw README itself
    pub fn new(url: &str, timeout: Duration) -> Result<Self, AlphaError> {
        let http = JsonClient::new(
            SOURCE_NAME,
            url,
            timeout,
            SlidingWindowLimiter::per_minute(SOURCE_NAME, REQUESTS_PER_MINUTE),
            None,
        )?
        .with_header("accept", "text/plain");
        Ok(Self { http })
    }
}

#[async_trait]
impl CatalogSource for McpCatalogClient {
    async fn fetch_servers(&self) -> Result<Vec<McpServer>, AlphaError> {
        let markdown = self.http.get_text("").await?;
        let servers = parse_servers(&markdown);
        if servers.is_empty() {
            return Err(AlphaError::source_unavailable(SOURCE_NAME, "no server entries in catalog"));
        }
        log::info!("📚 {} MCP servers in catalog", servers.len());
        Ok(servers)
    }
}

/// Extract every `[name](http...) - description` list entry
pub fn parse_servers(markdown: &str) -> Vec<McpServer> {
    markdown.lines().filter_map(parse_entry).collect()
}

fn parse_entry(line: &str) -> Option<McpServer> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start().strip_prefix('[')?;

    let (name, rest) = rest.split_once("](")?;
    let (url, rest) = rest.split_once(')')?;
    let (name, url) = (name.trim(), url.trim());
    if name.is_empty() || !url.starts_with("http") {
        return None;
    }

    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || !c.is_ascii());
    let description = rest.strip_prefix(['-', ':'])?.trim();
    if description.is_empty() {
        return None;
    }

    Some(McpServer {
        name: name.to_string(),
        url: url.to_string(),
        description: description.to_string(),
    })
}
