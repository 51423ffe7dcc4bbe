//! Upstream source clients
//!
//! The tool service depends only on the traits below, so tests can
//! drive it with in-memory sources. Each concrete client owns its HTTP pool
//! and its own rate limiter.

pub mod coingecko;
pub mod defillama;
pub mod github;
pub mod http;
pub mod mcp_catalog;
pub mod moni;
pub mod rate_limit;
pub mod retry;
pub mod trend_estimate;

use crate::error::AlphaError;
use crate::scoring::{
    ActivityItem, McpServer, ProtocolRecord, Repository, SocialProject, TrendingCoin,
};
use async_trait::async_trait;

pub use coingecko::CoinGeckoClient;
pub use defillama::{DefiLlamaClient, TvlMomentum, TvlTier};
pub use github::GitHubClient;
pub use mcp_catalog::McpCatalogClient;
pub use moni::{AccountSnapshot, MoniClient};
pub use rate_limit::SlidingWindowLimiter;
pub use trend_estimate::TrendEstimator;

/// Social-intelligence source (project mindshare, account activity)
#[async_trait]
pub trait SocialSource: Send + Sync {
    /// Tracked projects, optionally restricted to one category,
    /// sorted by mindshare and capped at `limit`
    async fn fetch_projects(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SocialProject>, AlphaError>;

    async fn fetch_account(&self, handle: &str) -> Result<AccountSnapshot, AlphaError>;

    /// Most recent activity items, newest first
    async fn fetch_account_activity(
        &self,
        handle: &str,
        limit: usize,
    ) -> Result<Vec<ActivityItem>, AlphaError>;
}

/// DeFi TVL source
#[async_trait]
pub trait ProtocolSource: Send + Sync {
    /// Protocols with TVL at or above `min_tvl`, largest first
    async fn fetch_protocols(&self, min_tvl: f64, limit: usize) -> Result<Vec<ProtocolRecord>, AlphaError>;
}

/// Market-data source
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, AlphaError>;
}

/// Code-hosting repository search
#[async_trait]
pub trait CodeSource: Send + Sync {
    /// Repositories matching a search `query`, most starred first
    async fn search_repositories(&self, query: &str, limit: usize) -> Result<Vec<Repository>, AlphaError>;
}

/// Curated list of MCP servers
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_servers(&self) -> Result<Vec<McpServer>, AlphaError>;
}
