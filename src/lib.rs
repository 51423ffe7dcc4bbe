//! Daily Alpha - crypto signal scoring and cross-source correlation
//!
//! Polls a social-intelligence API (Moni), DeFi TVL (DeFiLlama) and market
//! trending data (CoinGecko), scores what comes back and exposes the results
//! as tools over a JSON-RPC stdio server. GitHub repository search and the
//! community MCP server list feed the AI/tech reports and the daily briefing.
//!
//! # Architecture
//!
//! ```text
//! sources (MoniClient, DefiLlamaClient, CoinGeckoClient, GitHubClient, McpCatalogClient)
//!     ↓  concurrent fetch, per-client rate limit
//! scoring (normalize → emergence / health / smart money → correlator)
//!     ↓
//! tools::AlphaService → render (markdown)
//!     ↓
//! server (JSON-RPC over stdio)
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod scoring;
pub mod server;
pub mod sources;
pub mod tools;

pub use config::{AlphaConfig, ConfigError};
pub use error::AlphaError;
pub use tools::AlphaService;
