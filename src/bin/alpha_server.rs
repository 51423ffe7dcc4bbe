//! Daily Alpha tool server
//!
//! Speaks JSON-RPC 2.0 over stdin/stdout. Logs go to stderr so they never
//! corrupt the protocol stream.
//!
//! Usage:
//!   cargo run --release --bin alpha_server
//!
//! Environment variables:
//!   MONI_API_KEY - enables the social tools (optional)
//!   COINGECKO_API_KEY - CoinGecko demo key (optional)
//!   GITHUB_TOKEN - raises the repository search rate limit (optional)
//!   MCP_CATALOG_URL - raw MCP server list (default: awesome-mcp-servers README)
//!   REQUEST_TIMEOUT_SECS - per-request timeout (default: 30)
//!   RUST_LOG - log filter (default: info)

use daily_alpha::{server, AlphaConfig, AlphaService};
use dotenv::dotenv;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let config = AlphaConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.rust_log.as_str()))
        .target(env_logger::Target::Stderr)
        .init();

    info!("🚀 Daily Alpha tool server");
    info!("   ├─ Version: {}", env!("CARGO_PKG_VERSION"));
    info!("   ├─ Social source: {}", if config.social_enabled() { "enabled" } else { "disabled" });
    info!("   ├─ DeFiLlama: {}", config.defillama_base_url);
    info!("   ├─ CoinGecko: {}", config.coingecko_base_url);
    info!(
        "   └─ GitHub: {} ({})",
        config.github_base_url,
        if config.github_authenticated() { "token" } else { "anonymous" }
    );

    let service = AlphaService::from_config(&config)?;
    server::run_stdio(&service).await?;

    info!("👋 Server stopped");
    Ok(())
}
