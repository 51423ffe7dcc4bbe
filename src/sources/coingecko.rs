//! CoinGecko market-data client
//!
//! ## API Reference
//!
//! Endpoint: `GET /search/trending`
//! Returns: `{ coins: [ { item: { id, name, symbol, market_cap_rank, score, data } } ] }`
//!
//! The free tier allows roughly 30 calls/minute; the default limiter keeps
//! a buffer below that.

use super::http::JsonClient;
use super::rate_limit::SlidingWindowLimiter;
use super::MarketSource;
use crate::error::AlphaError;
use crate::scoring::TrendingCoin;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const SOURCE_NAME: &str = "coingecko";

#[derive(Debug, Default, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    coins: Vec<TrendingEntry>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntry {
    item: TrendingItem,
}

#[derive(Debug, Deserialize)]
struct TrendingItem {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    data: Option<TrendingData>,
}

#[derive(Debug, Deserialize)]
struct TrendingData {
    #[serde(default)]
    price_change_percentage_24h: HashMap<String, f64>,
}

impl From<TrendingItem> for TrendingCoin {
    fn from(item: TrendingItem) -> Self {
        TrendingCoin {
            id: item.id,
            name: item.name,
            symbol: item.symbol.map(|s| s.to_uppercase()),
            score: item.score.filter(|s| s.is_finite()).unwrap_or(0.0),
            market_cap_rank: item.market_cap_rank,
            price_change_24h: item
                .data
                .and_then(|d| d.price_change_percentage_24h.get("usd").copied()),
        }
    }
}

/// Price momentum across 1h/24h moves
pub fn price_momentum(change_1h: Option<f64>, change_24h: Option<f64>) -> &'static str {
    let Some(day) = change_24h else {
        return "❓ No data";
    };
    let hour = change_1h.unwrap_or(0.0);

    if hour > 5.0 && day > 10.0 {
        "🚀 Strong rally"
    } else if hour > 2.0 && day > 5.0 {
        "📈 Rising"
    } else if hour < -5.0 && day < -10.0 {
        "📉 Sharp decline"
    } else if hour < -2.0 && day < -5.0 {
        "🔻 Declining"
    } else if day.abs() < 2.0 {
        "➡️ Stable"
    } else {
        "🔄 Mixed"
    }
}

pub struct CoinGeckoClient {
    http: JsonClient,
}

impl CoinGeckoClient {
    /// `api_key` is the optional demo key, sent as `x-cg-demo-api-key`
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
        limiter: SlidingWindowLimiter,
    ) -> Result<Self, AlphaError> {
        let auth = api_key.map(|key| ("x-cg-demo-api-key", key));
        Ok(Self {
            http: JsonClient::new(SOURCE_NAME, base_url, timeout, limiter, auth)?,
        })
    }
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, AlphaError> {
        let response: TrendingResponse = self.http.get_json("/search/trending", &[]).await?;
        let coins: Vec<TrendingCoin> = parse_trending(response);
        log::info!("🔥 {} trending coins", coins.len());
        Ok(coins)
    }
}

fn parse_trending(response: TrendingResponse) -> Vec<TrendingCoin> {
    response
        .coins
        .into_iter()
        .map(|entry| TrendingCoin::from(entry.item))
        .collect()
}
