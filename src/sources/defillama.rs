//! DeFiLlama TVL client
//!
//! Free API, no authentication. Only the protocol listing is used:
//! `GET /protocols` returns every tracked protocol with current TVL and
//! 1h/1d/7d percentage changes.

use super::http::JsonClient;
use super::rate_limit::SlidingWindowLimiter;
use super::ProtocolSource;
use crate::error::AlphaError;
use crate::scoring::ProtocolRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const SOURCE_NAME: &str = "defillama";

/// Raw `/protocols` entry; TVL may be null for delisted protocols
#[derive(Debug, Clone, Default, Deserialize)]
struct RawProtocol {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    tvl: Option<f64>,
    #[serde(default)]
    change_1h: Option<f64>,
    #[serde(default)]
    change_1d: Option<f64>,
    #[serde(default)]
    change_7d: Option<f64>,
}

impl From<RawProtocol> for ProtocolRecord {
    fn from(raw: RawProtocol) -> Self {
        ProtocolRecord {
            name: raw.name,
            slug: raw.slug,
            category: raw.category,
            tvl: raw.tvl.unwrap_or(0.0),
            change_1h: raw.change_1h,
            change_1d: raw.change_1d,
            change_7d: raw.change_7d,
        }
    }
}

/// Short-horizon TVL trend label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TvlMomentum {
    Accelerating,
    Growing,
    Declining,
    Stable,
    Mixed,
    Unknown,
}

impl TvlMomentum {
    /// Recent changes weigh more: with both 1h and 1d available the
    /// combination decides, otherwise 1d alone.
    pub fn from_changes(change_1h: Option<f64>, change_1d: Option<f64>) -> Self {
        match (change_1h, change_1d) {
            (Some(h), Some(d)) => {
                if h > 2.0 && d > 5.0 {
                    TvlMomentum::Accelerating
                } else if h > 0.0 && d > 2.0 {
                    TvlMomentum::Growing
                } else if h < -2.0 && d < -5.0 {
                    TvlMomentum::Declining
                } else if d.abs() < 1.0 {
                    TvlMomentum::Stable
                } else {
                    TvlMomentum::Mixed
                }
            }
            (None, Some(d)) => {
                if d > 5.0 {
                    TvlMomentum::Growing
                } else if d < -5.0 {
                    TvlMomentum::Declining
                } else {
                    TvlMomentum::Stable
                }
            }
            _ => TvlMomentum::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TvlMomentum::Accelerating => "🚀 Accelerating",
            TvlMomentum::Growing => "📈 Growing",
            TvlMomentum::Declining => "📉 Declining",
            TvlMomentum::Stable => "➡️ Stable",
            TvlMomentum::Mixed => "🔄 Mixed",
            TvlMomentum::Unknown => "❓ Unknown",
        }
    }
}

impl fmt::Display for TvlMomentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// TVL size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TvlTier {
    Early,
    Emerging,
    Established,
    Major,
    BlueChip,
}

impl TvlTier {
    pub fn from_tvl(tvl: f64) -> Self {
        if tvl >= 1e9 {
            TvlTier::BlueChip
        } else if tvl >= 1e8 {
            TvlTier::Major
        } else if tvl >= 1e7 {
            TvlTier::Established
        } else if tvl >= 1e6 {
            TvlTier::Emerging
        } else {
            TvlTier::Early
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TvlTier::BlueChip => "Blue Chip",
            TvlTier::Major => "Major",
            TvlTier::Established => "Established",
            TvlTier::Emerging => "Emerging",
            TvlTier::Early => "Early",
        }
    }
}

pub struct DefiLlamaClient {
    http: JsonClient,
}

impl DefiLlamaClient {
    pub fn new(base_url: &str, timeout: Duration, limiter: SlidingWindowLimiter) -> Result<Self, AlphaError> {
        Ok(Self {
            http: JsonClient::new(SOURCE_NAME, base_url, timeout, limiter, None)?,
        })
    }
}

#[async_trait]
impl ProtocolSource for DefiLlamaClient {
    async fn fetch_protocols(&self, min_tvl: f64, limit: usize) -> Result<Vec<ProtocolRecord>, AlphaError> {
        let raw: Vec<RawProtocol> = self.http.get_json("/protocols", &[]).await?;
        let total = raw.len();
        let protocols = select_protocols(raw, min_tvl, limit);

        log::info!(
            "🏦 {} of {} protocols above ${:.0} TVL",
            protocols.len(),
            total,
            min_tvl
        );
        Ok(protocols)
    }
}

/// Drop null/small TVL entries, sort by TVL descending, cap at `limit`
fn select_protocols(raw: Vec<RawProtocol>, min_tvl: f64, limit: usize) -> Vec<ProtocolRecord> {
    let mut protocols: Vec<ProtocolRecord> = raw
        .into_iter()
        .filter(|p| matches!(p.tvl, Some(tvl) if tvl.is_finite() && tvl >= min_tvl))
        .map(ProtocolRecord::from)
        .collect();

    protocols.sort_by(|a, b| b.tvl.partial_cmp(&a.tvl).unwrap_or(std::cmp::Ordering::Equal));
    protocols.truncate(limit);
    protocols
}
