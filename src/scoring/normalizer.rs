//! Signal normalization from per-source records to the unified NormalizedSignal

use crate::error::AlphaError;
use serde::{Deserialize, Serialize};

/// Project mindshare record from the social-intelligence source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub account_handle: Option<String>,
    #[serde(default)]
    pub mindshare_score: f64,
    #[serde(default)]
    pub smart_mentions: u64,
    #[serde(default)]
    pub change_24h: f64,
    /// Set when `change_24h` came from the trend estimator rather than a measured series
    #[serde(default)]
    pub change_estimated: bool,
}

/// DeFi protocol record (TVL source)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tvl: f64,
    #[serde(default)]
    pub change_1h: Option<f64>,
    #[serde(default)]
    pub change_1d: Option<f64>,
    #[serde(default)]
    pub change_7d: Option<f64>,
}

/// Trending coin record (market-data source)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    /// Trend score, roughly 0-10
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
}

/// Any raw record a source client can hand to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Social(SocialProject),
    Protocol(ProtocolRecord),
    Coin(TrendingCoin),
}

impl RawRecord {
    pub fn source_name(&self) -> &'static str {
        match self {
            RawRecord::Social(_) => "social",
            RawRecord::Protocol(_) => "protocol",
            RawRecord::Coin(_) => "coin",
        }
    }
}

/// Common scoring input shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSignal {
    pub name: String,
    pub category: String,
    pub engagement_score: f64,
    pub secondary_mentions: u64,
    pub change_pct: f64,
}

impl NormalizedSignal {
    pub fn new(
        name: &str,
        category: &str,
        engagement_score: f64,
        secondary_mentions: u64,
        change_pct: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            category: normalize_category(Some(category)),
            engagement_score: non_negative(engagement_score),
            secondary_mentions,
            change_pct: finite_or_zero(change_pct),
        }
    }

    /// No engagement, no mentions, no movement
    pub fn is_empty(&self) -> bool {
        self.engagement_score == 0.0 && self.secondary_mentions == 0 && self.change_pct == 0.0
    }
}

/// Convert one raw record into a NormalizedSignal
///
/// Missing numbers become 0 and a missing category becomes `"unknown"`.
/// Only a missing or blank name is an error.
pub fn normalize(record: &RawRecord) -> Result<NormalizedSignal, AlphaError> {
    let (name, category, engagement, mentions, change) = match record {
        RawRecord::Social(p) => (
            p.name.as_deref(),
            p.category.as_deref(),
            p.mindshare_score,
            p.smart_mentions,
            p.change_24h,
        ),
        RawRecord::Protocol(p) => (
            p.name.as_deref(),
            p.category.as_deref(),
            p.tvl,
            0,
            p.change_1d.unwrap_or(0.0),
        ),
        RawRecord::Coin(c) => (
            c.name.as_deref(),
            None,
            c.score,
            0,
            c.price_change_24h.unwrap_or(0.0),
        ),
    };

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AlphaError::MissingIdentity {
            source: record.source_name().to_string(),
        })?;

    Ok(NormalizedSignal {
        name: name.to_string(),
        category: normalize_category(category),
        engagement_score: non_negative(engagement),
        secondary_mentions: mentions,
        change_pct: finite_or_zero(change),
    })
}

/// Normalize a batch, skipping records without identity
pub fn normalize_batch(records: &[RawRecord]) -> Vec<NormalizedSignal> {
    records
        .iter()
        .filter_map(|record| match normalize(record) {
            Ok(signal) => Some(signal),
            Err(e) => {
                log::debug!("⚠️  Skipping record: {}", e);
                None
            }
        })
        .collect()
}

fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_lowercase(),
        _ => "unknown".to_string(),
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_social_record_with_missing_fields() {
        let json = r#"{"name":"Aave","category":"DeFi","mindshare_score":12000.5}"#;
        let project: SocialProject = serde_json::from_str(json).unwrap();

        let signal = normalize(&RawRecord::Social(project)).unwrap();
        assert_eq!(signal.name, "Aave");
        assert_eq!(signal.category, "defi");
        assert_eq!(signal.engagement_score, 12000.5);
        assert_eq!(signal.secondary_mentions, 0);
        assert_eq!(signal.change_pct, 0.0);
    }

    #[test]
    fn test_missing_category_defaults_to_unknown() {
        let coin = TrendingCoin {
            name: Some("Pepe".to_string()),
            score: 7.0,
            ..Default::default()
        };

        let signal = normalize(&RawRecord::Coin(coin)).unwrap();
        assert_eq!(signal.category, "unknown");
        assert_eq!(signal.engagement_score, 7.0);
    }

    #[test]
    fn test_protocol_uses_one_day_change() {
        let protocol = ProtocolRecord {
            name: Some("Lido".to_string()),
            category: Some("Liquid Staking".to_string()),
            tvl: 25_000_000_000.0,
            change_1d: Some(-2.5),
            ..Default::default()
        };

        let signal = normalize(&RawRecord::Protocol(protocol)).unwrap();
        assert_eq!(signal.category, "liquid staking");
        assert_eq!(signal.change_pct, -2.5);
    }

    #[test]
    fn test_malformed_numbers_coerce_to_zero() {
        let project = SocialProject {
            name: Some("Broken".to_string()),
            mindshare_score: -50.0,
            change_24h: f64::NAN,
            ..Default::default()
        };

        let signal = normalize(&RawRecord::Social(project)).unwrap();
        assert_eq!(signal.engagement_score, 0.0);
        assert_eq!(signal.change_pct, 0.0);
        assert!(signal.is_empty());
    }

    #[test]
    fn test_blank_name_is_missing_identity() {
        let project = SocialProject {
            name: Some("   ".to_string()),
            mindshare_score: 100.0,
            ..Default::default()
        };

        let err = normalize(&RawRecord::Social(project)).unwrap_err();
        assert_eq!(
            err,
            AlphaError::MissingIdentity {
                source: "social".to_string()
            }
        );
    }

    #[test]
    fn test_batch_skips_only_nameless_records() {
        let records = vec![
            RawRecord::Protocol(ProtocolRecord::default()),
            RawRecord::Protocol(ProtocolRecord {
                name: Some("Curve".to_string()),
                tvl: 2_000_000_000.0,
                ..Default::default()
            }),
        ];

        let signals = normalize_batch(&records);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].name, "Curve");
    }
}
