//! Cross-source correlation engine for multi-platform opportunity detection
//!
//! Records from the social, DeFi and market sources are merged by fuzzy
//! name match: names are case-folded and two names refer to the same
//! project when either contains the other. An opportunity needs at least
//! two independent sources behind it.

use super::emergence::EmergingProject;
use super::normalizer::{ProtocolRecord, TrendingCoin};
use crate::error::AlphaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SOCIAL_WEIGHT: f64 = 0.40;
pub const DEFI_WEIGHT: f64 = 0.35;
pub const MARKET_WEIGHT: f64 = 0.25;
const MIN_DEFI_TVL: f64 = 10_000_000.0;
const MIN_SOURCES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Social,
    DefiLlama,
    CoinGecko,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Social => "social",
            SourceTag::DefiLlama => "defillama",
            SourceTag::CoinGecko => "coingecko",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw record a source contributed to an opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceRecord {
    Social(EmergingProject),
    Protocol(ProtocolRecord),
    Coin(TrendingCoin),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeOpportunity {
    /// Case-folded name of the first record that created the entry
    pub key: String,
    /// Display name of the first record that created the entry
    pub display_name: String,
    /// Sum of `per_source_score`
    pub total_score: f64,
    pub per_source_data: BTreeMap<SourceTag, SourceRecord>,
    /// Weighted contribution of the record kept for each source
    pub per_source_score: BTreeMap<SourceTag, f64>,
}

impl CompositeOpportunity {
    fn new(key: String, display_name: &str) -> Self {
        Self {
            key,
            display_name: display_name.to_string(),
            total_score: 0.0,
            per_source_data: BTreeMap::new(),
            per_source_score: BTreeMap::new(),
        }
    }

    pub fn sources(&self) -> Vec<SourceTag> {
        self.per_source_data.keys().copied().collect()
    }

    pub fn source_count(&self) -> usize {
        self.per_source_data.len()
    }

    /// Each source counts once; a later record from the same source
    /// replaces the kept one only when it scores higher
    fn contribute(&mut self, tag: SourceTag, score: f64, record: SourceRecord) {
        if let Some(&kept) = self.per_source_score.get(&tag) {
            if score <= kept {
                log::debug!("Ignoring weaker {} match for '{}'", tag, self.key);
                return;
            }
        }
        self.per_source_score.insert(tag, score);
        self.per_source_data.insert(tag, record);
        self.total_score = self.per_source_score.values().sum();
    }
}

/// Filters applied to one scan
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationRequest {
    pub sectors: Vec<String>,
    pub confidence_threshold: f64,
    pub max_results: usize,
}

/// Fetch outcome of each source for one scan
pub struct SourceOutcomes {
    pub social: Result<Vec<EmergingProject>, AlphaError>,
    pub defi: Result<Vec<ProtocolRecord>, AlphaError>,
    pub market: Result<Vec<TrendingCoin>, AlphaError>,
}

pub struct CrossSourceCorrelator;

impl CrossSourceCorrelator {
    pub fn new() -> Self {
        Self
    }

    /// Correlate whatever the sources returned
    ///
    /// A failed source is logged and contributes nothing. Only when every
    /// source failed does the scan itself fail.
    pub fn correlate_outcomes(
        &self,
        outcomes: SourceOutcomes,
        request: &CorrelationRequest,
    ) -> Result<Vec<CompositeOpportunity>, AlphaError> {
        let mut failures = Vec::new();

        let social = take_or_log(outcomes.social, &mut failures);
        let defi = take_or_log(outcomes.defi, &mut failures);
        let market = take_or_log(outcomes.market, &mut failures);

        if failures.len() == 3 {
            log::error!("❌ Opportunity scan failed: no source responded");
            return Err(AlphaError::ScanFailed { failures });
        }

        Ok(self.correlate(&social, &defi, &market, request))
    }

    /// Merge the three record sets into ranked composite opportunities
    pub fn correlate(
        &self,
        social: &[EmergingProject],
        defi: &[ProtocolRecord],
        market: &[TrendingCoin],
        request: &CorrelationRequest,
    ) -> Vec<CompositeOpportunity> {
        let sectors: Vec<String> = request
            .sectors
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let defi_requested = sectors.iter().any(|s| s == "defi");

        let mut entries: Vec<CompositeOpportunity> = Vec::new();

        for project in social {
            if !sector_matches(&project.signal.category, &sectors) {
                continue;
            }
            let score = project.confidence_score() * SOCIAL_WEIGHT;
            merge(
                &mut entries,
                &project.signal.name,
                SourceTag::Social,
                score,
                SourceRecord::Social(project.clone()),
            );
        }

        if defi_requested {
            for protocol in defi {
                if protocol.tvl.is_nan() || protocol.tvl <= MIN_DEFI_TVL {
                    continue;
                }
                let Some(name) = protocol.name.as_deref() else {
                    continue;
                };
                let score = (protocol.tvl / 1e9).min(1.0) * DEFI_WEIGHT;
                merge(
                    &mut entries,
                    name,
                    SourceTag::DefiLlama,
                    score,
                    SourceRecord::Protocol(protocol.clone()),
                );
            }
        }

        for coin in market {
            let Some(name) = coin.name.as_deref() else {
                continue;
            };
            let score = (coin.score / 10.0) * MARKET_WEIGHT;
            merge(
                &mut entries,
                name,
                SourceTag::CoinGecko,
                score,
                SourceRecord::Coin(coin.clone()),
            );
        }

        let mut retained: Vec<CompositeOpportunity> = entries
            .into_iter()
            .filter(|e| e.source_count() >= MIN_SOURCES)
            .filter(|e| e.total_score >= request.confidence_threshold)
            .collect();

        retained.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        retained.truncate(request.max_results);

        log::info!(
            "🔗 Correlated {} social, {} defi, {} market records into {} opportunities",
            social.len(),
            defi.len(),
            market.len(),
            retained.len()
        );

        retained
    }
}

impl Default for CrossSourceCorrelator {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-folded names match when either contains the other
pub fn names_match(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

fn sector_matches(category: &str, sectors: &[String]) -> bool {
    let category = category.trim().to_lowercase();
    if category.is_empty() {
        return false;
    }
    sectors
        .iter()
        .any(|sector| category == *sector || category.contains(sector.as_str()) || sector.contains(category.as_str()))
}

fn merge(
    entries: &mut Vec<CompositeOpportunity>,
    name: &str,
    tag: SourceTag,
    score: f64,
    record: SourceRecord,
) {
    let key = name.trim().to_lowercase();
    if key.is_empty() {
        return;
    }

    match entries.iter_mut().find(|e| names_match(&e.key, &key)) {
        Some(entry) => entry.contribute(tag, score, record),
        None => {
            let mut entry = CompositeOpportunity::new(key, name.trim());
            entry.contribute(tag, score, record);
            entries.push(entry);
        }
    }
}

fn take_or_log<T>(outcome: Result<Vec<T>, AlphaError>, failures: &mut Vec<AlphaError>) -> Vec<T> {
    match outcome {
        Ok(records) => records,
        Err(e) => {
            log::warn!("⚠️  Source excluded from correlation: {}", e);
            failures.push(e);
            Vec::new()
        }
    }
}
