//! Tool argument types with their documented defaults

use crate::error::AlphaError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const MAX_PROJECT_NAME_LEN: usize = 100;
const MAX_LOOKBACK_DAYS: u32 = 365;

/// Analysis window accepted by the tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
}

impl Timeframe {
    /// Unknown values fall back to `fallback` with a warning
    pub fn parse_or(value: &str, fallback: Timeframe) -> Self {
        match value.trim().to_lowercase().as_str() {
            "1h" => Timeframe::OneHour,
            "24h" => Timeframe::OneDay,
            "7d" => Timeframe::SevenDays,
            "30d" => Timeframe::ThirtyDays,
            "daily" => Timeframe::Daily,
            "weekly" => Timeframe::Weekly,
            other => {
                log::warn!(
                    "Invalid timeframe '{}', defaulting to {}",
                    other,
                    fallback.as_str()
                );
                fallback
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::OneDay => "24h",
            Timeframe::SevenDays => "7d",
            Timeframe::ThirtyDays => "30d",
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectEmergingParams {
    #[serde(default = "default_discovery_method")]
    pub discovery_method: String,
    #[serde(default = "default_weekly")]
    pub timeframe: String,
    #[serde(default = "default_confidence")]
    pub min_confidence: f64,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SmartMoneyParams {
    #[serde(default = "default_wallet_tier")]
    pub wallet_tier: String,
    #[serde(default = "default_daily")]
    pub timeframe: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectHealthParams {
    pub project_name: String,
    #[serde(default = "default_true")]
    pub include_fundamentals: bool,
    #[serde(default = "default_true")]
    pub risk_assessment: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpportunityScanParams {
    #[serde(default = "default_sectors")]
    pub sectors: Vec<String>,
    #[serde(default = "default_weekly")]
    pub timeframe: String,
    #[serde(default = "default_confidence")]
    pub confidence_threshold: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CryptoTrendsParams {
    #[serde(default = "default_daily")]
    pub timeframe: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiTrendsParams {
    #[serde(default = "default_focus")]
    pub focus: String,
    #[serde(default = "default_daily_window")]
    pub timeframe: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TechTopicParams {
    pub topic: String,
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewReleasesParams {
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyBriefingParams {
    #[serde(default = "default_daily_window")]
    pub timeframe: String,
    #[serde(default = "default_true")]
    pub include_crypto: bool,
    #[serde(default = "default_true")]
    pub include_tech: bool,
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
}

impl Default for DetectEmergingParams {
    fn default() -> Self {
        Self {
            discovery_method: default_discovery_method(),
            timeframe: default_weekly(),
            min_confidence: default_confidence(),
            limit: default_limit(),
        }
    }
}

impl Default for SmartMoneyParams {
    fn default() -> Self {
        Self {
            wallet_tier: default_wallet_tier(),
            timeframe: default_daily(),
            limit: default_limit(),
        }
    }
}

impl Default for OpportunityScanParams {
    fn default() -> Self {
        Self {
            sectors: default_sectors(),
            timeframe: default_weekly(),
            confidence_threshold: default_confidence(),
            max_results: default_max_results(),
        }
    }
}

impl Default for CryptoTrendsParams {
    fn default() -> Self {
        Self {
            timeframe: default_daily(),
            category: None,
            limit: default_limit(),
        }
    }
}

impl Default for AiTrendsParams {
    fn default() -> Self {
        Self {
            focus: default_focus(),
            timeframe: default_daily_window(),
        }
    }
}

impl Default for NewReleasesParams {
    fn default() -> Self {
        Self { days: default_days() }
    }
}

impl Default for DailyBriefingParams {
    fn default() -> Self {
        Self {
            timeframe: default_daily_window(),
            include_crypto: true,
            include_tech: true,
            focus_areas: None,
        }
    }
}

fn default_discovery_method() -> String {
    "all".to_string()
}

fn default_wallet_tier() -> String {
    "tier1".to_string()
}

fn default_weekly() -> String {
    Timeframe::SevenDays.as_str().to_string()
}

fn default_daily() -> String {
    Timeframe::OneDay.as_str().to_string()
}

fn default_daily_window() -> String {
    Timeframe::Daily.as_str().to_string()
}

fn default_focus() -> String {
    "all".to_string()
}

fn default_days() -> u32 {
    7
}

fn default_confidence() -> f64 {
    0.7
}

fn default_limit() -> usize {
    20
}

fn default_max_results() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_sectors() -> Vec<String> {
    ["defi", "l1", "l2", "ai"].iter().map(|s| s.to_string()).collect()
}

/// Decode tool arguments; absent or null arguments mean "all defaults"
pub fn parse_arguments<T: DeserializeOwned>(arguments: Option<&Value>) -> Result<T, AlphaError> {
    match arguments {
        None | Some(Value::Null) => Ok(serde_json::from_value(Value::Object(Default::default()))?),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

/// Validate a free-text project name used for local lookups
///
/// Letters, digits, spaces and `._-`, at most 100 characters.
pub fn validate_project_name(name: &str) -> Result<String, AlphaError> {
    validate_search_term("project_name", name)
}

/// Same character rules for a tech topic sent upstream as a search term
pub fn validate_topic(topic: &str) -> Result<String, AlphaError> {
    validate_search_term("topic", topic)
}

fn validate_search_term(field: &str, value: &str) -> Result<String, AlphaError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AlphaError::InvalidParameter(format!(
            "'{}' parameter is required",
            field
        )));
    }
    if value.chars().count() > MAX_PROJECT_NAME_LEN {
        return Err(AlphaError::InvalidParameter(format!("{} too long", field)));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
    {
        return Err(AlphaError::InvalidParameter(format!(
            "{} contains invalid characters: {}",
            field, value
        )));
    }
    Ok(value.to_string())
}

/// Lookback window in days, 1 to 365
pub fn validate_days(days: u32) -> Result<u32, AlphaError> {
    if days == 0 || days > MAX_LOOKBACK_DAYS {
        return Err(AlphaError::InvalidParameter(format!(
            "days must be between 1 and {}, got {}",
            MAX_LOOKBACK_DAYS, days
        )));
    }
    Ok(days)
}
