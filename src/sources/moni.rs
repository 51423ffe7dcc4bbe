//! Moni social-intelligence API client
//!
//! Moni is account based: project mindshare is derived from the engagement
//! snapshot of each project's official account, and smart-money activity
//! from the "smarts" feed of influential accounts.
//!
//! ## API Reference
//!
//! - `GET /accounts/{handle}/info/full/` → `{ smartEngagement: { moniScore, smartMentionsCount, ... } }`
//! - `GET /accounts/{handle}/smarts/full/?limit=N` → `{ smarts: [...] }`

use super::http::JsonClient;
use super::rate_limit::SlidingWindowLimiter;
use super::trend_estimate::TrendEstimator;
use super::SocialSource;
use crate::error::AlphaError;
use crate::scoring::{ActivityItem, SocialProject};
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const SOURCE_NAME: &str = "moni";
const MAX_IDENTIFIER_LEN: usize = 100;
const MAX_ACTIVITY_LIMIT: usize = 100;

/// Tracked projects and their official accounts, by category
pub const PROJECT_CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "defi",
        &[
            ("Uniswap", "Uniswap"),
            ("Aave", "AaveAave"),
            ("Compound", "compoundfinance"),
            ("MakerDAO", "MakerDAO"),
            ("Curve", "CurveFinance"),
        ],
    ),
    (
        "l1",
        &[
            ("Ethereum", "ethereum"),
            ("Solana", "solana"),
            ("Avalanche", "avalancheavax"),
            ("Cardano", "Cardano"),
            ("Polygon", "0xPolygon"),
        ],
    ),
    (
        "l2",
        &[
            ("Arbitrum", "arbitrum"),
            ("Optimism", "Optimism"),
            ("Base", "base"),
            ("zkSync", "zksync"),
        ],
    ),
    (
        "gaming",
        &[
            ("Axie Infinity", "axieinfinity"),
            ("The Sandbox", "TheSandboxGame"),
            ("Decentraland", "decentraland"),
        ],
    ),
    (
        "ai",
        &[
            ("Fetch.ai", "FetchAI"),
            ("SingularityNET", "SingularityNET"),
            ("Ocean Protocol", "oceanprotocol"),
        ],
    ),
];

/// Engagement counters; null or mistyped numbers decode as 0
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartEngagement {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub moni_score: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub smart_mentions_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub smarts_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub mentions_count: u64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

/// Counts also accept integral floats such as `5.0`
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let count = match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
                .map(|v| v as u64)
        }),
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfoResponse {
    #[serde(default)]
    smart_engagement: Option<SmartEngagement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SmartsResponse {
    #[serde(default)]
    smarts: Vec<RawSmart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawSmart {
    #[serde(default, alias = "text")]
    content: Option<String>,
    #[serde(default)]
    project: Option<ProjectRef>,
    #[serde(default, alias = "createdAt")]
    timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ProjectRef {
    Named { name: Option<String> },
    Plain(String),
}

impl ProjectRef {
    fn name(self) -> Option<String> {
        match self {
            ProjectRef::Named { name } => name,
            ProjectRef::Plain(name) => Some(name),
        }
    }
}

/// Engagement snapshot of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub handle: String,
    pub moni_score: f64,
    pub smart_mentions: u64,
    pub smarts_count: u64,
    pub mentions_count: u64,
}

pub struct MoniClient {
    http: JsonClient,
    estimator: TrendEstimator,
}

impl MoniClient {
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
        limiter: SlidingWindowLimiter,
    ) -> Result<Self, AlphaError> {
        let http = JsonClient::new(SOURCE_NAME, base_url, timeout, limiter, Some(("api-key", api_key)))?;
        Ok(Self {
            http,
            estimator: TrendEstimator::new(),
        })
    }

    pub fn with_estimator(mut self, estimator: TrendEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    fn project_from_snapshot(&self, name: &str, category: &str, snapshot: &AccountSnapshot) -> SocialProject {
        SocialProject {
            name: Some(name.to_string()),
            symbol: Some(name.to_uppercase().chars().take(4).collect()),
            category: Some(category.to_string()),
            account_handle: Some(snapshot.handle.clone()),
            mindshare_score: snapshot.moni_score,
            smart_mentions: snapshot.smart_mentions,
            change_24h: self
                .estimator
                .estimate(snapshot.moni_score, snapshot.smart_mentions),
            change_estimated: true,
        }
    }
}

#[async_trait]
impl SocialSource for MoniClient {
    async fn fetch_projects(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SocialProject>, AlphaError> {
        let groups = catalog_for(category);
        if groups.is_empty() {
            log::warn!("Unknown project category '{}'", category.unwrap_or_default());
            return Ok(Vec::new());
        }

        let per_category = limit / groups.len() + 1;
        let candidates: Vec<(&str, &str, &str)> = groups
            .iter()
            .flat_map(|(cat, entries)| {
                entries
                    .iter()
                    .take(per_category)
                    .map(move |(name, handle)| (*cat, *name, *handle))
            })
            .collect();

        // Paced by the client's limiter
        let snapshots = join_all(
            candidates
                .iter()
                .map(|(_, _, handle)| self.fetch_account(handle)),
        )
        .await;

        let mut projects = Vec::new();
        let mut last_error = None;
        for ((cat, name, handle), snapshot) in candidates.iter().zip(snapshots) {
            match snapshot {
                Ok(snapshot) => projects.push(self.project_from_snapshot(name, cat, &snapshot)),
                Err(e) => {
                    log::debug!("Skipping {} (@{}): {}", name, handle, e);
                    last_error = Some(e);
                }
            }
        }

        // Every lookup failed: report the source as down rather than empty
        if let (true, Some(e)) = (projects.is_empty(), last_error) {
            return Err(e);
        }

        projects.sort_by(|a, b| {
            b.mindshare_score
                .partial_cmp(&a.mindshare_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        projects.truncate(limit);

        log::info!("📊 Fetched mindshare for {} projects", projects.len());
        Ok(projects)
    }

    async fn fetch_account(&self, handle: &str) -> Result<AccountSnapshot, AlphaError> {
        let handle = sanitize_handle(handle)?;
        let path = format!("/accounts/{}/info/full/", handle);
        let response: AccountInfoResponse = self.http.get_json(&path, &[]).await?;
        snapshot_from_response(&handle, response)
    }

    async fn fetch_account_activity(
        &self,
        handle: &str,
        limit: usize,
    ) -> Result<Vec<ActivityItem>, AlphaError> {
        let handle = sanitize_handle(handle)?;
        let limit = limit.clamp(1, MAX_ACTIVITY_LIMIT);
        let path = format!("/accounts/{}/smarts/full/", handle);
        let response: SmartsResponse = self
            .http
            .get_json(&path, &[("limit", limit.to_string())])
            .await?;
        Ok(response.smarts.into_iter().map(activity_from_raw).collect())
    }
}

fn catalog_for(category: Option<&str>) -> Vec<(&'static str, &'static [(&'static str, &'static str)])> {
    match category.map(|c| c.trim().to_lowercase()).filter(|c| !c.is_empty()) {
        Some(wanted) => PROJECT_CATALOG
            .iter()
            .filter(|(cat, _)| *cat == wanted)
            .copied()
            .collect(),
        None => PROJECT_CATALOG.to_vec(),
    }
}

fn snapshot_from_response(handle: &str, response: AccountInfoResponse) -> Result<AccountSnapshot, AlphaError> {
    let engagement = response.smart_engagement.ok_or_else(|| {
        AlphaError::source_unavailable(SOURCE_NAME, format!("no engagement data for @{}", handle))
    })?;

    Ok(AccountSnapshot {
        handle: handle.to_string(),
        moni_score: if engagement.moni_score.is_finite() {
            engagement.moni_score.max(0.0)
        } else {
            0.0
        },
        smart_mentions: engagement.smart_mentions_count,
        smarts_count: engagement.smarts_count,
        mentions_count: engagement.mentions_count,
    })
}

fn activity_from_raw(raw: RawSmart) -> ActivityItem {
    ActivityItem {
        content: raw.content,
        project: raw
            .project
            .and_then(ProjectRef::name)
            .filter(|n| !n.trim().is_empty()),
        timestamp: raw.timestamp,
    }
}

/// Validate an account handle for use in a request path
///
/// Strips whitespace and a leading `@`; only `[A-Za-z0-9._-]` up to 100
/// characters is accepted.
pub fn sanitize_handle(handle: &str) -> Result<String, AlphaError> {
    let trimmed = handle.trim().trim_start_matches('@');
    validate_identifier(trimmed, "account handle")
}

fn validate_identifier(value: &str, what: &str) -> Result<String, AlphaError> {
    if value.is_empty() {
        return Err(AlphaError::InvalidParameter(format!("{} must be non-empty", what)));
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(AlphaError::InvalidParameter(format!("{} too long", what)));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(AlphaError::InvalidParameter(format!(
            "{} contains invalid characters: {}",
            what, value
        )));
    }
    Ok(value.to_string())
}
