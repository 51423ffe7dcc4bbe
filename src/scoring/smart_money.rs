//! Smart-money activity significance scoring

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of most-recent activity items inspected per account
pub const RECENT_ACTIVITY_WINDOW: usize = 5;
const MAX_KEYWORDS: usize = 10;
const MIN_INFLUENCE: f64 = 1_000.0;
const MIN_SIGNIFICANCE: f64 = 0.3;

/// Influential account group to poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletTier {
    Tier1,
    Institutional,
    Whale,
}

impl WalletTier {
    /// Unknown tiers fall back to `Tier1`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "institutional" => WalletTier::Institutional,
            "whale" => WalletTier::Whale,
            "tier1" => WalletTier::Tier1,
            other => {
                log::warn!("Invalid wallet_tier '{}', defaulting to tier1", other);
                WalletTier::Tier1
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WalletTier::Tier1 => "tier1",
            WalletTier::Institutional => "institutional",
            WalletTier::Whale => "whale",
        }
    }

    /// Account handles tracked for this tier
    pub fn accounts(&self) -> &'static [&'static str] {
        match self {
            WalletTier::Tier1 => &[
                "VitalikButerin",
                "echo_0x",
                "naval",
                "balajis",
                "AndreCronjeTech",
            ],
            WalletTier::Institutional => &[
                "a16z",
                "dragonfly_cap",
                "polychain",
                "paradigm",
                "hasufl",
            ],
            WalletTier::Whale => &["DefiWhale", "lookonchain", "unusual_whales"],
        }
    }
}

/// One recent post or mention from an account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    #[serde(default)]
    pub content: Option<String>,
    /// Project explicitly tagged in the item, if any
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartMoneyActivity {
    pub account_handle: String,
    pub significance_score: f64,
    pub influence_score: f64,
    pub secondary_mentions: u64,
    pub keywords: Vec<String>,
    pub mentioned_projects: Vec<String>,
    pub timeframe: String,
}

pub struct SmartMoneyScorer;

impl SmartMoneyScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score one account's recent activity
    ///
    /// Returns `None` for accounts below the influence floor or whose
    /// significance stays under 0.3.
    pub fn score(
        &self,
        account_handle: &str,
        influence_score: f64,
        secondary_mentions: u64,
        recent: &[ActivityItem],
        timeframe: &str,
    ) -> Option<SmartMoneyActivity> {
        if influence_score.is_nan() || influence_score < MIN_INFLUENCE {
            return None;
        }

        let window = &recent[..recent.len().min(RECENT_ACTIVITY_WINDOW)];
        let mentioned_projects = mentioned_projects(window);
        let keywords = extract_keywords(window.iter().filter_map(|item| item.content.as_deref()));

        let mut significance = 0.0;

        if influence_score > 10_000.0 {
            significance += 0.4;
        } else if influence_score > 5_000.0 {
            significance += 0.2;
        }

        if secondary_mentions > 10 {
            significance += 0.3;
        } else if secondary_mentions > 5 {
            significance += 0.15;
        }

        if !mentioned_projects.is_empty() {
            significance += 0.3;
        }

        if significance < MIN_SIGNIFICANCE {
            log::debug!(
                "Dropping @{} (significance {:.2} below threshold)",
                account_handle,
                significance
            );
            return None;
        }

        Some(SmartMoneyActivity {
            account_handle: account_handle.to_string(),
            significance_score: f64::min(significance, 1.0),
            influence_score,
            secondary_mentions,
            keywords,
            mentioned_projects,
            timeframe: timeframe.to_string(),
        })
    }
}

impl Default for SmartMoneyScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort activities by significance, highest first (stable)
pub fn rank_activities(activities: &mut [SmartMoneyActivity]) {
    activities.sort_by(|a, b| {
        b.significance_score
            .partial_cmp(&a.significance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Lowercased alphabetic tokens longer than 3 chars, unique, at most 10
pub fn extract_keywords<'a>(contents: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for content in contents {
        for word in content.split_whitespace() {
            let word = word.to_lowercase();
            if word.chars().count() > 3
                && word.chars().all(char::is_alphabetic)
                && seen.insert(word.clone())
            {
                keywords.push(word);
                if keywords.len() == MAX_KEYWORDS {
                    return keywords;
                }
            }
        }
    }

    keywords
}

fn mentioned_projects(items: &[ActivityItem]) -> Vec<String> {
    let mut projects: Vec<String> = Vec::new();
    for name in items.iter().filter_map(|item| item.project.as_deref()) {
        let name = name.trim();
        if !name.is_empty() && !projects.iter().any(|p| p.eq_ignore_ascii_case(name)) {
            projects.push(name.to_string());
        }
    }
    projects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str, project: Option<&str>) -> ActivityItem {
        ActivityItem {
            content: Some(content.to_string()),
            project: project.map(str::to_string),
            timestamp: None,
        }
    }

    #[test]
    fn test_low_influence_is_skipped() {
        let scorer = SmartMoneyScorer::new();
        let items = vec![post("restaking looks strong", Some("EigenLayer"))];

        assert!(scorer.score("nobody", 999.0, 50, &items, "24h").is_none());
    }

    #[test]
    fn test_high_influence_active_account() {
        let scorer = SmartMoneyScorer::new();
        let activity = scorer
            .score("VitalikButerin", 15_000.0, 12, &[], "24h")
            .unwrap();

        assert!((activity.significance_score - 0.7).abs() < 1e-9);
        assert!(activity.keywords.is_empty());
    }

    #[test]
    fn test_below_threshold_is_discarded() {
        let scorer = SmartMoneyScorer::new();
        // 0.2 influence, no mentions, no projects
        assert!(scorer.score("quiet", 6_000.0, 0, &[], "24h").is_none());
        // 0.2 + 0.15
        assert!(scorer.score("warm", 6_000.0, 6, &[], "24h").is_some());
    }

    #[test]
    fn test_project_mention_adds_significance() {
        let scorer = SmartMoneyScorer::new();
        let items = vec![post("watching this one", Some("Hyperliquid"))];

        let activity = scorer.score("echo_0x", 2_000.0, 0, &items, "7d").unwrap();
        assert!((activity.significance_score - 0.3).abs() < 1e-9);
        assert_eq!(activity.mentioned_projects, vec!["Hyperliquid"]);
        assert_eq!(activity.timeframe, "7d");
    }

    #[test]
    fn test_only_recent_window_is_inspected() {
        let scorer = SmartMoneyScorer::new();
        let mut items: Vec<ActivityItem> = (0..5).map(|_| post("gm", None)).collect();
        items.push(post("late mention", Some("Ignored")));

        let activity = scorer.score("naval", 20_000.0, 0, &items, "24h").unwrap();
        assert!(activity.mentioned_projects.is_empty());
        assert!((activity.significance_score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_extraction_rules() {
        let keywords = extract_keywords(
            [
                "Restaking and RESTAKING yields: 2024 looks wild",
                "zk rollups scale ethereum",
            ]
            .into_iter(),
        );

        assert_eq!(
            keywords,
            vec!["restaking", "looks", "wild", "rollups", "scale", "ethereum"]
        );
    }

    #[test]
    fn test_keywords_capped_at_ten() {
        let text = "alpha bravo charlie delta echoes foxtrot golf hotel india juliet kilo lima";
        let keywords = extract_keywords(std::iter::once(text));

        assert_eq!(keywords.len(), 10);
        assert_eq!(keywords[0], "alpha");
        assert!(!keywords.contains(&"kilo".to_string()));
    }

    #[test]
    fn test_ranking_orders_by_significance() {
        let scorer = SmartMoneyScorer::new();
        let mut activities = vec![
            scorer.score("mid", 6_000.0, 11, &[], "24h").unwrap(),
            scorer.score("top", 50_000.0, 40, &[], "24h").unwrap(),
        ];

        rank_activities(&mut activities);
        assert_eq!(activities[0].account_handle, "top");
    }

    #[test]
    fn test_unknown_tier_falls_back() {
        assert_eq!(WalletTier::parse("retail"), WalletTier::Tier1);
        assert_eq!(WalletTier::parse("whale").accounts().len(), 3);
    }
}
