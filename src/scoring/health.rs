//! Multi-factor project health analysis
//!
//! ## Scoring Algorithm
//!
//! **overall_score** (0-10 scale), starting from a neutral 5.0:
//! - Social health: strong +2.0, moderate +1.0
//! - Momentum direction: bullish +1.5, bearish -1.5
//! - Risk factors: -0.5 each
//! - Opportunities: +0.3 each
//!
//! **grade**: A >= 8.0, B >= 6.5, C >= 5.0, D >= 3.5, otherwise F
//!
//! **recommendation**: selected from grade, momentum direction and whether
//! opportunities outnumber risks

use super::normalizer::NormalizedSignal;
use crate::error::AlphaError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Grade::A
        } else if score >= 6.5 {
            Grade::B
        } else if score >= 5.0 {
            Grade::C
        } else if score >= 3.5 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialHealth {
    Strong,
    Moderate,
    Weak,
}

impl SocialHealth {
    fn from_engagement(engagement: f64) -> Self {
        if engagement > 20_000.0 {
            SocialHealth::Strong
        } else if engagement > 5_000.0 {
            SocialHealth::Moderate
        } else {
            SocialHealth::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialHealth::Strong => "strong",
            SocialHealth::Moderate => "moderate",
            SocialHealth::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumDirection {
    Bullish,
    Bearish,
    Sideways,
}

impl MomentumDirection {
    fn from_change(change: f64) -> Self {
        if change > 5.0 {
            MomentumDirection::Bullish
        } else if change < -5.0 {
            MomentumDirection::Bearish
        } else {
            MomentumDirection::Sideways
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumDirection::Bullish => "bullish",
            MomentumDirection::Bearish => "bearish",
            MomentumDirection::Sideways => "sideways",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementVelocity {
    Accelerating,
    Growing,
    Stable,
    Declining,
    Falling,
}

impl EngagementVelocity {
    fn from_change(change: f64) -> Self {
        if change > 20.0 {
            EngagementVelocity::Accelerating
        } else if change > 5.0 {
            EngagementVelocity::Growing
        } else if change > -5.0 {
            EngagementVelocity::Stable
        } else if change > -20.0 {
            EngagementVelocity::Declining
        } else {
            EngagementVelocity::Falling
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementVelocity::Accelerating => "accelerating",
            EngagementVelocity::Growing => "growing",
            EngagementVelocity::Stable => "stable",
            EngagementVelocity::Declining => "declining",
            EngagementVelocity::Falling => "falling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumQuality {
    HighQuality,
    GoodQuality,
    RetailDriven,
    LowQuality,
}

impl MomentumQuality {
    fn assess(change: f64, mentions: u64) -> Self {
        if mentions > 20 && change > 10.0 {
            MomentumQuality::HighQuality
        } else if mentions > 10 && change > 5.0 {
            MomentumQuality::GoodQuality
        } else if change > 20.0 && mentions < 5 {
            MomentumQuality::RetailDriven
        } else {
            MomentumQuality::LowQuality
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumQuality::HighQuality => "high_quality",
            MomentumQuality::GoodQuality => "good_quality",
            MomentumQuality::RetailDriven => "retail_driven",
            MomentumQuality::LowQuality => "low_quality",
        }
    }
}

/// Recommendation category selected by grade and momentum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    CorePosition,
    ModerateAllocation,
    ConservativePosition,
    SmallSpeculative,
    WaitForSignals,
    AvoidOrExit,
}

impl Recommendation {
    fn select(grade: Grade, momentum: MomentumDirection, risks: usize, opportunities: usize) -> Self {
        match grade {
            Grade::A => Recommendation::CorePosition,
            Grade::B if opportunities > risks => Recommendation::ModerateAllocation,
            Grade::B => Recommendation::ConservativePosition,
            Grade::C if momentum == MomentumDirection::Bullish => Recommendation::SmallSpeculative,
            Grade::C => Recommendation::WaitForSignals,
            Grade::D | Grade::F => Recommendation::AvoidOrExit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthVerdict {
    pub project_name: String,
    pub category: String,
    pub overall_score: f64,
    pub grade: Grade,
    pub social_health: SocialHealth,
    pub momentum_direction: MomentumDirection,
    pub risk_factors: Vec<String>,
    pub opportunities: Vec<String>,
    pub recommendation_kind: Recommendation,
    pub recommendation: String,
    pub engagement_score: f64,
    pub secondary_mentions: u64,
    pub change_pct: f64,
    pub social_rank: usize,
    pub influence_level: String,
    pub engagement_velocity: EngagementVelocity,
    pub sustainability_score: f64,
    pub momentum_quality: MomentumQuality,
    pub breakout_potential: f64,
    pub trend_strength: f64,
    pub include_fundamentals: bool,
}

/// Caller switches for a health analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthOptions {
    pub include_fundamentals: bool,
    pub risk_assessment: bool,
}

impl Default for HealthOptions {
    fn default() -> Self {
        Self {
            include_fundamentals: true,
            risk_assessment: true,
        }
    }
}

pub struct HealthAnalyzer;

impl HealthAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Find `project_name` in the candidate set and analyze it
    ///
    /// Matching is a case-insensitive substring test on the candidate name;
    /// the first candidate that matches wins.
    pub fn analyze(
        &self,
        project_name: &str,
        candidates: &[NormalizedSignal],
        options: HealthOptions,
    ) -> Result<HealthVerdict, AlphaError> {
        let needle = project_name.trim().to_lowercase();
        let target = if needle.is_empty() {
            None
        } else {
            candidates
                .iter()
                .find(|c| c.name.to_lowercase().contains(&needle))
        };

        match target {
            Some(signal) => Ok(self.evaluate(signal, candidates, options)),
            None => Err(AlphaError::not_found(
                project_name,
                &[
                    "Check project name spelling",
                    "Project might be too new or inactive",
                ],
            )),
        }
    }

    /// Evaluate one signal with the candidate set as rank context
    pub fn evaluate(
        &self,
        signal: &NormalizedSignal,
        candidates: &[NormalizedSignal],
        options: HealthOptions,
    ) -> HealthVerdict {
        let engagement = signal.engagement_score;
        let change = signal.change_pct;
        let mentions = signal.secondary_mentions;

        let social_health = SocialHealth::from_engagement(engagement);
        let momentum_direction = MomentumDirection::from_change(change);

        let (risk_factors, opportunities) = if options.risk_assessment {
            (assess_risk_factors(signal), identify_opportunities(signal))
        } else {
            (Vec::new(), Vec::new())
        };

        let mut score = 5.0;
        score += match social_health {
            SocialHealth::Strong => 2.0,
            SocialHealth::Moderate => 1.0,
            SocialHealth::Weak => 0.0,
        };
        score += match momentum_direction {
            MomentumDirection::Bullish => 1.5,
            MomentumDirection::Bearish => -1.5,
            MomentumDirection::Sideways => 0.0,
        };
        score -= risk_factors.len() as f64 * 0.5;
        score += opportunities.len() as f64 * 0.3;
        let overall_score = f64::clamp(score, 0.0, 10.0);

        let grade = Grade::from_score(overall_score);
        let recommendation_kind = Recommendation::select(
            grade,
            momentum_direction,
            risk_factors.len(),
            opportunities.len(),
        );
        let recommendation =
            recommendation_text(recommendation_kind, momentum_direction, risk_factors.len());

        HealthVerdict {
            project_name: signal.name.clone(),
            category: signal.category.clone(),
            overall_score,
            grade,
            social_health,
            momentum_direction,
            risk_factors,
            opportunities,
            recommendation_kind,
            recommendation,
            engagement_score: engagement,
            secondary_mentions: mentions,
            change_pct: change,
            social_rank: social_rank(engagement, candidates),
            influence_level: influence_level(mentions).to_string(),
            engagement_velocity: EngagementVelocity::from_change(change),
            sustainability_score: sustainability(engagement, change),
            momentum_quality: MomentumQuality::assess(change, mentions),
            breakout_potential: breakout_potential(signal),
            trend_strength: if change.abs() < 100.0 {
                change.abs() / 10.0
            } else {
                10.0
            },
            include_fundamentals: options.include_fundamentals,
        }
    }
}

impl Default for HealthAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// 1-based rank of `engagement` among the candidates, highest first
fn social_rank(engagement: f64, candidates: &[NormalizedSignal]) -> usize {
    let mut scores: Vec<f64> = candidates.iter().map(|c| c.engagement_score).collect();
    scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    scores
        .iter()
        .position(|s| *s == engagement)
        .map(|idx| idx + 1)
        .unwrap_or(scores.len())
}

fn influence_level(mentions: u64) -> &'static str {
    match mentions {
        m if m > 50 => "high",
        m if m > 20 => "moderate",
        m if m > 5 => "low",
        _ => "minimal",
    }
}

/// Higher engagement with milder movement is more sustainable
fn sustainability(engagement: f64, change: f64) -> f64 {
    let swing = change.abs();
    if engagement > 30_000.0 {
        if swing < 30.0 {
            0.8
        } else {
            0.6
        }
    } else if engagement > 10_000.0 {
        if swing < 20.0 {
            0.7
        } else {
            0.5
        }
    } else if swing < 10.0 {
        0.4
    } else {
        0.2
    }
}

fn breakout_potential(signal: &NormalizedSignal) -> f64 {
    let engagement = signal.engagement_score;
    let change = signal.change_pct;
    let mut potential: f64 = 0.0;

    if engagement > 5_000.0 && engagement < 20_000.0 {
        potential += 0.4;
    } else if engagement < 5_000.0 {
        potential += 0.3;
    }

    if change > 5.0 && change < 25.0 {
        potential += 0.3;
    }

    if signal.secondary_mentions > 10 {
        potential += 0.3;
    }

    potential.min(1.0)
}

fn assess_risk_factors(signal: &NormalizedSignal) -> Vec<String> {
    let mut risks = Vec::new();
    let engagement = signal.engagement_score;
    let change = signal.change_pct;

    if change > 50.0 {
        risks.push("Extreme volatility detected".to_string());
    }
    if engagement > 50_000.0 && signal.secondary_mentions < 10 {
        risks.push("High retail hype with low smart money interest".to_string());
    }
    if change < -30.0 {
        risks.push("Significant negative momentum".to_string());
    }
    if engagement < 1_000.0 {
        risks.push("Very low social engagement".to_string());
    }

    risks
}

fn identify_opportunities(signal: &NormalizedSignal) -> Vec<String> {
    let mut opportunities = Vec::new();
    let engagement = signal.engagement_score;
    let change = signal.change_pct;

    if signal.secondary_mentions > 20 && engagement < 15_000.0 {
        opportunities.push("High smart money interest with room for growth".to_string());
    }
    if change > 5.0 && change < 15.0 && engagement > 10_000.0 {
        opportunities.push("Healthy momentum with strong base".to_string());
    }
    if matches!(signal.category.as_str(), "defi" | "l1" | "ai") && engagement > 5_000.0 {
        opportunities.push(format!(
            "Strong positioning in trending {} sector",
            signal.category
        ));
    }
    if change > -10.0 && change < 5.0 && engagement > 20_000.0 {
        opportunities.push("Consolidation phase in established project".to_string());
    }

    opportunities
}

fn recommendation_text(kind: Recommendation, momentum: MomentumDirection, risks: usize) -> String {
    match kind {
        Recommendation::CorePosition => format!(
            "Strong fundamental health with {} momentum. Consider for core position.",
            momentum.as_str()
        ),
        Recommendation::ModerateAllocation => {
            "Good health metrics with growth potential. Suitable for moderate allocation."
                .to_string()
        }
        Recommendation::ConservativePosition => {
            "Solid project but monitor risk factors. Conservative position recommended."
                .to_string()
        }
        Recommendation::SmallSpeculative => {
            "Neutral health but showing positive momentum. Suitable for small speculative position."
                .to_string()
        }
        Recommendation::WaitForSignals => {
            "Average health metrics. Wait for better entry or stronger signals.".to_string()
        }
        Recommendation::AvoidOrExit => format!(
            "Below-average health with {} risk factors. Avoid or exit position.",
            risks
        ),
    }
}
