//! Emergence scoring: confidence that a project is genuinely gaining traction

use super::normalizer::NormalizedSignal;
use serde::{Deserialize, Serialize};

/// Detection strategy requested by the caller
///
/// Every method currently runs the same additive scoring. The selector is
/// accepted and echoed so callers can already pass it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMethod {
    All,
    SmartMoney,
    SocialSurge,
}

impl DiscoveryMethod {
    /// Unknown selectors fall back to `All`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "smart_money" => DiscoveryMethod::SmartMoney,
            "social_surge" => DiscoveryMethod::SocialSurge,
            "all" => DiscoveryMethod::All,
            other => {
                log::debug!("Unknown discovery_method '{}', using 'all'", other);
                DiscoveryMethod::All
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMethod::All => "all",
            DiscoveryMethod::SmartMoney => "smart_money",
            DiscoveryMethod::SocialSurge => "social_surge",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergenceVerdict {
    pub confidence: f64,
    pub smart_money_interest: bool,
    pub social_velocity: f64,
    pub engagement_surge: bool,
    pub momentum_score: f64,
    pub risk_flags: Vec<String>,
}

/// A signal that passed detection, paired with its verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergingProject {
    pub signal: NormalizedSignal,
    pub verdict: EmergenceVerdict,
}

impl EmergingProject {
    pub fn confidence_score(&self) -> f64 {
        self.verdict.confidence
    }
}

pub struct EmergenceScorer;

impl EmergenceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute the emergence verdict for one signal
    ///
    /// # Factors
    /// - Smart-money mentions (+0.30 above 20, +0.15 above 5)
    /// - Social velocity on high-engagement projects (+0.25 / +0.15)
    /// - Engagement surge above 20% change (+0.20)
    /// - Momentum `(change + 10) / 40`, weighted 0.25
    /// - Penalties: extreme pump (-0.20), retail hype (-0.15)
    ///
    /// # Returns
    /// Verdict with confidence clamped to 0.0-1.0
    pub fn score(&self, signal: &NormalizedSignal) -> EmergenceVerdict {
        if signal.is_empty() {
            return EmergenceVerdict::default();
        }

        let mut verdict = EmergenceVerdict::default();
        let mut confidence = 0.0;
        let mentions = signal.secondary_mentions;
        let engagement = signal.engagement_score;
        let change = signal.change_pct;

        if mentions > 20 {
            verdict.smart_money_interest = true;
            confidence += 0.30;
        } else if mentions > 5 {
            confidence += 0.15;
        }

        if engagement > 20_000.0 {
            if change > 15.0 {
                verdict.social_velocity = 0.8;
                confidence += 0.25;
            } else if change > 5.0 {
                verdict.social_velocity = 0.6;
                confidence += 0.15;
            }
        }

        if change > 20.0 {
            verdict.engagement_surge = true;
            confidence += 0.20;
        }

        verdict.momentum_score = ((change + 10.0) / 40.0).clamp(0.0, 1.0);
        confidence += verdict.momentum_score * 0.25;

        if change > 50.0 {
            verdict.risk_flags.push("extreme_pump".to_string());
            confidence -= 0.20;
        }

        if engagement > 50_000.0 && mentions < 5 {
            verdict.risk_flags.push("retail_hype".to_string());
            confidence -= 0.15;
        }

        verdict.confidence = f64::clamp(confidence, 0.0, 1.0);
        verdict
    }

    /// Score every signal, keep those at or above `min_confidence`,
    /// sort by confidence (stable) and truncate to `limit`
    pub fn detect(
        &self,
        signals: &[NormalizedSignal],
        method: DiscoveryMethod,
        min_confidence: f64,
        limit: usize,
    ) -> Vec<EmergingProject> {
        log::debug!(
            "Scoring {} signals (method: {}, min_confidence: {:.2})",
            signals.len(),
            method.as_str(),
            min_confidence
        );

        let mut emerging: Vec<EmergingProject> = signals
            .iter()
            .map(|signal| EmergingProject {
                signal: signal.clone(),
                verdict: self.score(signal),
            })
            .filter(|p| p.verdict.confidence >= min_confidence)
            .collect();

        emerging.sort_by(|a, b| {
            b.verdict
                .confidence
                .partial_cmp(&a.verdict.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        emerging.truncate(limit);
        emerging
    }
}

impl Default for EmergenceScorer {
    fn default() -> Self {
        Self::new()
    }
}
