//! Estimated 24h change for social records that carry no time series
//!
//! The social source only exposes a current engagement snapshot, so the
//! client derives a plausible change figure from the engagement level and
//! marks the record `change_estimated`. The scoring core never calls this.

use rand::Rng;

const DEFAULT_JITTER: f64 = 1.5;
const MIN_ESTIMATE: f64 = -15.0;
const MAX_ESTIMATE: f64 = 30.0;

#[derive(Debug, Clone, Copy)]
pub struct TrendEstimator {
    jitter: f64,
}

impl TrendEstimator {
    pub fn new() -> Self {
        Self {
            jitter: DEFAULT_JITTER,
        }
    }

    /// Deterministic estimate with no random variation
    pub fn without_jitter() -> Self {
        Self { jitter: 0.0 }
    }

    /// Estimated change in percent, clamped to -15..30 and rounded to one decimal
    pub fn estimate(&self, engagement: f64, smart_mentions: u64) -> f64 {
        let mut trend = base_trend(engagement);

        if smart_mentions > 100 {
            trend += 2.0;
        } else if smart_mentions > 50 {
            trend += 1.0;
        } else if smart_mentions < 5 {
            trend -= 1.0;
        }

        if self.jitter > 0.0 {
            trend += rand::thread_rng().gen_range(-self.jitter..=self.jitter);
        }

        let clamped = trend.clamp(MIN_ESTIMATE, MAX_ESTIMATE);
        (clamped * 10.0).round() / 10.0
    }
}

impl Default for TrendEstimator {
    fn default() -> Self {
        Self::new()
    }
}

fn base_trend(engagement: f64) -> f64 {
    if engagement > 30_000.0 {
        f64::min(25.0, (engagement - 20_000.0) / 1_000.0)
    } else if engagement > 10_000.0 {
        f64::min(15.0, (engagement - 5_000.0) / 1_000.0)
    } else if engagement > 3_000.0 {
        f64::min(8.0, (engagement - 1_000.0) / 500.0)
    } else if engagement > 1_000.0 {
        f64::min(3.0, engagement / 1_000.0)
    } else {
        -(8.0 - engagement.max(0.0) / 200.0)
    }
}
