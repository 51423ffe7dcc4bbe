//! Scoring Core - Heuristic Scoring and Cross-Source Correlation
//!
//! Turns raw per-source metrics into confidence scores, health grades,
//! smart-money significance and cross-platform opportunity rankings.
//! Everything here is pure and synchronous; fetching lives in `sources`.
//!
//! # Architecture
//!
//! ```text
//! SocialProject / ProtocolRecord / TrendingCoin
//!     ↓
//! normalize (RawRecord → NormalizedSignal)
//!     ↓
//! EmergenceScorer ── HealthAnalyzer ── SmartMoneyScorer
//!     ↓
//! CrossSourceCorrelator (fuzzy name join, ≥ 2 sources)
//!     ↓
//! CompositeOpportunity list → render
//! ```
//!
//! `tech` shapes repository search results and the MCP server catalog for
//! the tech reports and the daily briefing.

pub mod categories;
pub mod correlator;
pub mod emergence;
pub mod health;
pub mod normalizer;
pub mod smart_money;
pub mod tech;

pub use categories::{summarize_categories, CategoryOverview, CategoryProject};
pub use correlator::{
    CompositeOpportunity, CorrelationRequest, CrossSourceCorrelator, SourceOutcomes, SourceRecord,
    SourceTag,
};
pub use emergence::{DiscoveryMethod, EmergenceScorer, EmergenceVerdict, EmergingProject};
pub use health::{
    EngagementVelocity, Grade, HealthAnalyzer, HealthOptions, HealthVerdict, MomentumDirection,
    MomentumQuality, Recommendation, SocialHealth,
};
pub use normalizer::{
    normalize, normalize_batch, NormalizedSignal, ProtocolRecord, RawRecord, SocialProject,
    TrendingCoin,
};
pub use smart_money::{
    extract_keywords, rank_activities, ActivityItem, SmartMoneyActivity, SmartMoneyScorer,
    WalletTier,
};
pub use tech::{
    cross_sector_insights, dedup_repositories, servers_matching, summarize_catalog,
    CatalogCategory, CatalogOverview, McpServer, RepoSection, Repository, ServerCategory, TechFocus,
    TechSection,
};
