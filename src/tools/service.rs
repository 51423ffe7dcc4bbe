//! Tool operations: fetch from the sources, score, correlate
//!
//! Every operation builds its verdicts fresh per call. Source failures are
//! handled per operation:
//! - single-source listings (`detect_emerging_projects`,
//!   `track_smart_money_moves`) log the failure and report nothing found
//! - `analyze_project_health` and `get_crypto_trends` surface the failure
//! - `scan_multi_platform_opportunities` correlates whatever responded and
//!   fails only when every source failed
//! - the tech reports drop a failed section and list it as unavailable;
//!   they fail only when no section could be fetched
//! - `get_daily_briefing` always answers, with each missing half noted

use super::params::{
    validate_days, validate_project_name, validate_topic, AiTrendsParams, CryptoTrendsParams,
    DailyBriefingParams, DetectEmergingParams, NewReleasesParams, OpportunityScanParams,
    ProjectHealthParams, SmartMoneyParams, TechTopicParams, Timeframe,
};
use crate::config::AlphaConfig;
use crate::error::AlphaError;
use crate::scoring::{
    cross_sector_insights, normalize_batch, rank_activities, servers_matching, summarize_catalog,
    summarize_categories, CatalogOverview, CategoryOverview, CompositeOpportunity,
    CorrelationRequest, CrossSourceCorrelator, DiscoveryMethod, EmergenceScorer, EmergingProject,
    HealthAnalyzer, HealthOptions, HealthVerdict, McpServer, NormalizedSignal, RawRecord,
    RepoSection, Repository, SmartMoneyActivity, SmartMoneyScorer, SocialProject, SourceOutcomes,
    TechFocus, TechSection, WalletTier,
};
use crate::sources::github::{keyword_query, new_repos_query, topic_slug, trending_query};
use crate::sources::{
    coingecko, defillama, github, moni, CatalogSource, CodeSource, CoinGeckoClient,
    DefiLlamaClient, GitHubClient, MarketSource, McpCatalogClient, MoniClient, ProtocolSource,
    SlidingWindowLimiter, SocialSource,
};
use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use serde::Serialize;

/// Projects pulled from the social source per operation
pub const SOCIAL_FETCH_LIMIT: usize = 50;
/// Protocols below this TVL are not fetched
pub const PROTOCOL_MIN_TVL: f64 = 1_000_000.0;
pub const PROTOCOL_FETCH_LIMIT: usize = 50;
/// Accounts polled per wallet tier
pub const MAX_TRACKED_ACCOUNTS: usize = 5;
const ACTIVITY_FETCH_LIMIT: usize = 10;

const TOPIC_SEARCH_LIMIT: usize = 10;
const TOPIC_MIN_STARS: u64 = 10;
const RELATED_SERVER_LIMIT: usize = 3;
const RELEASE_TOPICS: [&str; 3] = ["mcp", "ai-agents", "llm-tools"];
const RELEASES_PER_TOPIC: usize = 3;
const BRIEFING_CRYPTO_LIMIT: usize = 10;
const CRYPTO_FOCUS_AREAS: [&str; 6] = ["defi", "l1", "l2", "gaming", "ai", "meme"];

#[derive(Debug, Clone, Serialize)]
pub struct EmergingReport {
    pub discovery_method: DiscoveryMethod,
    pub timeframe: Timeframe,
    pub min_confidence: f64,
    pub scanned: usize,
    pub projects: Vec<EmergingProject>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmartMoneyReport {
    pub wallet_tier: WalletTier,
    pub timeframe: Timeframe,
    pub accounts_checked: usize,
    pub activities: Vec<SmartMoneyActivity>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub verdict: HealthVerdict,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunityReport {
    pub sectors: Vec<String>,
    pub timeframe: Timeframe,
    pub confidence_threshold: f64,
    pub opportunities: Vec<CompositeOpportunity>,
    /// One line per source that failed during this scan
    pub unavailable: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendsReport {
    pub timeframe: Timeframe,
    pub category: Option<String>,
    pub projects: Vec<SocialProject>,
    pub categories: Vec<CategoryOverview>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechTrendsReport {
    pub focus: TechFocus,
    pub timeframe: Timeframe,
    pub days: u32,
    pub sections: Vec<RepoSection>,
    /// Present when the focus covers MCP and the catalog responded
    pub catalog: Option<CatalogOverview>,
    pub unavailable: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicReport {
    pub topic: String,
    pub days: u32,
    pub repos: Vec<Repository>,
    /// Set when no repository carried the topic tag and a free-text search ran instead
    pub keyword_search: bool,
    pub related_servers: Vec<McpServer>,
    pub related_server_count: usize,
    pub unavailable: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseSection {
    pub topic: String,
    pub repos: Vec<Repository>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleasesReport {
    pub days: u32,
    /// Topics with at least one new repository
    pub sections: Vec<ReleaseSection>,
    pub unavailable: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BriefingReport {
    pub timeframe: Timeframe,
    pub focus_areas: Vec<String>,
    pub tech: Option<TechTrendsReport>,
    pub releases: Option<ReleasesReport>,
    pub crypto: Option<TrendsReport>,
    pub insights: Vec<String>,
    /// One line per requested half (or source) that could not be fetched
    pub unavailable: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Lookback for repository searches: 7 days for short windows, 30 otherwise
pub fn lookback_days(timeframe: Timeframe) -> u32 {
    match timeframe {
        Timeframe::Weekly | Timeframe::ThirtyDays => 30,
        _ => 7,
    }
}

fn days_ago(days: u32) -> NaiveDate {
    Utc::now().date_naive() - chrono::Duration::days(i64::from(days))
}

fn push_unique(lines: &mut Vec<String>, line: String) {
    if !lines.contains(&line) {
        lines.push(line);
    }
}

pub struct AlphaService {
    social: Option<Box<dyn SocialSource>>,
    protocols: Box<dyn ProtocolSource>,
    market: Box<dyn MarketSource>,
    code: Box<dyn CodeSource>,
    catalog: Box<dyn CatalogSource>,
    emergence: EmergenceScorer,
    health: HealthAnalyzer,
    smart_money: SmartMoneyScorer,
    correlator: CrossSourceCorrelator,
}

impl AlphaService {
    pub fn new(
        social: Option<Box<dyn SocialSource>>,
        protocols: Box<dyn ProtocolSource>,
        market: Box<dyn MarketSource>,
        code: Box<dyn CodeSource>,
        catalog: Box<dyn CatalogSource>,
    ) -> Self {
        Self {
            social,
            protocols,
            market,
            code,
            catalog,
            emergence: EmergenceScorer::new(),
            health: HealthAnalyzer::new(),
            smart_money: SmartMoneyScorer::new(),
            correlator: CrossSourceCorrelator::new(),
        }
    }

    /// Wire the HTTP clients described by `config`
    pub fn from_config(config: &AlphaConfig) -> Result<Self, AlphaError> {
        let social: Option<Box<dyn SocialSource>> = match config.moni_api_key.as_deref() {
            Some(key) => Some(Box::new(MoniClient::new(
                key,
                &config.moni_base_url,
                config.request_timeout,
                SlidingWindowLimiter::per_minute(moni::SOURCE_NAME, config.moni_requests_per_minute),
            )?)),
            None => {
                log::warn!("⚠️  MONI_API_KEY not set, social tools disabled");
                None
            }
        };

        let protocols = DefiLlamaClient::new(
            &config.defillama_base_url,
            config.request_timeout,
            SlidingWindowLimiter::per_minute(
                defillama::SOURCE_NAME,
                config.defillama_requests_per_minute,
            ),
        )?;

        let market = CoinGeckoClient::new(
            &config.coingecko_base_url,
            config.coingecko_api_key.as_deref(),
            config.request_timeout,
            SlidingWindowLimiter::per_minute(
                coingecko::SOURCE_NAME,
                config.coingecko_requests_per_minute,
            ),
        )?;

        let code = GitHubClient::new(
            &config.github_base_url,
            config.github_token.as_deref(),
            config.request_timeout,
            SlidingWindowLimiter::per_minute(github::SOURCE_NAME, config.github_requests_per_minute),
        )?;

        let catalog = McpCatalogClient::new(&config.mcp_catalog_url, config.request_timeout)?;

        Ok(Self::new(
            social,
            Box::new(protocols),
            Box::new(market),
            Box::new(code),
            Box::new(catalog),
        ))
    }

    pub fn social_enabled(&self) -> bool {
        self.social.is_some()
    }

    fn social(&self) -> Result<&dyn SocialSource, AlphaError> {
        self.social
            .as_deref()
            .ok_or_else(|| AlphaError::source_unavailable(moni::SOURCE_NAME, "MONI_API_KEY not configured"))
    }

    async fn social_signals(&self) -> Result<Vec<NormalizedSignal>, AlphaError> {
        let projects = self.social()?.fetch_projects(None, SOCIAL_FETCH_LIMIT).await?;
        let records: Vec<RawRecord> = projects.into_iter().map(RawRecord::Social).collect();
        Ok(normalize_batch(&records))
    }

    pub async fn detect_emerging_projects(
        &self,
        params: DetectEmergingParams,
    ) -> Result<EmergingReport, AlphaError> {
        let method = DiscoveryMethod::parse(&params.discovery_method);
        let timeframe = Timeframe::parse_or(&params.timeframe, Timeframe::SevenDays);
        self.social()?;

        let signals = match self.social_signals().await {
            Ok(signals) => signals,
            Err(e) => {
                log::warn!("⚠️  Emerging project detection found no data: {}", e);
                Vec::new()
            }
        };

        let projects = self
            .emergence
            .detect(&signals, method, params.min_confidence, params.limit);

        log::info!(
            "🌱 {} of {} projects above {:.2} confidence",
            projects.len(),
            signals.len(),
            params.min_confidence
        );

        Ok(EmergingReport {
            discovery_method: method,
            timeframe,
            min_confidence: params.min_confidence,
            scanned: signals.len(),
            projects,
            generated_at: Utc::now(),
        })
    }

    pub async fn track_smart_money_moves(
        &self,
        params: SmartMoneyParams,
    ) -> Result<SmartMoneyReport, AlphaError> {
        let tier = WalletTier::parse(&params.wallet_tier);
        let timeframe = Timeframe::parse_or(&params.timeframe, Timeframe::OneDay);
        let social = self.social()?;

        let handles: Vec<&str> = tier
            .accounts()
            .iter()
            .take(MAX_TRACKED_ACCOUNTS)
            .copied()
            .collect();
        let accounts_checked = handles.len();

        let fetched = join_all(handles.iter().map(|handle| async move {
            tokio::join!(
                social.fetch_account(handle),
                social.fetch_account_activity(handle, ACTIVITY_FETCH_LIMIT)
            )
        }))
        .await;

        let mut activities = Vec::new();
        for (handle, (account, recent)) in handles.iter().zip(fetched) {
            let account = match account {
                Ok(account) => account,
                Err(e) => {
                    log::debug!("Skipping @{}: {}", handle, e);
                    continue;
                }
            };
            let recent = recent.unwrap_or_else(|e| {
                log::debug!("No recent activity for @{}: {}", handle, e);
                Vec::new()
            });

            if let Some(activity) = self.smart_money.score(
                handle,
                account.moni_score,
                account.smart_mentions,
                &recent,
                timeframe.as_str(),
            ) {
                activities.push(activity);
            }
        }

        rank_activities(&mut activities);
        activities.truncate(params.limit);

        log::info!(
            "🐋 {} significant accounts in {} tier",
            activities.len(),
            tier.as_str()
        );

        Ok(SmartMoneyReport {
            wallet_tier: tier,
            timeframe,
            accounts_checked,
            activities,
            generated_at: Utc::now(),
        })
    }

    pub async fn analyze_project_health(
        &self,
        params: ProjectHealthParams,
    ) -> Result<HealthReport, AlphaError> {
        let project_name = validate_project_name(&params.project_name)?;
        let candidates = self.social_signals().await?;

        let verdict = self.health.analyze(
            &project_name,
            &candidates,
            HealthOptions {
                include_fundamentals: params.include_fundamentals,
                risk_assessment: params.risk_assessment,
            },
        )?;

        log::info!(
            "🩺 {} graded {} ({:.1}/10)",
            verdict.project_name,
            verdict.grade,
            verdict.overall_score
        );

        Ok(HealthReport {
            verdict,
            generated_at: Utc::now(),
        })
    }

    pub async fn scan_multi_platform_opportunities(
        &self,
        params: OpportunityScanParams,
    ) -> Result<OpportunityReport, AlphaError> {
        let timeframe = Timeframe::parse_or(&params.timeframe, Timeframe::SevenDays);

        let emerging = async {
            let signals = self.social_signals().await?;
            Ok::<_, AlphaError>(
                self.emergence
                    .detect(&signals, DiscoveryMethod::All, 0.0, SOCIAL_FETCH_LIMIT),
            )
        };

        let (social, defi, market) = tokio::join!(
            emerging,
            self.protocols
                .fetch_protocols(PROTOCOL_MIN_TVL, PROTOCOL_FETCH_LIMIT),
            self.market.fetch_trending()
        );

        let unavailable: Vec<String> = [
            social.as_ref().err(),
            defi.as_ref().err(),
            market.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .map(|e| e.to_string())
        .collect();

        let request = CorrelationRequest {
            sectors: params.sectors.clone(),
            confidence_threshold: params.confidence_threshold,
            max_results: params.max_results,
        };
        let opportunities = self
            .correlator
            .correlate_outcomes(SourceOutcomes { social, defi, market }, &request)?;

        Ok(OpportunityReport {
            sectors: params.sectors,
            timeframe,
            confidence_threshold: params.confidence_threshold,
            opportunities,
            unavailable,
            generated_at: Utc::now(),
        })
    }

    pub async fn get_crypto_trends(&self, params: CryptoTrendsParams) -> Result<TrendsReport, AlphaError> {
        let timeframe = Timeframe::parse_or(&params.timeframe, Timeframe::OneDay);
        let category = params
            .category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());

        let fetched = self
            .social()?
            .fetch_projects(category.as_deref(), SOCIAL_FETCH_LIMIT)
            .await?;
        let categories = summarize_categories(&fetched);

        let mut projects = fetched;
        projects.truncate(params.limit);

        Ok(TrendsReport {
            timeframe,
            category,
            projects,
            categories,
            generated_at: Utc::now(),
        })
    }

    /// One themed section; topic failures are tolerated while any topic answers
    async fn fetch_section(&self, section: TechSection, since: NaiveDate) -> Result<RepoSection, AlphaError> {
        let results = join_all(section.topics().iter().map(|topic| {
            let query = trending_query(topic, since, section.min_stars());
            async move { self.code.search_repositories(&query, section.per_topic()).await }
        }))
        .await;

        let mut per_topic = Vec::new();
        let mut first_error = None;
        for (topic, result) in section.topics().iter().zip(results) {
            match result {
                Ok(repos) => per_topic.push(repos),
                Err(e) => {
                    log::warn!("⚠️  Topic '{}' search failed: {}", topic, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if let (true, Some(e)) = (per_topic.is_empty(), first_error) {
            return Err(e);
        }

        Ok(RepoSection {
            section,
            repos: section.merge(per_topic),
        })
    }

    async fn tech_overview(&self, focus: TechFocus, timeframe: Timeframe) -> Result<TechTrendsReport, AlphaError> {
        let days = lookback_days(timeframe);
        let since = days_ago(days);
        let sections = focus.sections();

        let catalog = async {
            if focus.includes_catalog() {
                Some(self.catalog.fetch_servers().await)
            } else {
                None
            }
        };
        let (results, catalog) = tokio::join!(
            join_all(sections.iter().map(|section| self.fetch_section(*section, since))),
            catalog
        );

        let mut unavailable = Vec::new();
        let mut first_error = None;
        let mut fetched = Vec::new();
        for (section, result) in sections.iter().zip(results) {
            match result {
                Ok(section) => fetched.push(section),
                Err(e) => {
                    log::warn!("⚠️  {} section unavailable: {}", section.title(), e);
                    push_unique(&mut unavailable, e.to_string());
                    first_error.get_or_insert(e);
                }
            }
        }

        let catalog = match catalog {
            Some(Ok(servers)) => Some(summarize_catalog(&servers)),
            Some(Err(e)) => {
                log::warn!("⚠️  MCP catalog unavailable: {}", e);
                push_unique(&mut unavailable, e.to_string());
                None
            }
            None => None,
        };

        if let (true, None, Some(e)) = (fetched.is_empty(), &catalog, first_error) {
            return Err(e);
        }

        log::info!(
            "🛠️ {} tech sections over {} days",
            fetched.len(),
            days
        );

        Ok(TechTrendsReport {
            focus,
            timeframe,
            days,
            sections: fetched,
            catalog,
            unavailable,
            generated_at: Utc::now(),
        })
    }

    pub async fn get_ai_trends(&self, params: AiTrendsParams) -> Result<TechTrendsReport, AlphaError> {
        let focus = TechFocus::parse(&params.focus);
        let timeframe = Timeframe::parse_or(&params.timeframe, Timeframe::Daily);
        self.tech_overview(focus, timeframe).await
    }

    /// Repositories for one topic plus related catalog servers
    ///
    /// Repository search errors fail the call; a catalog error only drops
    /// the related-server list.
    pub async fn search_tech_topic(&self, params: TechTopicParams) -> Result<TopicReport, AlphaError> {
        let topic = validate_topic(&params.topic)?;
        let days = validate_days(params.days)?;
        let since = days_ago(days);

        let tagged = trending_query(&topic_slug(&topic), since, TOPIC_MIN_STARS);
        let (repos, catalog) = tokio::join!(
            self.code.search_repositories(&tagged, TOPIC_SEARCH_LIMIT),
            self.catalog.fetch_servers()
        );

        let mut repos = repos?;
        let keyword_search = repos.is_empty();
        if keyword_search {
            log::info!("🔎 No repositories tagged '{}', searching by keyword", topic);
            let query = keyword_query(&topic, since, TOPIC_MIN_STARS);
            repos = self.code.search_repositories(&query, TOPIC_SEARCH_LIMIT).await?;
        }

        let mut unavailable = Vec::new();
        let (related_servers, related_server_count) = match catalog {
            Ok(servers) => {
                let matching = servers_matching(&servers, &topic);
                let count = matching.len();
                (matching.into_iter().take(RELATED_SERVER_LIMIT).collect(), count)
            }
            Err(e) => {
                log::warn!("⚠️  MCP catalog unavailable: {}", e);
                unavailable.push(e.to_string());
                (Vec::new(), 0)
            }
        };

        Ok(TopicReport {
            topic,
            days,
            repos,
            keyword_search,
            related_servers,
            related_server_count,
            unavailable,
            generated_at: Utc::now(),
        })
    }

    /// Repositories created in the last `days` under the headline AI topics
    pub async fn get_new_releases(&self, params: NewReleasesParams) -> Result<ReleasesReport, AlphaError> {
        let days = validate_days(params.days)?;
        let since = days_ago(days);

        let results = join_all(RELEASE_TOPICS.iter().map(|topic| {
            let query = new_repos_query(topic, since);
            async move { self.code.search_repositories(&query, RELEASES_PER_TOPIC).await }
        }))
        .await;

        let mut sections = Vec::new();
        let mut unavailable = Vec::new();
        let mut first_error = None;
        let mut answered = 0;
        for (topic, result) in RELEASE_TOPICS.iter().zip(results) {
            match result {
                Ok(repos) => {
                    answered += 1;
                    if !repos.is_empty() {
                        sections.push(ReleaseSection {
                            topic: topic.to_string(),
                            repos,
                        });
                    }
                }
                Err(e) => {
                    log::warn!("⚠️  New releases for '{}' unavailable: {}", topic, e);
                    push_unique(&mut unavailable, e.to_string());
                    first_error.get_or_insert(e);
                }
            }
        }

        if let (0, Some(e)) = (answered, first_error) {
            return Err(e);
        }

        Ok(ReleasesReport {
            days,
            sections,
            unavailable,
            generated_at: Utc::now(),
        })
    }

    /// Tech and crypto halves fetched concurrently; a failed half is left
    /// out and named in `unavailable`
    pub async fn get_daily_briefing(&self, params: DailyBriefingParams) -> Result<BriefingReport, AlphaError> {
        if !params.include_tech && !params.include_crypto {
            return Err(AlphaError::InvalidParameter(
                "at least one of include_tech or include_crypto must be true".to_string(),
            ));
        }

        let include_tech = params.include_tech;
        let include_crypto = params.include_crypto;
        let timeframe = Timeframe::parse_or(&params.timeframe, Timeframe::Daily);
        let focus_areas: Vec<String> = params
            .focus_areas
            .unwrap_or_default()
            .iter()
            .map(|area| area.trim().to_lowercase())
            .filter(|area| !area.is_empty())
            .collect();

        let tech_focus = if focus_areas.iter().any(|a| a == "mcp") {
            TechFocus::Mcp
        } else if focus_areas.iter().any(|a| a == "agents") {
            TechFocus::Agents
        } else {
            TechFocus::All
        };
        let crypto_category = focus_areas
            .iter()
            .find(|a| CRYPTO_FOCUS_AREAS.contains(&a.as_str()))
            .cloned();
        let crypto_timeframe = match lookback_days(timeframe) {
            7 => Timeframe::OneDay,
            _ => Timeframe::SevenDays,
        };

        let tech = async {
            if include_tech {
                Some(self.tech_overview(tech_focus, timeframe).await)
            } else {
                None
            }
        };
        let releases = async {
            if include_tech {
                let days = lookback_days(timeframe);
                Some(self.get_new_releases(NewReleasesParams { days }).await)
            } else {
                None
            }
        };
        let crypto = async {
            if include_crypto {
                let request = CryptoTrendsParams {
                    timeframe: crypto_timeframe.as_str().to_string(),
                    category: crypto_category,
                    limit: BRIEFING_CRYPTO_LIMIT,
                };
                Some(self.get_crypto_trends(request).await)
            } else {
                None
            }
        };

        let (tech, releases, crypto) = tokio::join!(tech, releases, crypto);

        let mut unavailable = Vec::new();
        let tech = settle_section("Tech trends", tech, &mut unavailable);
        let releases = settle_section("New releases", releases, &mut unavailable);
        let crypto = settle_section("Crypto trends", crypto, &mut unavailable);

        if let Some(report) = &tech {
            for line in &report.unavailable {
                push_unique(&mut unavailable, line.clone());
            }
        }

        let populated: Vec<TechSection> = tech
            .iter()
            .flat_map(|report| report.sections.iter())
            .filter(|section| !section.repos.is_empty())
            .map(|section| section.section)
            .collect();
        let insights = cross_sector_insights(
            &populated,
            crypto.as_ref().map(|report| report.projects.as_slice()),
        );

        log::info!(
            "📰 Briefing ready ({} insights, {} gaps)",
            insights.len(),
            unavailable.len()
        );

        Ok(BriefingReport {
            timeframe,
            focus_areas,
            tech,
            releases,
            crypto,
            insights,
            unavailable,
            generated_at: Utc::now(),
        })
    }
}

/// Keep a fetched briefing half, or record why it is missing
fn settle_section<T>(
    label: &str,
    outcome: Option<Result<T, AlphaError>>,
    unavailable: &mut Vec<String>,
) -> Option<T> {
    match outcome? {
        Ok(section) => Some(section),
        Err(e) => {
            log::warn!("⚠️  {} unavailable: {}", label, e);
            push_unique(unavailable, format!("{}: {}", label, e));
            None
        }
    }
}
