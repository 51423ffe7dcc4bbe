//! Integration tests for the tool service
//!
//! Sources are replaced by in-memory mocks so every operation can be driven
//! end to end: fetch, normalize, score, correlate, render.
//!
//! Key integration points tested:
//! - Emerging project detection with confidence filtering
//! - Smart-money ranking across a wallet tier with failing accounts
//! - Health lookup hits and misses
//! - Multi-platform scan with all, some and no sources responding
//! - Trends listing with category overview
//! - Tech sections, topic search and new releases over mock repositories
//! - Daily briefing with every half, some halves and no halves answering

#[cfg(test)]
mod tool_service_tests {
    use async_trait::async_trait;
    use daily_alpha::error::AlphaError;
    use daily_alpha::render;
    use daily_alpha::scoring::{
        ActivityItem, McpServer, ProtocolRecord, Repository, SocialProject, SourceTag, TechFocus,
        TechSection, TrendingCoin, WalletTier,
    };
    use daily_alpha::sources::{
        AccountSnapshot, CatalogSource, CodeSource, MarketSource, ProtocolSource, SocialSource,
    };
    use daily_alpha::tools::{
        AiTrendsParams, CryptoTrendsParams, DailyBriefingParams, DetectEmergingParams,
        NewReleasesParams, OpportunityScanParams, ProjectHealthParams, SmartMoneyParams,
        TechTopicParams, Timeframe,
    };
    use daily_alpha::AlphaService;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct MockSocial {
        projects: Vec<SocialProject>,
        fail: bool,
        /// Added to every account lookup
        delay: Duration,
    }

    fn project(name: &str, category: &str, mindshare: f64, mentions: u64, change: f64) -> SocialProject {
        SocialProject {
            name: Some(name.to_string()),
            symbol: Some(name.to_uppercase().chars().take(4).collect()),
            category: Some(category.to_string()),
            account_handle: Some(name.to_lowercase()),
            mindshare_score: mindshare,
            smart_mentions: mentions,
            change_24h: change,
            change_estimated: true,
        }
    }

    impl MockSocial {
        fn healthy() -> Self {
            Self {
                projects: vec![
                    project("Aave", "defi", 30_000.0, 25, 18.0),
                    project("Arbitrum", "l2", 12_000.0, 8, 4.0),
                    project("Quiet", "gaming", 0.0, 0, 0.0),
                ],
                fail: false,
                delay: Duration::ZERO,
            }
        }

        fn failing() -> Self {
            Self {
                projects: Vec::new(),
                fail: true,
                delay: Duration::ZERO,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::healthy()
            }
        }
    }

    #[async_trait]
    impl SocialSource for MockSocial {
        async fn fetch_projects(
            &self,
            category: Option<&str>,
            limit: usize,
        ) -> Result<Vec<SocialProject>, AlphaError> {
            if self.fail {
                return Err(AlphaError::source_unavailable("moni", "HTTP 503"));
            }
            Ok(self
                .projects
                .iter()
                .filter(|p| category.map_or(true, |c| p.category.as_deref() == Some(c)))
                .take(limit)
                .cloned()
                .collect())
        }

        async fn fetch_account(&self, handle: &str) -> Result<AccountSnapshot, AlphaError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let (moni_score, smart_mentions) = match handle {
                "VitalikButerin" => (15_000.0, 12),
                "naval" => (6_000.0, 3),
                _ => return Err(AlphaError::source_unavailable("moni", "HTTP 404")),
            };
            Ok(AccountSnapshot {
                handle: handle.to_string(),
                moni_score,
                smart_mentions,
                smarts_count: smart_mentions,
                mentions_count: 0,
            })
        }

        async fn fetch_account_activity(
            &self,
            handle: &str,
            _limit: usize,
        ) -> Result<Vec<ActivityItem>, AlphaError> {
            match handle {
                "VitalikButerin" => Ok(vec![ActivityItem {
                    content: Some("Rollups are scaling ethereum nicely".to_string()),
                    project: Some("Arbitrum".to_string()),
                    timestamp: None,
                }]),
                _ => Err(AlphaError::source_unavailable("moni", "HTTP 404")),
            }
        }
    }

    struct MockProtocols {
        fail: bool,
    }

    #[async_trait]
    impl ProtocolSource for MockProtocols {
        async fn fetch_protocols(&self, min_tvl: f64, limit: usize) -> Result<Vec<ProtocolRecord>, AlphaError> {
            if self.fail {
                return Err(AlphaError::source_unavailable("defillama", "request timed out"));
            }
            let protocols = vec![
                ProtocolRecord {
                    name: Some("Lido".to_string()),
                    category: Some("Liquid Staking".to_string()),
                    tvl: 20e9,
                    ..Default::default()
                },
                ProtocolRecord {
                    name: Some("Aave".to_string()),
                    category: Some("Lending".to_string()),
                    tvl: 10e9,
                    change_1d: Some(1.2),
                    ..Default::default()
                },
            ];
            Ok(protocols
                .into_iter()
                .filter(|p| p.tvl >= min_tvl)
                .take(limit)
                .collect())
        }
    }

    struct MockMarket {
        fail: bool,
    }

    #[async_trait]
    impl MarketSource for MockMarket {
        async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, AlphaError> {
            if self.fail {
                return Err(AlphaError::source_unavailable("coingecko", "rate limited"));
            }
            Ok(vec![
                TrendingCoin {
                    id: Some("aave".to_string()),
                    name: Some("Aave".to_string()),
                    symbol: Some("AAVE".to_string()),
                    score: 8.0,
                    market_cap_rank: Some(40),
                    price_change_24h: Some(6.5),
                },
                TrendingCoin {
                    id: Some("arbitrum".to_string()),
                    name: Some("Arbitrum".to_string()),
                    symbol: Some("ARB".to_string()),
                    score: 4.0,
                    market_cap_rank: Some(60),
                    price_change_24h: Some(-2.0),
                },
            ])
        }
    }

    fn repo(full_name: &str, stars: u64) -> Repository {
        Repository {
            name: full_name.rsplit('/').next().unwrap_or(full_name).to_string(),
            full_name: full_name.to_string(),
            url: format!("https://github.com/{}", full_name),
            stars,
            created_at: "2026-02-27T12:00:00Z".to_string(),
            ..Default::default()
        }
    }

    /// Answers `topic:` queries from a fixed table; free-text queries get one keyword hit
    #[derive(Default)]
    struct MockCode {
        fail: bool,
        failing_topics: Vec<&'static str>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl MockCode {
        fn healthy() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn without(topics: &[&'static str]) -> Self {
            Self {
                failing_topics: topics.to_vec(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl CodeSource for MockCode {
        async fn search_repositories(&self, query: &str, limit: usize) -> Result<Vec<Repository>, AlphaError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(AlphaError::source_unavailable("github", "HTTP 403"));
            }

            let topic = query
                .split_whitespace()
                .next()
                .and_then(|term| term.strip_prefix("topic:"));
            let mut repos = match topic {
                Some(t) if self.failing_topics.contains(&t) => {
                    return Err(AlphaError::source_unavailable("github", "HTTP 502"));
                }
                Some("mcp") => vec![repo("acme/mcp-kit", 400), repo("acme/shared", 300)],
                Some("mcp-server") => vec![repo("acme/shared", 300), repo("acme/pg-mcp", 80)],
                Some("ai-agents") => vec![repo("crew/agents", 900)],
                Some("llm-tools") => vec![repo("llm/a", 200)],
                Some("llm") => vec![repo("llm/b", 5_000)],
                Some("large-language-models") => vec![repo("llm/a", 200), repo("llm/c", 700)],
                Some(_) => Vec::new(),
                None => vec![repo("kw/vector-store", 50)],
            };
            repos.truncate(limit);
            Ok(repos)
        }
    }

    struct MockCatalog {
        fail: bool,
    }

    #[async_trait]
    impl CatalogSource for MockCatalog {
        async fn fetch_servers(&self) -> Result<Vec<McpServer>, AlphaError> {
            if self.fail {
                return Err(AlphaError::source_unavailable("awesome-mcp", "HTTP 404"));
            }
            let server = |name: &str, description: &str| McpServer {
                name: name.to_string(),
                url: format!("https://github.com/servers/{}", name),
                description: description.to_string(),
            };
            Ok(vec![
                server("postgres-mcp", "Postgres database access"),
                server("qdrant", "Vector database search with embeddings"),
                server("weather", "Forecasts by zip"),
            ])
        }
    }

    fn full_service(social: Option<MockSocial>, code: MockCode, catalog_fails: bool) -> AlphaService {
        AlphaService::new(
            social.map(|s| Box::new(s) as Box<dyn SocialSource>),
            Box::new(MockProtocols { fail: false }),
            Box::new(MockMarket { fail: false }),
            Box::new(code),
            Box::new(MockCatalog { fail: catalog_fails }),
        )
    }

    fn service(social: Option<MockSocial>, defi_fails: bool, market_fails: bool) -> AlphaService {
        AlphaService::new(
            social.map(|s| Box::new(s) as Box<dyn SocialSource>),
            Box::new(MockProtocols { fail: defi_fails }),
            Box::new(MockMarket { fail: market_fails }),
            Box::new(MockCode::healthy()),
            Box::new(MockCatalog { fail: false }),
        )
    }

    #[tokio::test]
    async fn test_detect_emerging_filters_by_confidence() {
        let service = service(Some(MockSocial::healthy()), false, false);

        let report = service
            .detect_emerging_projects(DetectEmergingParams::default())
            .await
            .unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(report.projects.len(), 1);
        let aave = &report.projects[0];
        assert_eq!(aave.signal.name, "Aave");
        assert!((aave.verdict.confidence - 0.725).abs() < 1e-9);
        assert!(aave.verdict.smart_money_interest);

        let text = render::render_emerging(&report);
        assert!(text.contains("Aave"));
    }

    #[tokio::test]
    async fn test_detect_emerging_degrades_to_empty_on_source_failure() {
        let service = service(Some(MockSocial::failing()), false, false);

        let report = service
            .detect_emerging_projects(DetectEmergingParams::default())
            .await
            .unwrap();

        assert_eq!(report.scanned, 0);
        assert!(report.projects.is_empty());
    }

    #[tokio::test]
    async fn test_social_tools_need_configured_source() {
        let service = service(None, false, false);
        assert!(!service.social_enabled());

        let err = service
            .detect_emerging_projects(DetectEmergingParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AlphaError::SourceUnavailable { ref source, .. } if source == "moni"));

        assert!(service
            .track_smart_money_moves(SmartMoneyParams::default())
            .await
            .is_err());
        assert!(service
            .get_crypto_trends(CryptoTrendsParams::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_smart_money_skips_failed_and_quiet_accounts() {
        let service = service(Some(MockSocial::healthy()), false, false);

        let report = service
            .track_smart_money_moves(SmartMoneyParams::default())
            .await
            .unwrap();

        assert_eq!(report.wallet_tier, WalletTier::Tier1);
        assert_eq!(report.accounts_checked, 5);
        assert_eq!(report.activities.len(), 1);

        let vitalik = &report.activities[0];
        assert_eq!(vitalik.account_handle, "VitalikButerin");
        assert!((vitalik.significance_score - 1.0).abs() < 1e-9);
        assert_eq!(vitalik.mentioned_projects, vec!["Arbitrum"]);
        assert!(vitalik.keywords.contains(&"rollups".to_string()));
        assert_eq!(vitalik.timeframe, "24h");
    }

    #[tokio::test(start_paused = true)]
    async fn test_smart_money_accounts_are_fetched_concurrently() {
        let service = service(Some(MockSocial::slow(Duration::from_secs(1))), false, false);

        let started = tokio::time::Instant::now();
        let report = service
            .track_smart_money_moves(SmartMoneyParams::default())
            .await
            .unwrap();

        assert_eq!(report.accounts_checked, 5);
        assert_eq!(report.activities.len(), 1);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_health_finds_project_by_partial_name() {
        let service = service(Some(MockSocial::healthy()), false, false);

        let report = service
            .analyze_project_health(ProjectHealthParams {
                project_name: "arbi".to_string(),
                include_fundamentals: true,
                risk_assessment: true,
            })
            .await
            .unwrap();

        assert_eq!(report.verdict.project_name, "Arbitrum");
        assert_eq!(report.verdict.category, "l2");
        assert!(report.verdict.overall_score >= 0.0 && report.verdict.overall_score <= 10.0);
        assert!(render::render_health(&report).contains("Arbitrum"));
    }

    #[tokio::test]
    async fn test_health_unknown_project_is_not_found() {
        let service = service(Some(MockSocial::healthy()), false, false);

        let err = service
            .analyze_project_health(ProjectHealthParams {
                project_name: "Nonexistent".to_string(),
                include_fundamentals: true,
                risk_assessment: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AlphaError::NotFound { ref query, .. } if query == "Nonexistent"));
    }

    #[tokio::test]
    async fn test_health_propagates_source_failure_and_bad_names() {
        let failing = service(Some(MockSocial::failing()), false, false);
        let err = failing
            .analyze_project_health(ProjectHealthParams {
                project_name: "Aave".to_string(),
                include_fundamentals: true,
                risk_assessment: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AlphaError::SourceUnavailable { .. }));

        let healthy = service(Some(MockSocial::healthy()), false, false);
        let err = healthy
            .analyze_project_health(ProjectHealthParams {
                project_name: "<script>".to_string(),
                include_fundamentals: true,
                risk_assessment: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AlphaError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_scan_requires_two_sources() {
        let service = service(Some(MockSocial::healthy()), false, false);

        let report = service
            .scan_multi_platform_opportunities(OpportunityScanParams {
                confidence_threshold: 0.1,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(report.unavailable.is_empty());
        let names: Vec<&str> = report
            .opportunities
            .iter()
            .map(|o| o.display_name.as_str())
            .collect();
        // Lido only appears on one platform
        assert_eq!(names, vec!["Aave", "Arbitrum"]);

        let aave = &report.opportunities[0];
        assert_eq!(aave.source_count(), 3);
        assert!((aave.total_score - 0.84).abs() < 1e-9);

        let arbitrum = &report.opportunities[1];
        assert_eq!(arbitrum.sources(), vec![SourceTag::Social, SourceTag::CoinGecko]);
        assert!((arbitrum.total_score - 0.195).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_scan_threshold_applies_to_total() {
        let service = service(Some(MockSocial::healthy()), false, false);

        let report = service
            .scan_multi_platform_opportunities(OpportunityScanParams {
                confidence_threshold: 0.5,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.opportunities[0].key, "aave");
    }

    #[tokio::test]
    async fn test_scan_with_partial_sources() {
        let service = service(Some(MockSocial::healthy()), true, false);

        let report = service
            .scan_multi_platform_opportunities(OpportunityScanParams {
                confidence_threshold: 0.4,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(report.unavailable.len(), 1);
        assert!(report.unavailable[0].contains("defillama"));
        assert_eq!(report.opportunities.len(), 1);
        assert!((report.opportunities[0].total_score - 0.49).abs() < 1e-9);

        let text = render::render_opportunities(&report);
        assert!(text.contains("defillama"));
    }

    #[tokio::test]
    async fn test_scan_fails_when_every_source_fails() {
        let service = service(None, true, true);

        let err = service
            .scan_multi_platform_opportunities(OpportunityScanParams::default())
            .await
            .unwrap_err();

        assert!(err.is_scan_failure());
        match err {
            AlphaError::ScanFailed { failures } => assert_eq!(failures.len(), 3),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_trends_with_category_overview() {
        let service = service(Some(MockSocial::healthy()), false, false);

        let report = service
            .get_crypto_trends(CryptoTrendsParams {
                limit: 2,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(report.projects.len(), 2);
        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.categories[0].name, "defi");
        assert_eq!(report.categories[0].top_projects[0].name, "Aave");

        let filtered = service
            .get_crypto_trends(CryptoTrendsParams {
                category: Some(" L2 ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(filtered.category.as_deref(), Some("l2"));
        assert_eq!(filtered.projects.len(), 1);
        assert_eq!(filtered.projects[0].name.as_deref(), Some("Arbitrum"));
    }

    #[tokio::test]
    async fn test_ai_trends_merges_sections_with_catalog() {
        let service = full_service(None, MockCode::healthy(), false);

        let report = service.get_ai_trends(AiTrendsParams::default()).await.unwrap();

        assert_eq!(report.focus, TechFocus::All);
        assert_eq!(report.days, 7);
        assert!(report.unavailable.is_empty());
        let sections: Vec<TechSection> = report.sections.iter().map(|s| s.section).collect();
        assert_eq!(sections, vec![TechSection::Mcp, TechSection::Agents, TechSection::Llm]);

        let mcp: Vec<&str> = report.sections[0].repos.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(mcp, vec!["acme/mcp-kit", "acme/shared", "acme/pg-mcp"]);
        let llm_stars: Vec<u64> = report.sections[2].repos.iter().map(|r| r.stars).collect();
        assert_eq!(llm_stars, vec![5_000, 700, 200]);

        let catalog = report.catalog.as_ref().unwrap();
        assert_eq!(catalog.total, 3);

        let text = render::render_tech_trends(&report);
        assert!(text.contains("acme/pg-mcp"));
        assert!(text.contains("MCP Server Catalog (3 servers)"));
    }

    #[tokio::test]
    async fn test_ai_trends_drops_failed_section_and_catalog() {
        let service = full_service(None, MockCode::without(&["ai-agents"]), true);

        let report = service
            .get_ai_trends(AiTrendsParams {
                timeframe: "weekly".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(report.days, 30);
        let sections: Vec<TechSection> = report.sections.iter().map(|s| s.section).collect();
        assert_eq!(sections, vec![TechSection::Mcp, TechSection::Llm]);
        assert!(report.catalog.is_none());
        assert_eq!(
            report.unavailable,
            vec![
                "github unavailable: HTTP 502".to_string(),
                "awesome-mcp unavailable: HTTP 404".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_ai_trends_fails_only_when_nothing_answers() {
        let service = full_service(None, MockCode::failing(), false);

        let err = service
            .get_ai_trends(AiTrendsParams {
                focus: "llm".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AlphaError::SourceUnavailable { ref source, .. } if source == "github"));

        let report = service
            .get_ai_trends(AiTrendsParams {
                focus: "mcp".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(report.sections.is_empty());
        assert!(report.catalog.is_some());
        assert_eq!(report.unavailable, vec!["github unavailable: HTTP 403".to_string()]);
    }

    #[tokio::test]
    async fn test_topic_search_falls_back_to_keywords() {
        let code = MockCode::healthy();
        let queries = Arc::clone(&code.queries);
        let service = full_service(None, code, false);

        let report = service
            .search_tech_topic(TechTopicParams {
                topic: "Vector Database".to_string(),
                days: 7,
            })
            .await
            .unwrap();

        assert!(report.keyword_search);
        assert_eq!(report.repos[0].full_name, "kw/vector-store");
        assert_eq!(report.related_server_count, 1);
        assert_eq!(report.related_servers[0].name, "qdrant");

        let queries = queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert!(queries[0].starts_with("topic:vector-database stars:>10 pushed:>"));
        assert!(queries[1].starts_with("Vector Database stars:>10 pushed:>"));

        assert!(render::render_topic(&report).contains("showing keyword matches"));
    }

    #[tokio::test]
    async fn test_topic_search_tolerates_catalog_failure() {
        let service = full_service(None, MockCode::healthy(), true);

        let report = service
            .search_tech_topic(TechTopicParams {
                topic: "mcp".to_string(),
                days: 14,
            })
            .await
            .unwrap();

        assert!(!report.keyword_search);
        assert_eq!(report.repos.len(), 2);
        assert!(report.related_servers.is_empty());
        assert_eq!(report.unavailable.len(), 1);
    }

    #[tokio::test]
    async fn test_topic_search_rejects_bad_arguments() {
        let service = full_service(None, MockCode::healthy(), false);

        let err = service
            .search_tech_topic(TechTopicParams {
                topic: "mcp stars:>1".to_string(),
                days: 7,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AlphaError::InvalidParameter(_)));

        let err = service
            .search_tech_topic(TechTopicParams {
                topic: "mcp".to_string(),
                days: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AlphaError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_new_releases_skip_failed_topics() {
        let code = MockCode::without(&["llm-tools"]);
        let queries = Arc::clone(&code.queries);
        let service = full_service(None, code, false);

        let report = service
            .get_new_releases(NewReleasesParams { days: 3 })
            .await
            .unwrap();

        let topics: Vec<&str> = report.sections.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(topics, vec!["mcp", "ai-agents"]);
        assert_eq!(report.unavailable, vec!["github unavailable: HTTP 502".to_string()]);
        assert!(queries.lock().unwrap().iter().all(|q| q.contains(" created:>")));

        let failing = full_service(None, MockCode::failing(), false);
        assert!(failing
            .get_new_releases(NewReleasesParams::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_briefing_combines_every_half() {
        let service = full_service(Some(MockSocial::healthy()), MockCode::healthy(), false);

        let report = service
            .get_daily_briefing(DailyBriefingParams {
                focus_areas: Some(vec!["MCP".to_string(), "defi".to_string()]),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(report.unavailable.is_empty());
        assert_eq!(report.focus_areas, vec!["mcp", "defi"]);

        let tech = report.tech.as_ref().unwrap();
        assert_eq!(tech.focus, TechFocus::Mcp);
        assert_eq!(tech.sections.len(), 1);
        assert_eq!(report.releases.as_ref().unwrap().days, 7);

        let crypto = report.crypto.as_ref().unwrap();
        assert_eq!(crypto.timeframe, Timeframe::OneDay);
        assert_eq!(crypto.category.as_deref(), Some("defi"));
        assert_eq!(crypto.projects[0].name.as_deref(), Some("Aave"));

        assert!(report.insights.iter().any(|i| i.contains("MCP Opportunity")));

        let text = render::render_briefing(&report);
        assert!(text.contains("### 🔌 MCP (Model Context Protocol)"));
        assert!(text.contains("## 🚀 Crypto (24h)"));
    }

    #[tokio::test]
    async fn test_briefing_degrades_per_half() {
        let no_social = full_service(None, MockCode::healthy(), false);
        let report = no_social
            .get_daily_briefing(DailyBriefingParams::default())
            .await
            .unwrap();
        assert!(report.tech.is_some());
        assert!(report.crypto.is_none());
        assert_eq!(
            report.unavailable,
            vec!["Crypto trends: moni unavailable: MONI_API_KEY not configured".to_string()]
        );

        let no_code = full_service(Some(MockSocial::healthy()), MockCode::failing(), true);
        let report = no_code
            .get_daily_briefing(DailyBriefingParams {
                timeframe: "weekly".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(report.tech.is_none());
        assert!(report.releases.is_none());
        assert_eq!(report.crypto.as_ref().unwrap().timeframe, Timeframe::SevenDays);
        assert_eq!(report.unavailable.len(), 2);
        assert!(report.unavailable[0].starts_with("Tech trends: github unavailable"));
        assert!(report.unavailable[1].starts_with("New releases: github unavailable"));
        assert!(report.insights[0].contains("Multi-Sector Alpha"));
    }

    #[tokio::test]
    async fn test_briefing_skips_excluded_halves() {
        let code = MockCode::healthy();
        let queries = Arc::clone(&code.queries);
        let service = full_service(Some(MockSocial::healthy()), code, false);

        let report = service
            .get_daily_briefing(DailyBriefingParams {
                include_tech: false,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(report.tech.is_none());
        assert!(report.releases.is_none());
        assert!(report.crypto.is_some());
        assert!(report.unavailable.is_empty());
        assert!(queries.lock().unwrap().is_empty());

        let err = service
            .get_daily_briefing(DailyBriefingParams {
                include_tech: false,
                include_crypto: false,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AlphaError::InvalidParameter(_)));
    }
}
