//! Markdown rendering of tool reports

use crate::scoring::{
    CatalogOverview, CompositeOpportunity, McpServer, Repository, SourceRecord, SourceTag,
};
use crate::sources::coingecko::price_momentum;
use crate::sources::defillama::{TvlMomentum, TvlTier};
use crate::tools::{
    BriefingReport, EmergingReport, HealthReport, OpportunityReport, ReleasesReport,
    SmartMoneyReport, TechTrendsReport, TopicReport, TrendsReport,
};
use chrono::{DateTime, Utc};
use std::fmt::Write;

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn change_marker(change: f64) -> &'static str {
    if change > 0.0 {
        "📈"
    } else if change < 0.0 {
        "📉"
    } else {
        "➡️"
    }
}

fn write_partial_data(out: &mut String, unavailable: &[String]) {
    if unavailable.is_empty() {
        return;
    }
    let _ = writeln!(out, "> ⚠️ Partial data:");
    for reason in unavailable {
        let _ = writeln!(out, "> - {}", reason);
    }
    out.push('\n');
}

/// `$1.23B`, `$45.6M`, `$7.8K`, `$12`
pub fn format_usd(amount: f64) -> String {
    let abs = amount.abs();
    if abs >= 1e9 {
        format!("${:.2}B", amount / 1e9)
    } else if abs >= 1e6 {
        format!("${:.1}M", amount / 1e6)
    } else if abs >= 1e3 {
        format!("${:.1}K", amount / 1e3)
    } else {
        format!("${:.0}", amount)
    }
}

pub fn render_emerging(report: &EmergingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🌱 Emerging Crypto Projects\n");
    let _ = writeln!(
        out,
        "*Method: {} • Timeframe: {} • Min confidence: {:.0}% • Generated {}*\n",
        report.discovery_method.as_str(),
        report.timeframe,
        report.min_confidence * 100.0,
        timestamp(&report.generated_at)
    );

    if report.projects.is_empty() {
        let _ = writeln!(
            out,
            "No projects met the confidence threshold ({} scanned). Try lowering `min_confidence`.",
            report.scanned
        );
        return out;
    }

    for (i, project) in report.projects.iter().enumerate() {
        let signal = &project.signal;
        let verdict = &project.verdict;
        let _ = writeln!(
            out,
            "## {}. {} • {}",
            i + 1,
            signal.name,
            signal.category
        );
        let _ = writeln!(out, "- **Confidence:** {:.0}%", verdict.confidence * 100.0);
        let _ = writeln!(
            out,
            "- **Engagement:** {:.0} {} {:+.1}%",
            signal.engagement_score,
            change_marker(signal.change_pct),
            signal.change_pct
        );
        let _ = writeln!(out, "- **Smart mentions:** {}", signal.secondary_mentions);

        let mut signals = Vec::new();
        if verdict.smart_money_interest {
            signals.push("🧠 smart money interest".to_string());
        }
        if verdict.social_velocity > 0.0 {
            signals.push(format!("⚡ social velocity {:.1}", verdict.social_velocity));
        }
        if verdict.engagement_surge {
            signals.push("🔥 engagement surge".to_string());
        }
        signals.push(format!("momentum {:.2}", verdict.momentum_score));
        let _ = writeln!(out, "- **Signals:** {}", signals.join(", "));

        if !verdict.risk_flags.is_empty() {
            let _ = writeln!(out, "- **⚠️ Risk flags:** {}", verdict.risk_flags.join(", "));
        }
        out.push('\n');
    }

    out
}

pub fn render_smart_money(report: &SmartMoneyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🐋 Smart Money Moves\n");
    let _ = writeln!(
        out,
        "*Tier: {} • Timeframe: {} • Accounts checked: {} • Generated {}*\n",
        report.wallet_tier.as_str(),
        report.timeframe,
        report.accounts_checked,
        timestamp(&report.generated_at)
    );

    if report.activities.is_empty() {
        let _ = writeln!(out, "No significant smart-money activity detected.");
        return out;
    }

    for activity in &report.activities {
        let _ = writeln!(out, "## @{}", activity.account_handle);
        let _ = writeln!(
            out,
            "- **Significance:** {:.2} • Influence {:.0} • {} smart mentions",
            activity.significance_score, activity.influence_score, activity.secondary_mentions
        );
        if !activity.mentioned_projects.is_empty() {
            let _ = writeln!(out, "- **Projects:** {}", activity.mentioned_projects.join(", "));
        }
        if !activity.keywords.is_empty() {
            let _ = writeln!(out, "- **Narratives:** {}", activity.keywords.join(", "));
        }
        out.push('\n');
    }

    out
}

pub fn render_health(report: &HealthReport) -> String {
    let v = &report.verdict;
    let mut out = String::new();
    let _ = writeln!(out, "# 🩺 Project Health: {}\n", v.project_name);
    let _ = writeln!(out, "*Category: {} • Generated {}*\n", v.category, timestamp(&report.generated_at));
    let _ = writeln!(
        out,
        "**Overall: {:.1}/10 (Grade {})**\n",
        v.overall_score, v.grade
    );

    let _ = writeln!(out, "## Social");
    let _ = writeln!(out, "- Health: {}", v.social_health.as_str());
    let _ = writeln!(out, "- Engagement: {:.0} (rank #{})", v.engagement_score, v.social_rank);
    let _ = writeln!(
        out,
        "- Smart mentions: {} ({} influence)",
        v.secondary_mentions, v.influence_level
    );
    out.push('\n');

    let _ = writeln!(out, "## Momentum");
    let _ = writeln!(
        out,
        "- Direction: {} {} {:+.1}%",
        v.momentum_direction.as_str(),
        change_marker(v.change_pct),
        v.change_pct
    );
    let _ = writeln!(out, "- Engagement velocity: {}", v.engagement_velocity.as_str());
    let _ = writeln!(out, "- Trend strength: {:.1}/10", v.trend_strength);

    if v.include_fundamentals {
        let _ = writeln!(out, "- Sustainability: {:.1}", v.sustainability_score);
        let _ = writeln!(out, "- Momentum quality: {}", v.momentum_quality.as_str());
        let _ = writeln!(out, "- Breakout potential: {:.0}%", v.breakout_potential * 100.0);
    }
    out.push('\n');

    if !v.risk_factors.is_empty() {
        let _ = writeln!(out, "## ⚠️ Risk Factors");
        for risk in &v.risk_factors {
            let _ = writeln!(out, "- {}", risk);
        }
        out.push('\n');
    }

    if !v.opportunities.is_empty() {
        let _ = writeln!(out, "## 💡 Opportunities");
        for opportunity in &v.opportunities {
            let _ = writeln!(out, "- {}", opportunity);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Recommendation\n{}", v.recommendation);
    out
}

fn render_source_line(out: &mut String, tag: SourceTag, record: &SourceRecord) {
    match record {
        SourceRecord::Social(project) => {
            let _ = writeln!(
                out,
                "  - {}: confidence {:.0}%, engagement {:.0}",
                tag,
                project.verdict.confidence * 100.0,
                project.signal.engagement_score
            );
        }
        SourceRecord::Protocol(protocol) => {
            let _ = writeln!(
                out,
                "  - {}: TVL {} ({}), {}",
                tag,
                format_usd(protocol.tvl),
                TvlTier::from_tvl(protocol.tvl).label(),
                TvlMomentum::from_changes(protocol.change_1h, protocol.change_1d)
            );
        }
        SourceRecord::Coin(coin) => {
            let rank = coin
                .market_cap_rank
                .map(|r| format!("#{}", r))
                .unwrap_or_else(|| "unranked".to_string());
            let _ = writeln!(
                out,
                "  - {}: trend score {:.1}, market cap {}, {}",
                tag,
                coin.score,
                rank,
                price_momentum(None, coin.price_change_24h)
            );
        }
    }
}

fn render_opportunity(out: &mut String, index: usize, opportunity: &CompositeOpportunity) {
    let sources: Vec<&str> = opportunity.sources().iter().map(|s| s.as_str()).collect();
    let _ = writeln!(
        out,
        "## {}. {} • score {:.2}",
        index,
        opportunity.display_name,
        opportunity.total_score
    );
    let _ = writeln!(out, "- **Confirmed by:** {}", sources.join(", "));
    for (tag, record) in &opportunity.per_source_data {
        render_source_line(out, *tag, record);
    }
    out.push('\n');
}

pub fn render_opportunities(report: &OpportunityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🔗 Multi-Platform Opportunities\n");
    let _ = writeln!(
        out,
        "*Sectors: {} • Timeframe: {} • Threshold: {:.2} • Generated {}*\n",
        report.sectors.join(", "),
        report.timeframe,
        report.confidence_threshold,
        timestamp(&report.generated_at)
    );

    write_partial_data(&mut out, &report.unavailable);

    if report.opportunities.is_empty() {
        let _ = writeln!(
            out,
            "No opportunity is confirmed by two or more platforms above the threshold."
        );
        return out;
    }

    for (i, opportunity) in report.opportunities.iter().enumerate() {
        render_opportunity(&mut out, i + 1, opportunity);
    }
    out
}

pub fn render_trends(report: &TrendsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🚀 Crypto Trends\n");
    let _ = writeln!(
        out,
        "*Timeframe: {} • Category: {} • Generated {}*\n",
        report.timeframe,
        report.category.as_deref().unwrap_or("all"),
        timestamp(&report.generated_at)
    );
    write_trends_body(&mut out, report, "##");
    out
}

fn write_trends_body(out: &mut String, report: &TrendsReport, heading: &str) {
    let _ = writeln!(out, "{} Top Projects by Mindshare\n", heading);
    if report.projects.is_empty() {
        let _ = writeln!(out, "No mindshare data available.\n");
    }
    for (i, project) in report.projects.iter().enumerate() {
        let name = project.name.as_deref().unwrap_or("Unknown");
        let _ = write!(out, "{}. **{}", i + 1, name);
        if let Some(symbol) = project.symbol.as_deref() {
            let _ = write!(out, " ({})", symbol);
        }
        let _ = write!(out, "**");
        if let Some(category) = project.category.as_deref() {
            let _ = write!(out, " • {}", category);
        }
        let estimated = if project.change_estimated { " (est.)" } else { "" };
        let _ = writeln!(
            out,
            "\n   Mindshare: {:.1} {} {:+.1}%{}",
            project.mindshare_score,
            change_marker(project.change_24h),
            project.change_24h,
            estimated
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{} Mindshare by Category\n", heading);
    if report.categories.is_empty() {
        let _ = writeln!(out, "No category data available.");
    }
    for category in &report.categories {
        let _ = writeln!(
            out,
            "**{}**: {:.1} {} {:+.1}%",
            category.name,
            category.mindshare_score,
            change_marker(category.change_24h),
            category.change_24h
        );
        if !category.top_projects.is_empty() {
            let names: Vec<&str> = category.top_projects.iter().map(|p| p.name.as_str()).collect();
            let _ = writeln!(out, "   Top: {}", names.join(", "));
        }
    }
}

fn write_repository(out: &mut String, index: usize, repo: &Repository) {
    let _ = writeln!(out, "{}. **[{}]({})** ⭐ {}", index, repo.full_name, repo.url, repo.stars);
    if let Some(description) = repo.description.as_deref() {
        let _ = writeln!(out, "   {}", description);
    }
    let mut details = Vec::new();
    if let Some(language) = repo.language.as_deref() {
        details.push(language.to_string());
    }
    if !repo.created_day().is_empty() {
        details.push(format!("created {}", repo.created_day()));
    }
    if !repo.updated_day().is_empty() {
        details.push(format!("updated {}", repo.updated_day()));
    }
    if !details.is_empty() {
        let _ = writeln!(out, "   {}", details.join(" • "));
    }
}

fn write_server(out: &mut String, server: &McpServer) {
    let _ = writeln!(out, "- **[{}]({})**: {}", server.name, server.url, server.description);
}

fn write_catalog(out: &mut String, catalog: &CatalogOverview, heading: &str) {
    let _ = writeln!(out, "{} 📚 MCP Server Catalog ({} servers)\n", heading, catalog.total);
    for category in &catalog.categories {
        let _ = writeln!(out, "**{}** ({})", category.category.label(), category.count);
        for server in &category.highlights {
            write_server(out, server);
        }
        out.push('\n');
    }
}

fn write_tech_body(out: &mut String, report: &TechTrendsReport, heading: &str) {
    for section in &report.sections {
        let _ = writeln!(out, "{} {}\n", heading, section.section.title());
        if section.repos.is_empty() {
            let _ = writeln!(out, "No trending repositories found.\n");
            continue;
        }
        for (i, repo) in section.repos.iter().enumerate() {
            write_repository(out, i + 1, repo);
        }
        out.push('\n');
    }
    if let Some(catalog) = &report.catalog {
        write_catalog(out, catalog, heading);
    }
}

fn write_releases_body(out: &mut String, report: &ReleasesReport, heading: &str) {
    if report.sections.is_empty() {
        let _ = writeln!(out, "No new repositories in the last {} days.\n", report.days);
        return;
    }
    for section in &report.sections {
        let _ = writeln!(out, "{} `{}`\n", heading, section.topic);
        for (i, repo) in section.repos.iter().enumerate() {
            write_repository(out, i + 1, repo);
        }
        out.push('\n');
    }
}

pub fn render_tech_trends(report: &TechTrendsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🤖 AI & Tech Trends\n");
    let _ = writeln!(
        out,
        "*Focus: {} • Last {} days • Generated {}*\n",
        report.focus.as_str(),
        report.days,
        timestamp(&report.generated_at)
    );
    write_partial_data(&mut out, &report.unavailable);
    write_tech_body(&mut out, report, "##");
    out
}

pub fn render_topic(report: &TopicReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🔎 Tech Topic: {}\n", report.topic);
    let _ = writeln!(
        out,
        "*Last {} days • Generated {}*\n",
        report.days,
        timestamp(&report.generated_at)
    );
    write_partial_data(&mut out, &report.unavailable);

    let _ = writeln!(out, "## Trending Repositories\n");
    if report.keyword_search {
        let _ = writeln!(out, "*No repositories carry this topic tag; showing keyword matches.*\n");
    }
    if report.repos.is_empty() {
        let _ = writeln!(out, "No repositories found.\n");
    }
    for (i, repo) in report.repos.iter().enumerate() {
        write_repository(&mut out, i + 1, repo);
    }
    out.push('\n');

    if report.related_server_count > 0 {
        let _ = writeln!(
            out,
            "## 🔌 Related MCP Servers ({} found)\n",
            report.related_server_count
        );
        for server in &report.related_servers {
            write_server(&mut out, server);
        }
    }
    out
}

pub fn render_releases(report: &ReleasesReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🆕 New Releases (Last {} Days)\n", report.days);
    let _ = writeln!(out, "*Generated {}*\n", timestamp(&report.generated_at));
    write_partial_data(&mut out, &report.unavailable);
    write_releases_body(&mut out, report, "##");
    out
}

pub fn render_briefing(report: &BriefingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 📰 Daily Alpha Briefing\n");
    let focus = if report.focus_areas.is_empty() {
        "all".to_string()
    } else {
        report.focus_areas.join(", ")
    };
    let _ = writeln!(
        out,
        "*Timeframe: {} • Focus: {} • Generated {}*\n",
        report.timeframe,
        focus,
        timestamp(&report.generated_at)
    );
    write_partial_data(&mut out, &report.unavailable);

    if let Some(tech) = &report.tech {
        let _ = writeln!(out, "## 🤖 AI & Tech (last {} days)\n", tech.days);
        write_tech_body(&mut out, tech, "###");
    }
    if let Some(releases) = &report.releases {
        let _ = writeln!(out, "## 🆕 New Releases\n");
        write_releases_body(&mut out, releases, "###");
    }
    if let Some(crypto) = &report.crypto {
        let _ = writeln!(out, "## 🚀 Crypto ({})\n", crypto.timeframe);
        write_trends_body(&mut out, crypto, "###");
        out.push('\n');
    }
    if report.tech.is_none() && report.releases.is_none() && report.crypto.is_none() {
        let _ = writeln!(out, "No section could be fetched.\n");
    }

    let _ = writeln!(out, "## 💡 Cross-Sector Insights\n");
    for insight in &report.insights {
        let _ = writeln!(out, "{}", insight);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{
        CrossSourceCorrelator, CorrelationRequest, EmergenceScorer, EmergingProject, HealthAnalyzer,
        HealthOptions, NormalizedSignal, ProtocolRecord, TrendingCoin,
    };
    use crate::scoring::{summarize_catalog, RepoSection, SocialProject, TechFocus, TechSection};
    use crate::tools::{ReleaseSection, Timeframe};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(2_500_000_000.0), "$2.50B");
        assert_eq!(format_usd(50_000_000.0), "$50.0M");
        assert_eq!(format_usd(7_800.0), "$7.8K");
        assert_eq!(format_usd(12.0), "$12");
    }

    #[test]
    fn test_empty_emerging_report_suggests_lower_threshold() {
        let report = EmergingReport {
            discovery_method: crate::scoring::DiscoveryMethod::All,
            timeframe: Timeframe::SevenDays,
            min_confidence: 0.7,
            scanned: 12,
            projects: vec![],
            generated_at: fixed_time(),
        };

        let text = render_emerging(&report);
        assert!(text.contains("2026-03-01 12:00 UTC"));
        assert!(text.contains("12 scanned"));
    }

    #[test]
    fn test_emerging_report_lists_flags() {
        let signal = NormalizedSignal::new("Moon", "meme", 60_000.0, 2, 80.0);
        let verdict = EmergenceScorer::new().score(&signal);
        let report = EmergingReport {
            discovery_method: crate::scoring::DiscoveryMethod::SocialSurge,
            timeframe: Timeframe::OneDay,
            min_confidence: 0.0,
            scanned: 1,
            projects: vec![EmergingProject { signal, verdict }],
            generated_at: fixed_time(),
        };

        let text = render_emerging(&report);
        assert!(text.contains("## 1. Moon • meme"));
        assert!(text.contains("extreme_pump, retail_hype"));
        assert!(text.contains("engagement surge"));
    }

    #[test]
    fn test_health_report_sections() {
        let signal = NormalizedSignal::new("Foo", "defi", 25_000.0, 25, 18.0);
        let verdict = HealthAnalyzer::new().evaluate(&signal, &[signal.clone()], HealthOptions::default());
        let text = render_health(&HealthReport {
            verdict,
            generated_at: fixed_time(),
        });

        assert!(text.contains("# 🩺 Project Health: Foo"));
        assert!(text.contains("Grade A"));
        assert!(text.contains("## 💡 Opportunities"));
        assert!(text.contains("Breakout potential"));
    }

    #[test]
    fn test_opportunity_report_shows_partial_failures() {
        let correlator = CrossSourceCorrelator::new();
        let opportunities = correlator.correlate(
            &[],
            &[ProtocolRecord {
                name: Some("Aave".to_string()),
                tvl: 1e10,
                change_1d: Some(6.0),
                ..Default::default()
            }],
            &[TrendingCoin {
                name: Some("Aave".to_string()),
                score: 6.0,
                market_cap_rank: Some(40),
                ..Default::default()
            }],
            &CorrelationRequest {
                sectors: vec!["defi".to_string()],
                confidence_threshold: 0.3,
                max_results: 8,
            },
        );

        let report = OpportunityReport {
            sectors: vec!["defi".to_string()],
            timeframe: Timeframe::SevenDays,
            confidence_threshold: 0.3,
            opportunities,
            unavailable: vec!["moni unavailable: HTTP 503".to_string()],
            generated_at: fixed_time(),
        };

        let text = render_opportunities(&report);
        assert!(text.contains("moni unavailable: HTTP 503"));
        assert!(text.contains("## 1. Aave • score 0.50"));
        assert!(text.contains("Confirmed by:** defillama, coingecko"));
        assert!(text.contains("TVL $10.00B (Blue Chip), 📈 Growing"));
        assert!(text.contains("market cap #40"));
    }

    fn repo(full_name: &str, stars: u64) -> Repository {
        Repository {
            name: full_name.to_string(),
            full_name: full_name.to_string(),
            url: format!("https://github.com/{}", full_name),
            description: Some("Agent toolkit".to_string()),
            language: Some("Rust".to_string()),
            stars,
            created_at: "2026-02-25T10:00:00Z".to_string(),
            ..Default::default()
        }
    }

    fn tech_report(unavailable: Vec<String>) -> TechTrendsReport {
        let servers = vec![McpServer {
            name: "postgres-mcp".to_string(),
            url: "https://github.com/x/postgres-mcp".to_string(),
            description: "Postgres access".to_string(),
        }];
        TechTrendsReport {
            focus: TechFocus::Mcp,
            timeframe: Timeframe::Daily,
            days: 7,
            sections: vec![RepoSection {
                section: TechSection::Mcp,
                repos: vec![repo("acme/mcp-kit", 420)],
            }],
            catalog: Some(summarize_catalog(&servers)),
            unavailable,
            generated_at: fixed_time(),
        }
    }

    #[test]
    fn test_tech_trends_lists_repositories_and_catalog() {
        let text = render_tech_trends(&tech_report(vec!["github unavailable: HTTP 403".to_string()]));

        assert!(text.contains("*Focus: mcp • Last 7 days"));
        assert!(text.contains("> - github unavailable: HTTP 403"));
        assert!(text.contains("## 🔌 MCP (Model Context Protocol)"));
        assert!(text.contains("1. **[acme/mcp-kit](https://github.com/acme/mcp-kit)** ⭐ 420"));
        assert!(text.contains("Rust • created 2026-02-25"));
        assert!(text.contains("MCP Server Catalog (1 servers)"));
        assert!(text.contains("**Databases** (1)"));
    }

    #[test]
    fn test_topic_report_notes_keyword_fallback() {
        let report = TopicReport {
            topic: "vector database".to_string(),
            days: 7,
            repos: vec![repo("acme/vecdb", 90)],
            keyword_search: true,
            related_servers: Vec::new(),
            related_server_count: 0,
            unavailable: Vec::new(),
            generated_at: fixed_time(),
        };
        let text = render_topic(&report);

        assert!(text.starts_with("# 🔎 Tech Topic: vector database"));
        assert!(text.contains("showing keyword matches"));
        assert!(!text.contains("Related MCP Servers"));
    }

    #[test]
    fn test_empty_releases() {
        let report = ReleasesReport {
            days: 30,
            sections: Vec::new(),
            unavailable: Vec::new(),
            generated_at: fixed_time(),
        };
        assert!(render_releases(&report).contains("No new repositories in the last 30 days."));

        let report = ReleasesReport {
            sections: vec![ReleaseSection {
                topic: "ai-agents".to_string(),
                repos: vec![repo("acme/agent", 12)],
            }],
            ..report
        };
        assert!(render_releases(&report).contains("## `ai-agents`"));
    }

    #[test]
    fn test_briefing_nests_sections_and_lists_gaps() {
        let crypto = TrendsReport {
            timeframe: Timeframe::OneDay,
            category: None,
            projects: vec![SocialProject {
                name: Some("Fetch.ai".to_string()),
                category: Some("ai".to_string()),
                mindshare_score: 120.0,
                ..Default::default()
            }],
            categories: Vec::new(),
            generated_at: fixed_time(),
        };
        let report = BriefingReport {
            timeframe: Timeframe::Daily,
            focus_areas: vec!["mcp".to_string()],
            tech: Some(tech_report(Vec::new())),
            releases: None,
            crypto: Some(crypto),
            insights: vec!["🔗 **MCP Opportunity**: test".to_string()],
            unavailable: vec!["New releases: github unavailable: rate limited".to_string()],
            generated_at: fixed_time(),
        };
        let text = render_briefing(&report);

        assert!(text.contains("*Timeframe: daily • Focus: mcp"));
        assert!(text.contains("> - New releases: github unavailable: rate limited"));
        assert!(text.contains("### 🔌 MCP (Model Context Protocol)"));
        assert!(!text.contains("## 🆕 New Releases"));
        assert!(text.contains("## 🚀 Crypto (24h)"));
        assert!(text.contains("### Top Projects by Mindshare"));
        assert!(text.contains("1. **Fetch.ai** • ai"));
        assert!(text.contains("## 💡 Cross-Sector Insights"));
    }
}
