//! Tool surface: definitions advertised to clients and call dispatch

pub mod params;
pub mod service;

pub use params::{
    parse_arguments, AiTrendsParams, CryptoTrendsParams, DailyBriefingParams, DetectEmergingParams,
    NewReleasesParams, OpportunityScanParams, ProjectHealthParams, SmartMoneyParams,
    TechTopicParams, Timeframe,
};
pub use service::{
    AlphaService, BriefingReport, EmergingReport, HealthReport, OpportunityReport, ReleaseSection,
    ReleasesReport, SmartMoneyReport, TechTrendsReport, TopicReport, TrendsReport,
};

use crate::error::AlphaError;
use crate::render;
use serde::Serialize;
use serde_json::{json, Value};

pub const DETECT_EMERGING_PROJECTS: &str = "detect_emerging_projects";
pub const TRACK_SMART_MONEY_MOVES: &str = "track_smart_money_moves";
pub const ANALYZE_PROJECT_HEALTH: &str = "analyze_project_health";
pub const SCAN_MULTI_PLATFORM_OPPORTUNITIES: &str = "scan_multi_platform_opportunities";
pub const GET_CRYPTO_TRENDS: &str = "get_crypto_trends";
pub const GET_AI_TRENDS: &str = "get_ai_trends";
pub const SEARCH_TECH_TOPIC: &str = "search_tech_topic";
pub const GET_NEW_RELEASES: &str = "get_new_releases";
pub const GET_DAILY_BRIEFING: &str = "get_daily_briefing";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn days_schema() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 365,
        "description": "Lookback period in days",
        "default": 7,
    })
}

fn timeframe_schema(default: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["1h", "24h", "7d", "30d", "daily", "weekly"],
        "description": "Analysis window",
        "default": default,
    })
}

/// Every tool this server exposes, in listing order
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: DETECT_EMERGING_PROJECTS,
            description: "Detect crypto projects gaining traction early by combining smart-money \
                mentions, social velocity and engagement momentum into a confidence score.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "discovery_method": {
                        "type": "string",
                        "enum": ["all", "smart_money", "social_surge"],
                        "description": "Detection strategy",
                        "default": "all",
                    },
                    "timeframe": timeframe_schema("7d"),
                    "min_confidence": {
                        "type": "number",
                        "minimum": 0.0,
                        "maximum": 1.0,
                        "description": "Minimum confidence score (0.0 to 1.0)",
                        "default": 0.7,
                    },
                    "limit": {"type": "integer", "minimum": 0, "default": 20},
                },
                "required": [],
            }),
        },
        ToolDefinition {
            name: TRACK_SMART_MONEY_MOVES,
            description: "Track what influential crypto accounts are discussing and rank them \
                by the significance of their recent activity.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "wallet_tier": {
                        "type": "string",
                        "enum": ["tier1", "institutional", "whale"],
                        "description": "Group of accounts to track",
                        "default": "tier1",
                    },
                    "timeframe": timeframe_schema("24h"),
                    "limit": {"type": "integer", "minimum": 0, "default": 20},
                },
                "required": [],
            }),
        },
        ToolDefinition {
            name: ANALYZE_PROJECT_HEALTH,
            description: "Grade a crypto project's social health and momentum (A-F) with risk \
                factors, opportunities and a position recommendation.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "project_name": {
                        "type": "string",
                        "description": "Project to analyze (e.g. 'Uniswap', 'Arbitrum')",
                    },
                    "include_fundamentals": {"type": "boolean", "default": true},
                    "risk_assessment": {"type": "boolean", "default": true},
                },
                "required": ["project_name"],
            }),
        },
        ToolDefinition {
            name: SCAN_MULTI_PLATFORM_OPPORTUNITIES,
            description: "Cross-reference social, DeFi TVL and market trending data and return \
                opportunities confirmed by at least two platforms.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "sectors": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Sectors to include (e.g. defi, l1, l2, ai)",
                        "default": ["defi", "l1", "l2", "ai"],
                    },
                    "timeframe": timeframe_schema("7d"),
                    "confidence_threshold": {
                        "type": "number",
                        "minimum": 0.0,
                        "maximum": 1.0,
                        "default": 0.7,
                    },
                    "max_results": {"type": "integer", "minimum": 0, "default": 8},
                },
                "required": [],
            }),
        },
        ToolDefinition {
            name: GET_CRYPTO_TRENDS,
            description: "Top crypto projects by social mindshare with a per-category overview.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "timeframe": timeframe_schema("24h"),
                    "category": {
                        "type": "string",
                        "enum": ["defi", "l1", "l2", "gaming", "ai"],
                        "description": "Restrict to one category",
                    },
                    "limit": {"type": "integer", "minimum": 0, "default": 20},
                },
                "required": [],
            }),
        },
        ToolDefinition {
            name: GET_AI_TRENDS,
            description: "Trending AI repositories (MCP servers, agent frameworks, LLM tools) \
                with an overview of the community MCP server catalog.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "focus": {
                        "type": "string",
                        "enum": ["all", "mcp", "agents", "llm"],
                        "description": "Area to cover",
                        "default": "all",
                    },
                    "timeframe": {
                        "type": "string",
                        "enum": ["daily", "weekly"],
                        "description": "daily looks back 7 days, weekly 30",
                        "default": "daily",
                    },
                },
                "required": [],
            }),
        },
        ToolDefinition {
            name: SEARCH_TECH_TOPIC,
            description: "Search trending repositories for one tech topic and list related MCP servers.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "Topic to search (e.g. 'vector-database', 'rag')",
                    },
                    "days": days_schema(),
                },
                "required": ["topic"],
            }),
        },
        ToolDefinition {
            name: GET_NEW_RELEASES,
            description: "Newly created MCP, AI agent and LLM tool repositories.",
            input_schema: json!({
                "type": "object",
                "properties": {"days": days_schema()},
                "required": [],
            }),
        },
        ToolDefinition {
            name: GET_DAILY_BRIEFING,
            description: "Combined daily briefing: AI/tech trends, new releases, crypto mindshare \
                and cross-sector insights. Missing sources are noted, not fatal.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "timeframe": {
                        "type": "string",
                        "enum": ["daily", "weekly"],
                        "default": "daily",
                    },
                    "include_crypto": {"type": "boolean", "default": true},
                    "include_tech": {"type": "boolean", "default": true},
                    "focus_areas": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "e.g. mcp, agents, defi, l1, ai",
                    },
                },
                "required": [],
            }),
        },
    ]
}

/// Run one tool and render its report as markdown
pub async fn call_tool(
    service: &AlphaService,
    name: &str,
    arguments: Option<&Value>,
) -> Result<String, AlphaError> {
    log::info!("🔧 Tool call: {}", name);

    match name {
        DETECT_EMERGING_PROJECTS => {
            let report = service
                .detect_emerging_projects(parse_arguments(arguments)?)
                .await?;
            Ok(render::render_emerging(&report))
        }
        TRACK_SMART_MONEY_MOVES => {
            let report = service
                .track_smart_money_moves(parse_arguments(arguments)?)
                .await?;
            Ok(render::render_smart_money(&report))
        }
        ANALYZE_PROJECT_HEALTH => {
            let report = service
                .analyze_project_health(parse_arguments(arguments)?)
                .await?;
            Ok(render::render_health(&report))
        }
        SCAN_MULTI_PLATFORM_OPPORTUNITIES => {
            let report = service
                .scan_multi_platform_opportunities(parse_arguments(arguments)?)
                .await?;
            Ok(render::render_opportunities(&report))
        }
        GET_CRYPTO_TRENDS => {
            let report = service.get_crypto_trends(parse_arguments(arguments)?).await?;
            Ok(render::render_trends(&report))
        }
        GET_AI_TRENDS => {
            let report = service.get_ai_trends(parse_arguments(arguments)?).await?;
            Ok(render::render_tech_trends(&report))
        }
        SEARCH_TECH_TOPIC => {
            let report = service.search_tech_topic(parse_arguments(arguments)?).await?;
            Ok(render::render_topic(&report))
        }
        GET_NEW_RELEASES => {
            let report = service.get_new_releases(parse_arguments(arguments)?).await?;
            Ok(render::render_releases(&report))
        }
        GET_DAILY_BRIEFING => {
            let report = service.get_daily_briefing(parse_arguments(arguments)?).await?;
            Ok(render::render_briefing(&report))
        }
        other => Err(AlphaError::InvalidParameter(format!("unknown tool '{}'", other))),
    }
}
