//! Tech trend shaping: repository sections, MCP catalog overview and
//! cross-sector briefing insights

use super::normalizer::SocialProject;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Repositories shown per section
pub const SECTION_SIZE: usize = 5;
const CATALOG_HIGHLIGHTS: usize = 3;

/// One repository from the code-hosting search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub pushed_at: String,
}

impl Repository {
    /// `YYYY-MM-DD` part of an ISO timestamp
    pub fn created_day(&self) -> &str {
        day_of(&self.created_at)
    }

    pub fn updated_day(&self) -> &str {
        day_of(&self.updated_at)
    }
}

fn day_of(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

/// Entry of the community MCP server list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpServer {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// Which tech sections a trends report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechFocus {
    All,
    Mcp,
    Agents,
    Llm,
}

impl TechFocus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "all" => TechFocus::All,
            "mcp" => TechFocus::Mcp,
            "agents" => TechFocus::Agents,
            "llm" => TechFocus::Llm,
            other => {
                log::warn!("Invalid focus '{}', defaulting to all", other);
                TechFocus::All
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TechFocus::All => "all",
            TechFocus::Mcp => "mcp",
            TechFocus::Agents => "agents",
            TechFocus::Llm => "llm",
        }
    }

    pub fn sections(&self) -> Vec<TechSection> {
        match self {
            TechFocus::All => TechSection::ALL.to_vec(),
            TechFocus::Mcp => vec![TechSection::Mcp],
            TechFocus::Agents => vec![TechSection::Agents],
            TechFocus::Llm => vec![TechSection::Llm],
        }
    }

    /// The MCP server catalog rides along with MCP coverage
    pub fn includes_catalog(&self) -> bool {
        matches!(self, TechFocus::All | TechFocus::Mcp)
    }
}

/// A themed group of repository searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechSection {
    Mcp,
    Agents,
    Llm,
}

impl TechSection {
    pub const ALL: [TechSection; 3] = [TechSection::Mcp, TechSection::Agents, TechSection::Llm];

    pub fn title(&self) -> &'static str {
        match self {
            TechSection::Mcp => "🔌 MCP (Model Context Protocol)",
            TechSection::Agents => "🤖 AI Agents",
            TechSection::Llm => "🧠 LLM Tools & Frameworks",
        }
    }

    pub fn topics(&self) -> &'static [&'static str] {
        match self {
            TechSection::Mcp => &["mcp", "mcp-server", "model-context-protocol"],
            TechSection::Agents => &["ai-agents"],
            TechSection::Llm => &["llm-tools", "llm", "large-language-models"],
        }
    }

    /// Younger ecosystems get a lower star floor
    pub fn min_stars(&self) -> u64 {
        match self {
            TechSection::Mcp => 10,
            TechSection::Agents => 50,
            TechSection::Llm => 100,
        }
    }

    pub fn per_topic(&self) -> usize {
        match self {
            TechSection::Mcp | TechSection::Agents => 5,
            TechSection::Llm => 3,
        }
    }

    /// Merge per-topic results into the section listing
    ///
    /// Duplicates (by `full_name`) keep their first position. LLM results
    /// come from three overlapping topics and are re-ranked by stars.
    pub fn merge(&self, per_topic: Vec<Vec<Repository>>) -> Vec<Repository> {
        let mut repos = dedup_repositories(per_topic.into_iter().flatten());
        if *self == TechSection::Llm {
            repos.sort_by(|a, b| b.stars.cmp(&a.stars));
        }
        repos.truncate(SECTION_SIZE);
        repos
    }
}

/// Merged listing for one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSection {
    pub section: TechSection,
    pub repos: Vec<Repository>,
}

/// Drop repeated repositories, keeping first occurrence order
pub fn dedup_repositories(repos: impl IntoIterator<Item = Repository>) -> Vec<Repository> {
    let mut seen = HashSet::new();
    repos
        .into_iter()
        .filter(|repo| seen.insert(repo.full_name.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerCategory {
    Databases,
    Apis,
    DevTools,
    FileSystems,
    Web,
    AiMl,
    Other,
}

impl ServerCategory {
    /// Keyword-matched categories in precedence order (`Other` excluded)
    const MATCHED: [ServerCategory; 6] = [
        ServerCategory::Databases,
        ServerCategory::Apis,
        ServerCategory::DevTools,
        ServerCategory::FileSystems,
        ServerCategory::Web,
        ServerCategory::AiMl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServerCategory::Databases => "Databases",
            ServerCategory::Apis => "APIs",
            ServerCategory::DevTools => "Dev Tools",
            ServerCategory::FileSystems => "File Systems",
            ServerCategory::Web => "Web",
            ServerCategory::AiMl => "AI / ML",
            ServerCategory::Other => "Other",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ServerCategory::Databases => &["postgres", "sqlite", "database", "db", "sql", "mongo"],
            ServerCategory::Apis => &["api", "rest", "graphql", "http"],
            ServerCategory::DevTools => &["git", "github", "docker", "kubernetes", "ci", "cd"],
            ServerCategory::FileSystems => &["file", "filesystem", "fs", "directory", "storage"],
            ServerCategory::Web => &["browser", "web", "html", "puppeteer", "selenium"],
            ServerCategory::AiMl => &["llm", "ai", "ml", "model", "openai", "anthropic"],
            ServerCategory::Other => &[],
        }
    }

    /// First category whose keyword appears in the name or description
    pub fn classify(server: &McpServer) -> Self {
        let text = format!("{} {}", server.name, server.description).to_lowercase();
        Self::MATCHED
            .into_iter()
            .find(|category| category.keywords().iter().any(|k| text.contains(k)))
            .unwrap_or(ServerCategory::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub category: ServerCategory,
    pub count: usize,
    /// First few servers in list order
    pub highlights: Vec<McpServer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogOverview {
    pub total: usize,
    /// Non-empty categories in precedence order, `Other` last
    pub categories: Vec<CatalogCategory>,
}

pub fn summarize_catalog(servers: &[McpServer]) -> CatalogOverview {
    let order = ServerCategory::MATCHED
        .into_iter()
        .chain(std::iter::once(ServerCategory::Other));

    let categories = order
        .filter_map(|category| {
            let members: Vec<&McpServer> = servers
                .iter()
                .filter(|s| ServerCategory::classify(s) == category)
                .collect();
            if members.is_empty() {
                return None;
            }
            Some(CatalogCategory {
                category,
                count: members.len(),
                highlights: members
                    .into_iter()
                    .take(CATALOG_HIGHLIGHTS)
                    .cloned()
                    .collect(),
            })
        })
        .collect();

    CatalogOverview {
        total: servers.len(),
        categories,
    }
}

/// Servers whose name or description mentions `keyword` (case-insensitive)
pub fn servers_matching(servers: &[McpServer], keyword: &str) -> Vec<McpServer> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Vec::new();
    }
    servers
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&keyword) || s.description.to_lowercase().contains(&keyword)
        })
        .cloned()
        .collect()
}

const AI_CATEGORIES: [&str; 3] = ["ai", "artificial-intelligence", "ml"];
const AI_PROJECT_HIGHLIGHTS: usize = 3;

/// Observations that span the tech and crypto halves of a briefing
///
/// `tech_sections` lists the sections that returned repositories;
/// `crypto_projects` is `None` when the crypto half is missing.
pub fn cross_sector_insights(
    tech_sections: &[TechSection],
    crypto_projects: Option<&[SocialProject]>,
) -> Vec<String> {
    let mut insights = Vec::new();

    if let (false, Some(projects)) = (tech_sections.is_empty(), crypto_projects) {
        let ai_projects: Vec<&SocialProject> = projects
            .iter()
            .filter(|p| {
                p.category
                    .as_deref()
                    .map(|c| AI_CATEGORIES.contains(&c.trim().to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();

        if !ai_projects.is_empty() {
            insights.push(
                "🤖💰 **AI x Crypto Convergence**: AI-focused crypto projects gaining mindshare"
                    .to_string(),
            );
            for project in ai_projects.iter().take(AI_PROJECT_HIGHLIGHTS) {
                insights.push(format!(
                    "   • **{}**: {:.1} mindshare",
                    project.name.as_deref().unwrap_or("Unknown"),
                    project.mindshare_score
                ));
            }
        }
    }

    if tech_sections.contains(&TechSection::Mcp) {
        insights.push(
            "🔗 **MCP Opportunity**: Model Context Protocol growth could enable crypto data integration"
                .to_string(),
        );
    }

    if tech_sections.contains(&TechSection::Agents) {
        insights.push(
            "🤖 **Agent x DeFi**: AI agent frameworks increasingly relevant for automated DeFi strategies"
                .to_string(),
        );
    }

    if insights.is_empty() {
        insights.push(
            "📈 **Multi-Sector Alpha**: Monitor both tech innovation and crypto narratives for a complete market picture"
                .to_string(),
        );
        insights.push(
            "🔄 **Cross-Pollination**: Technologies often migrate between sectors, so early tech trends may predict crypto developments"
                .to_string(),
        );
    }

    insights
}
