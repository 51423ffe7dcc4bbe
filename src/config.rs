use std::env;
use std::time::Duration;

pub const DEFAULT_MONI_BASE_URL: &str = "https://api.discover.getmoni.io/api/v3";
pub const DEFAULT_DEFILLAMA_BASE_URL: &str = "https://api.llama.fi";
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_MCP_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/punkpeye/awesome-mcp-servers/main/README.md";

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaConfig {
    /// Social source is disabled when absent
    pub moni_api_key: Option<String>,
    pub moni_base_url: String,
    pub defillama_base_url: String,
    pub coingecko_base_url: String,
    pub coingecko_api_key: Option<String>,
    /// Anonymous GitHub search when absent (lower upstream quota)
    pub github_token: Option<String>,
    pub github_base_url: String,
    /// Full URL of the MCP server list (markdown)
    pub mcp_catalog_url: String,
    pub request_timeout: Duration,
    pub moni_requests_per_minute: u32,
    pub defillama_requests_per_minute: u32,
    pub coingecko_requests_per_minute: u32,
    pub github_requests_per_minute: u32,
    pub rust_log: String,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            moni_api_key: None,
            moni_base_url: DEFAULT_MONI_BASE_URL.to_string(),
            defillama_base_url: DEFAULT_DEFILLAMA_BASE_URL.to_string(),
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            coingecko_api_key: None,
            github_token: None,
            github_base_url: DEFAULT_GITHUB_BASE_URL.to_string(),
            mcp_catalog_url: DEFAULT_MCP_CATALOG_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            moni_requests_per_minute: 60,
            defillama_requests_per_minute: 120,
            coingecko_requests_per_minute: 25,
            github_requests_per_minute: 10,
            rust_log: "info".to_string(),
        }
    }
}

impl AlphaConfig {
    /// Load configuration from the process environment
    ///
    /// Call `dotenv::dotenv().ok()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let moni_base_url = url_var("MONI_BASE_URL", get("MONI_BASE_URL"), defaults.moni_base_url)?;
        let defillama_base_url = url_var(
            "DEFILLAMA_BASE_URL",
            get("DEFILLAMA_BASE_URL"),
            defaults.defillama_base_url,
        )?;
        let coingecko_base_url = url_var(
            "COINGECKO_BASE_URL",
            get("COINGECKO_BASE_URL"),
            defaults.coingecko_base_url,
        )?;

        let github_base_url = url_var(
            "GITHUB_BASE_URL",
            get("GITHUB_BASE_URL"),
            defaults.github_base_url,
        )?;
        let mcp_catalog_url = url_var(
            "MCP_CATALOG_URL",
            get("MCP_CATALOG_URL"),
            defaults.mcp_catalog_url,
        )?;

        let timeout_secs: u64 = number_var("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 30)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            moni_api_key: get("MONI_API_KEY"),
            moni_base_url,
            defillama_base_url,
            coingecko_base_url,
            coingecko_api_key: get("COINGECKO_API_KEY"),
            github_token: get("GITHUB_TOKEN"),
            github_base_url,
            mcp_catalog_url,
            request_timeout: Duration::from_secs(timeout_secs),
            moni_requests_per_minute: number_var(
                "MONI_REQUESTS_PER_MINUTE",
                get("MONI_REQUESTS_PER_MINUTE"),
                defaults.moni_requests_per_minute,
            )?,
            defillama_requests_per_minute: number_var(
                "DEFILLAMA_REQUESTS_PER_MINUTE",
                get("DEFILLAMA_REQUESTS_PER_MINUTE"),
                defaults.defillama_requests_per_minute,
            )?,
            coingecko_requests_per_minute: number_var(
                "COINGECKO_REQUESTS_PER_MINUTE",
                get("COINGECKO_REQUESTS_PER_MINUTE"),
                defaults.coingecko_requests_per_minute,
            )?,
            github_requests_per_minute: number_var(
                "GITHUB_REQUESTS_PER_MINUTE",
                get("GITHUB_REQUESTS_PER_MINUTE"),
                defaults.github_requests_per_minute,
            )?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn social_enabled(&self) -> bool {
        self.moni_api_key.is_some()
    }

    pub fn github_authenticated(&self) -> bool {
        self.github_token.is_some()
    }
}

fn url_var(name: &str, value: Option<String>, default: String) -> Result<String, ConfigError> {
    let url = value.unwrap_or(default);
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidValue(format!(
            "{} must start with http:// or https://",
            name
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn number_var<T: std::str::FromStr>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("{} must be a non-negative integer, got '{}'", name, raw))),
    }
}
