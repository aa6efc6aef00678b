use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use crate::models::{CategoryRule, CategoryRules, TagCasing};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Rule table built from `pricing` and validated while loading
    #[serde(skip)]
    rules: CategoryRules,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

impl PricingSettings {
    /// Validated rule table
    pub fn rule_table(&self) -> Result<CategoryRules, ConfigError> {
        let rules: HashMap<String, CategoryRule> = self
            .categories
            .iter()
            .map(|c| (c.name.clone(), c.to_rule()))
            .collect();

        CategoryRules::new(rules)
            .map_err(|e| ConfigError::Message(format!("pricing.categories: {}", e)))
    }
}

/// One category of the rule table
///
/// Names are stored as values rather than table keys so that their casing
/// survives every config source.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub depreciation_rate: f64,
    #[serde(default)]
    pub conditions: Vec<ConditionWeightConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionWeightConfig {
    pub name: String,
    pub weight: f64,
}

impl CategoryConfig {
    fn to_rule(&self) -> CategoryRule {
        CategoryRule {
            depreciation_rate: self.depreciation_rate,
            condition_weights: self
                .conditions
                .iter()
                .map(|c| (c.name.clone(), c.weight))
                .collect(),
        }
    }
}

fn default_categories() -> Vec<CategoryConfig> {
    let mut categories: Vec<CategoryConfig> = CategoryRules::standard()
        .into_inner()
        .into_iter()
        .map(|(name, rule)| CategoryConfig {
            name,
            depreciation_rate: rule.depreciation_rate,
            conditions: rule
                .condition_weights
                .into_iter()
                .map(|(name, weight)| ConditionWeightConfig { name, weight })
                .collect(),
        })
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    categories
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default)]
    pub tag_casing: TagCasing,
    #[serde(default = "default_feed_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_feed_limit")]
    pub max_limit: u16,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            tag_casing: TagCasing::default(),
            default_limit: default_feed_limit(),
            max_limit: default_max_feed_limit(),
        }
    }
}

fn default_feed_limit() -> u16 { 20 }
fn default_max_feed_limit() -> u16 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl LoggingSettings {
    /// Apply the `LOG_LEVEL` and `LOG_FORMAT` environment variables
    pub fn with_env_overrides(self) -> Self {
        self.overridden_by(
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("LOG_FORMAT").ok(),
        )
    }

    /// Unset or unrecognized overrides keep the configured value
    fn overridden_by(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = format.and_then(|f| f.parse().ok()) {
            self.format = format;
        }
        self
    }
}

/// Output format of the fmt subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    #[default]
    Compact,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(ConfigError::Message(format!("unknown log format: {}", other))),
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with UNITRADE_)
    ///
    /// The pricing rule table is validated before returning.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., UNITRADE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("UNITRADE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_database_url(settings)?;

        Self::from_config(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("UNITRADE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(settings)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let mut settings: Settings = config.try_deserialize()?;
        settings.rules = settings.pricing.rule_table()?;
        Ok(settings)
    }

    /// Pricing rule table validated at load time
    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }
}

/// DATABASE_URL takes precedence over the configured database URL
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}
