use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::application::services::{
    BoilerplatePatternError, BoilerplateRules, ChunkingConfig, DEFAULT_CONCURRENCY,
    DEFAULT_FOOTER_PATTERNS, DEFAULT_HEADER_PATTERNS, DEFAULT_LONG_SECTION_THRESHOLD,
    DEFAULT_MAX_SEARCH_PAGES, DEFAULT_MAX_SUBSECTION_LEVEL, DEFAULT_MIN_CONTENT_LENGTH,
    DEFAULT_PROCESSING_TIMEOUT, DEFAULT_TOKEN_ESTIMATE_DIVISOR, TokenBudget,
};
use crate::domain::ChunkOrder;
use crate::infrastructure::observability::DEFAULT_LOG_FILTER;

use super::Environment;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";
const LIST_SEPARATOR: &str = ";";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub boilerplate: BoilerplateSettings,
    pub ingestion: IngestionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub max_search_pages: u32,
    pub long_section_threshold: u32,
    pub page_offset: i64,
    pub total_document_pages: Option<u32>,
    pub max_subsection_level: usize,
    pub max_tokens: usize,
    pub min_tokens: usize,
    pub overlap_tokens: usize,
    pub token_estimate_divisor: usize,
    pub chunk_order: ChunkOrder,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        let budget = TokenBudget::default();
        Self {
            max_search_pages: DEFAULT_MAX_SEARCH_PAGES,
            long_section_threshold: DEFAULT_LONG_SECTION_THRESHOLD,
            page_offset: 0,
            total_document_pages: None,
            max_subsection_level: DEFAULT_MAX_SUBSECTION_LEVEL,
            max_tokens: budget.max_tokens,
            min_tokens: budget.min_tokens,
            overlap_tokens: budget.overlap_tokens,
            token_estimate_divisor: DEFAULT_TOKEN_ESTIMATE_DIVISOR,
            chunk_order: ChunkOrder::default(),
        }
    }
}

/// Regex sources for running headers and footers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoilerplateSettings {
    pub header_patterns: Vec<String>,
    pub footer_patterns: Vec<String>,
}

impl Default for BoilerplateSettings {
    fn default() -> Self {
        Self {
            header_patterns: DEFAULT_HEADER_PATTERNS.iter().map(|p| p.to_string()).collect(),
            footer_patterns: DEFAULT_FOOTER_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    pub min_content_length: usize,
    pub concurrency: usize,
    pub processing_timeout_secs: u64,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
            concurrency: DEFAULT_CONCURRENCY,
            processing_timeout_secs: DEFAULT_PROCESSING_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_FILTER.to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Boilerplate(#[from] BoilerplatePatternError),
}

impl Settings {
    /// Layers `appsettings.{environment}` (optional) under `APP__*` variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(LIST_SEPARATOR)
                    .with_list_parse_key("boilerplate.header_patterns")
                    .with_list_parse_key("boilerplate.footer_patterns"),
            )
            .build()?;

        Self::from_config(configuration)
    }

    pub fn from_config(configuration: Config) -> Result<Self, SettingsError> {
        Ok(configuration.try_deserialize()?)
    }

    pub fn chunking_config(&self) -> Result<ChunkingConfig, SettingsError> {
        ChunkingConfig::try_from(self)
    }
}

impl TryFrom<&Settings> for ChunkingConfig {
    type Error = SettingsError;

    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        let chunking = &settings.chunking;
        let boilerplate = BoilerplateRules::from_patterns(
            settings.boilerplate.header_patterns.as_slice(),
            settings.boilerplate.footer_patterns.as_slice(),
        )?;

        Ok(Self {
            max_search_pages: chunking.max_search_pages,
            long_section_threshold: chunking.long_section_threshold,
            page_offset: chunking.page_offset,
            total_document_pages: chunking.total_document_pages,
            max_subsection_level: chunking.max_subsection_level,
            token_budget: TokenBudget {
                max_tokens: chunking.max_tokens,
                min_tokens: chunking.min_tokens,
                overlap_tokens: chunking.overlap_tokens,
                estimate_divisor: chunking.token_estimate_divisor,
            },
            chunk_order: chunking.chunk_order,
            concurrency: settings.ingestion.concurrency,
            processing_timeout: Duration::from_secs(settings.ingestion.processing_timeout_secs),
            boilerplate,
        })
    }
}
