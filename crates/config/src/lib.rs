//! Configuration loading, validation, and management for RouteClaw.
//!
//! Loads configuration from `~/.routeclaw/config.toml` with environment
//! variable overrides. Everything is read once at startup; the agent never
//! re-reads configuration while serving queries.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.routeclaw/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the model endpoint (Ollama ignores it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// LLM provider: "ollama", "openai", "openrouter" or "custom"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Base URL override for the provider endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per LLM response (unset = provider default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// HTTP timeout for each model call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Agent (routing and dispatch) settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Knowledge base (retrieval) settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Company profile served by the company-info tool
    #[serde(default)]
    pub company: CompanyConfig,
}

fn default_provider() -> String {
    "ollama".into()
}
fn default_model() -> String {
    "llama3".into()
}
fn default_temperature() -> f32 {
    0.1
}
fn default_request_timeout_secs() -> u64 {
    120
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("agent", &self.agent)
            .field("knowledge", &self.knowledge)
            .field("company", &self.company)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Replaces the built-in persona prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Tools answered through retrieval instead of being executed
    #[serde(default = "default_retrieval_tools")]
    pub retrieval_tools: Vec<String>,

    /// Argument holding the retrieval topic
    #[serde(default = "default_topic_argument")]
    pub topic_argument: String,
}

fn default_retrieval_tools() -> Vec<String> {
    vec!["info_empresa_contacto_filosofia".into()]
}
fn default_topic_argument() -> String {
    "tema".into()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            retrieval_tools: default_retrieval_tools(),
            topic_argument: default_topic_argument(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// "local" (hashing embedder) or "provider" (endpoint embeddings)
    #[serde(default = "default_embedding_provider")]
    pub embedding_provider: String,

    /// Model used when `embedding_provider = "provider"`
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Vector size of the local embedder
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub chunk_overlap: usize,

    #[serde(default = "default_separator")]
    pub separator: String,

    /// Passages returned per retrieval
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Index the built-in sample passages
    #[serde(default = "default_true")]
    pub include_samples: bool,

    /// Extra passages, inline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,

    /// Extra passages, one document per file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<PathBuf>,
}

fn default_embedding_provider() -> String {
    "local".into()
}
fn default_embedding_model() -> String {
    "nomic-embed-text".into()
}
fn default_embedding_dimensions() -> usize {
    1024
}
fn default_chunk_size() -> usize {
    1000
}
fn default_separator() -> String {
    "\n\n".into()
}
fn default_top_k() -> usize {
    1
}
fn default_true() -> bool {
    true
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            embedding_provider: default_embedding_provider(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            chunk_size: default_chunk_size(),
            chunk_overlap: 0,
            separator: default_separator(),
            top_k: default_top_k(),
            include_samples: true,
            documents: vec![],
            paths: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    #[serde(default = "default_company_name")]
    pub name: String,

    #[serde(default = "default_philosophy")]
    pub philosophy: String,

    #[serde(default = "default_history")]
    pub history: String,

    #[serde(default = "default_contact")]
    pub contact: String,
}

fn default_company_name() -> String {
    "Glamping Andino".into()
}
fn default_philosophy() -> String {
    "Creemos en un turismo de bajo impacto: alojamientos sostenibles, integrados en el paisaje y gestionados con comunidades locales.".into()
}
fn default_history() -> String {
    "Fundada en 2016 con tres domos junto a un lago, hoy operamos campamentos de glamping en cinco reservas naturales.".into()
}
fn default_contact() -> String {
    "Correo: reservas@glampingandino.com · Teléfono: +56 2 2345 6789 · Atención de lunes a viernes, de 9:00 a 18:00.".into()
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            philosophy: default_philosophy(),
            history: default_history(),
            contact: default_contact(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.routeclaw/config.toml).
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load configuration from `path`, then apply environment overrides:
    /// - `ROUTECLAW_API_KEY`, `OPENAI_API_KEY`, `OPENROUTER_API_KEY` (in that order)
    /// - `ROUTECLAW_PROVIDER`, `ROUTECLAW_MODEL`, `ROUTECLAW_BASE_URL`
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api_key.is_none() {
            self.api_key = lookup("ROUTECLAW_API_KEY")
                .or_else(|| lookup("OPENAI_API_KEY"))
                .or_else(|| lookup("OPENROUTER_API_KEY"));
        }
        if let Some(provider) = lookup("ROUTECLAW_PROVIDER") {
            self.provider = provider;
        }
        if let Some(model) = lookup("ROUTECLAW_MODEL") {
            self.model = model;
        }
        if let Some(url) = lookup("ROUTECLAW_BASE_URL") {
            self.base_url = Some(url);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".routeclaw")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        let k = &self.knowledge;
        if k.chunk_size == 0 {
            return Err(ConfigError::ValidationError("knowledge.chunk_size must be > 0".into()));
        }
        if k.chunk_overlap >= k.chunk_size {
            return Err(ConfigError::ValidationError(
                "knowledge.chunk_overlap must be smaller than knowledge.chunk_size".into(),
            ));
        }
        if k.top_k == 0 {
            return Err(ConfigError::ValidationError("knowledge.top_k must be >= 1".into()));
        }
        if k.embedding_dimensions == 0 {
            return Err(ConfigError::ValidationError(
                "knowledge.embedding_dimensions must be > 0".into(),
            ));
        }
        if !matches!(k.embedding_provider.as_str(), "local" | "provider") {
            return Err(ConfigError::ValidationError(format!(
                "knowledge.embedding_provider must be \"local\" or \"provider\", got \"{}\"",
                k.embedding_provider
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            base_url: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            request_timeout_secs: default_request_timeout_secs(),
            agent: AgentConfig::default(),
            knowledge: KnowledgeConfig::default(),
            company: CompanyConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
