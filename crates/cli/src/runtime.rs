//! Startup wiring: config → provider → knowledge index → tools → agent.
//!
//! Everything is built once and passed by reference; nothing here is global.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use routeclaw_agent::RoutingAgent;
use routeclaw_config::AppConfig;
use routeclaw_core::provider::Provider;
use routeclaw_core::tool::ToolRegistry;
use routeclaw_knowledge::DocumentIndex;
use tracing::info;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// The config file in use: `--config` if given, else the default location.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

pub fn load_config(explicit: Option<&Path>) -> CliResult<AppConfig> {
    let path = config_path(explicit);
    AppConfig::load_with_env(&path).map_err(|e| format!("Failed to load config: {e}").into())
}

pub fn build_provider(config: &AppConfig) -> CliResult<Arc<dyn Provider>> {
    routeclaw_providers::build_from_config(config).map_err(|e| {
        format!(
            "Failed to create provider '{}': {e}. Set ROUTECLAW_API_KEY or add api_key to {}",
            config.provider,
            AppConfig::config_dir().join("config.toml").display()
        )
        .into()
    })
}

pub async fn build_index(config: &AppConfig, provider: Arc<dyn Provider>) -> CliResult<DocumentIndex> {
    let index = routeclaw_knowledge::build_index(&config.knowledge, provider)
        .await
        .map_err(|e| format!("Failed to build knowledge index: {e}"))?;
    info!(chunks = index.len(), "Knowledge index ready");
    Ok(index)
}

/// Fully wired process state.
pub struct Runtime {
    pub config: AppConfig,
    pub tools: Arc<ToolRegistry>,
    pub index: Arc<DocumentIndex>,
    pub agent: RoutingAgent,
}

impl Runtime {
    pub async fn start(explicit: Option<&Path>) -> CliResult<Self> {
        Self::from_config(load_config(explicit)?).await
    }

    /// Wire everything from an already-loaded config.
    pub async fn from_config(config: AppConfig) -> CliResult<Self> {
        let provider = build_provider(&config)?;
        let index = Arc::new(build_index(&config, provider.clone()).await?);
        let tools = Arc::new(routeclaw_tools::default_registry(&config));

        let agent = RoutingAgent::from_config(provider, &config, tools.clone(), index.clone());

        Ok(Self {
            config,
            tools,
            index,
            agent,
        })
    }
}
