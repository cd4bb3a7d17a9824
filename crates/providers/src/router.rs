//! Provider selection: builds the configured LLM provider.

use std::sync::Arc;
use std::time::Duration;
use routeclaw_core::error::ProviderError;
use routeclaw_core::provider::Provider;
use tracing::info;
use crate::openai_compat::OpenAiCompatProvider;

/// Build the provider named in configuration.
///
/// Every supported backend speaks the OpenAI-compatible protocol; only the
/// base URL and key differ.
pub fn build_from_config(
    config: &routeclaw_config::AppConfig,
) -> Result<Arc<dyn Provider>, ProviderError> {
    let base_url = config
        .base_url
        .clone()
        .map(Ok)
        .unwrap_or_else(|| default_base_url(&config.provider))?;

    let api_key = match (&config.api_key, config.provider.as_str()) {
        (Some(key), _) => key.clone(),
        (None, "ollama" | "vllm" | "llamacpp" | "llama.cpp" | "custom") => String::new(),
        (None, other) => {
            return Err(ProviderError::NotConfigured(format!(
                "Provider '{other}' requires an API key (set ROUTECLAW_API_KEY)"
            )));
        }
    };

    info!(provider = %config.provider, base_url = %base_url, model = %config.model, "Building provider");

    let provider = OpenAiCompatProvider::new(
        &config.provider,
        base_url,
        api_key,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    Ok(Arc::new(provider))
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> Result<String, ProviderError> {
    let url = match provider_name {
        "ollama" => "http://localhost:11434/v1",
        "openai" => "https://api.openai.com/v1",
        "openrouter" => "https://openrouter.ai/api/v1",
        "groq" => "https://api.groq.com/openai/v1",
        "vllm" => "http://localhost:8000/v1",
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1",
        other => {
            return Err(ProviderError::NotConfigured(format!(
                "Unknown provider '{other}': set base_url in config"
            )));
        }
    };
    Ok(url.to_string())
}
