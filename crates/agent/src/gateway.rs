//! Language Model Gateway: the fail-soft boundary in front of the provider.
//!
//! Callers always get text back. Any provider failure is logged and
//! replaced with [`FALLBACK_RESPONSE`]; no retries are attempted.

use std::sync::Arc;
use routeclaw_core::message::{Message, estimated_tokens};
use routeclaw_core::provider::{Provider, ProviderRequest};
use tracing::{debug, error};

/// Returned in place of the model's reply when the call fails.
pub const FALLBACK_RESPONSE: &str = "Lo siento, hubo un error al procesar tu solicitud.";

pub struct LlmGateway {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Max tokens per response
    max_tokens: Option<u32>,
}

impl LlmGateway {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    /// Build a gateway from the model settings in config.
    pub fn from_config(provider: Arc<dyn Provider>, config: &routeclaw_config::AppConfig) -> Self {
        let gateway = Self::new(provider, &config.model, config.temperature);
        match config.max_tokens {
            Some(max) => gateway.with_max_tokens(max),
            None => gateway,
        }
    }

    /// Set the max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `messages` to the model and return its text.
    pub async fn get_response(&self, messages: &[Message]) -> String {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            provider = %self.provider.name(),
            model = %self.model,
            messages = messages.len(),
            est_tokens = estimated_tokens(messages),
            "Calling model"
        );

        match self.provider.complete(request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    debug!(total_tokens = usage.total_tokens, model = %response.model, "Model replied");
                }
                response.message.content
            }
            Err(e) => {
                error!(provider = %self.provider.name(), model = %self.model, error = %e, "LLM call failed");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }
}
