//! Shared test helpers for gateway and dispatcher tests.

use async_trait::async_trait;
use routeclaw_core::error::{ProviderError, ToolError};
use routeclaw_core::message::Message;
use routeclaw_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use routeclaw_core::retrieval::Retriever;
use routeclaw_core::routing::ToolArguments;
use routeclaw_core::tool::Tool;
use std::sync::Mutex;

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next response in the queue and
/// records the request. Panics if more calls are made than responses provided.
pub struct SequentialMockProvider {
    responses: Vec<ProviderResponse>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that replies with each text in turn.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| make_text_response(t)).collect())
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let index = requests.len();
        if index >= self.responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                index,
                self.responses.len()
            );
        }
        requests.push(request);
        Ok(self.responses[index].clone())
    }
}

/// A provider whose endpoint is always unreachable.
#[derive(Default)]
pub struct FailingProvider {
    calls: Mutex<usize>,
}

impl FailingProvider {
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing_mock"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        Err(ProviderError::Network("connection refused".into()))
    }
}

/// Create a simple text response.
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// A retriever that returns fixed text and records every query.
pub struct StubRetriever {
    context: String,
    queries: Mutex<Vec<(String, usize)>>,
}

impl StubRetriever {
    pub fn new(context: &str) -> Self {
        Self {
            context: context.to_string(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn retrieve_context(&self, query: &str, k: usize) -> String {
        self.queries.lock().unwrap().push((query.to_string(), k));
        self.context.clone()
    }
}

/// Joins its arguments as `key=value` pairs.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echoes back the arguments"
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        Ok(arguments
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(","))
    }
}

/// Always fails.
pub struct BrokenTool;

#[async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    async fn execute(&self, _arguments: &ToolArguments) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: "broken".into(),
            reason: "backend offline".into(),
        })
    }
}
