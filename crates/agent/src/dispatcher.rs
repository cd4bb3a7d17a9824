//! The routing agent: one query in, one annotated answer out.
//!
//! # Flow
//!
//! 1. **Routing**: persona + routing instruction → model → [`DecisionParser`]
//! 2. **Dispatch** on the decision:
//!    - retrieval tool → retrieve context for the topic → model answers from it
//!    - function tool → execute it and return its output
//!    - unknown tool → fixed "not found" text
//!    - no tool → model answers the raw question
//!
//! At most two model calls and one retrieval per query, strictly in order.
//! The agent holds no per-query state, so `&self` is enough and independent
//! queries can run concurrently.

use std::sync::Arc;
use routeclaw_config::AppConfig;
use routeclaw_core::message::Message;
use routeclaw_core::provider::Provider;
use routeclaw_core::retrieval::Retriever;
use routeclaw_core::routing::{DecisionParser, RoutingDecision, ToolArguments};
use routeclaw_core::tool::{ToolHandler, ToolRegistry};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::decision::JsonDecisionParser;
use crate::gateway::LlmGateway;
use crate::prompts;

/// Which branch answered a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// The model answered the question directly.
    Direct,
    /// A retrieval tool was chosen; the answer is grounded in retrieved context.
    Retrieval,
    /// A function tool was executed.
    Tool,
    /// The model named a tool that is not registered.
    ToolNotFound,
}

/// Everything that happened while answering one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryContext {
    pub user_input: String,
    pub decision: RoutingDecision,
    pub route: Route,
    /// Set only on the retrieval route; may be empty.
    pub retrieved_context: Option<String>,
    pub response: String,
}

pub struct RoutingAgent {
    gateway: LlmGateway,
    tools: Arc<ToolRegistry>,
    retriever: Arc<dyn Retriever>,
    parser: Box<dyn DecisionParser>,
    persona: String,
    top_k: usize,
}

impl RoutingAgent {
    pub fn new(gateway: LlmGateway, tools: Arc<ToolRegistry>, retriever: Arc<dyn Retriever>) -> Self {
        Self {
            gateway,
            tools,
            retriever,
            parser: Box::new(JsonDecisionParser),
            persona: prompts::SYSTEM_AGENT_PROMPT.to_string(),
            top_k: 1,
        }
    }

    /// Build an agent with the model, persona and `top_k` settings from config.
    pub fn from_config(
        provider: Arc<dyn Provider>,
        config: &AppConfig,
        tools: Arc<ToolRegistry>,
        retriever: Arc<dyn Retriever>,
    ) -> Self {
        let agent = Self::new(LlmGateway::from_config(provider, config), tools, retriever)
            .with_top_k(config.knowledge.top_k);
        match &config.agent.system_prompt {
            Some(persona) => agent.with_persona(persona.clone()),
            None => agent,
        }
    }

    /// Replace the persona sent as the system message.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Set how many passages a retrieval returns.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    /// Swap the routing parser (e.g. for a schema-constrained backend).
    pub fn with_parser(mut self, parser: Box<dyn DecisionParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Answer `user_input` and return the annotated response text.
    pub async fn process_query(&self, user_input: &str) -> String {
        self.run(user_input).await.response
    }

    /// Answer `user_input`, returning the full trace of the query.
    pub async fn run(&self, user_input: &str) -> QueryContext {
        info!(input = %user_input, "Processing query");

        let decision = self.decide(user_input).await;

        let (route, retrieved_context, response) = match &decision {
            RoutingDecision::NoTool => {
                info!("Agent (LLM): answering directly");
                (Route::Direct, None, self.answer_directly(user_input).await)
            }
            RoutingDecision::ToolCall { name, arguments } => {
                info!(tool = %name, arguments = ?arguments, "Agent (Tool): dispatching tool call");
                match self.tools.resolve(name) {
                    Some(ToolHandler::Retrieval { topic_argument }) => {
                        let (context, answer) = self
                            .answer_from_context(name, topic_argument, arguments, user_input)
                            .await;
                        (Route::Retrieval, Some(context), answer)
                    }
                    Some(ToolHandler::Function(tool)) => {
                        let output = match tool.execute(arguments).await {
                            Ok(output) => output,
                            Err(e) => {
                                warn!(tool = %name, error = %e, "Tool execution failed");
                                format!("Error al ejecutar la tool: {e}")
                            }
                        };
                        (Route::Tool, None, format!("{}{}", prompts::tool_marker(name), output))
                    }
                    None => {
                        warn!(tool = %name, known = ?self.tools.names(), "Model chose an unregistered tool");
                        (
                            Route::ToolNotFound,
                            None,
                            format!("{}{}", prompts::tool_marker(name), prompts::TOOL_NOT_FOUND),
                        )
                    }
                }
            }
        };

        QueryContext {
            user_input: user_input.to_string(),
            decision,
            route,
            retrieved_context,
            response,
        }
    }

    /// Ask the model whether a tool applies and parse its answer.
    pub async fn decide(&self, user_input: &str) -> RoutingDecision {
        let instruction =
            prompts::routing_instruction(user_input, &self.tools.descriptions_block());
        let messages = [Message::system(&self.persona), Message::user(instruction)];

        let raw = self.gateway.get_response(&messages).await;
        debug!(raw = %raw, "Routing model output");

        self.parser.parse(&raw)
    }

    async fn answer_from_context(
        &self,
        tool_name: &str,
        topic_argument: &str,
        arguments: &ToolArguments,
        user_input: &str,
    ) -> (String, String) {
        let query = arguments
            .get(topic_argument)
            .map(String::as_str)
            .unwrap_or(user_input);

        info!(query = %query, k = self.top_k, "Agent (RAG): retrieving context after tool call");
        let context = self.retriever.retrieve_context(query, self.top_k).await;
        if context.is_empty() {
            debug!("Agent (RAG): no context retrieved");
        }

        let system = prompts::rag_prompt(&self.persona, tool_name, user_input, &context);
        let messages = [Message::system(system), Message::user(user_input)];
        let answer = self.gateway.get_response(&messages).await;

        (context, format!("{}{}", prompts::RAG_MARKER, answer))
    }

    async fn answer_directly(&self, user_input: &str) -> String {
        let messages = [Message::system(&self.persona), Message::user(user_input)];
        let answer = self.gateway.get_response(&messages).await;
        format!("{}{}", prompts::DIRECT_MARKER, answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FALLBACK_RESPONSE;
    use crate::test_helpers::*;
    use routeclaw_core::message::Role;
    use routeclaw_core::tool::ToolDescriptor;

    const INFO_TOOL: &str = "info_empresa_contacto_filosofia";

    fn registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        registry.register_retrieval(ToolDescriptor::new(INFO_TOOL, "Información de la empresa"), "tema");
        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(BrokenTool));
        Arc::new(registry)
    }

    fn agent(
        provider: Arc<SequentialMockProvider>,
        retriever: Arc<StubRetriever>,
    ) -> RoutingAgent {
        RoutingAgent::new(LlmGateway::new(provider, "mock-model", 0.1), registry(), retriever)
    }

    #[tokio::test]
    async fn no_tool_answers_directly() {
        let provider = Arc::new(SequentialMockProvider::texts(&["NO_TOOL", "¡Hola! ¿Qué necesitas?"]));
        let retriever = Arc::new(StubRetriever::new("unused"));
        let agent = agent(provider.clone(), retriever.clone());

        let ctx = agent.run("Hola").await;

        assert_eq!(ctx.route, Route::Direct);
        assert_eq!(ctx.decision, RoutingDecision::NoTool);
        assert_eq!(ctx.response, "💡 Agente (LLM): ¡Hola! ¿Qué necesitas?");
        assert!(ctx.retrieved_context.is_none());
        assert!(retriever.queries().is_empty());

        // Exactly one direct conversation after the routing call
        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].messages,
            vec![Message::system(prompts::SYSTEM_AGENT_PROMPT), Message::user("Hola")]
        );
    }

    #[tokio::test]
    async fn routing_prompt_lists_tools_in_order() {
        let provider = Arc::new(SequentialMockProvider::texts(&["NO_TOOL", "ok"]));
        let agent = agent(provider.clone(), Arc::new(StubRetriever::new("")));
        agent.process_query("¿Cuál es la política de cancelación?").await;

        let routing = &provider.requests()[0].messages;
        assert_eq!(routing.len(), 2);
        assert_eq!(routing[0].role, Role::System);
        assert_eq!(routing[1].role, Role::User);
        assert!(routing[1].content.contains("'¿Cuál es la política de cancelación?'"));
        assert!(routing[1].content.contains(
            "- info_empresa_contacto_filosofia: Información de la empresa\n- echo: Echoes back the arguments\n- broken: Always fails"
        ));
    }

    #[tokio::test]
    async fn retrieval_tool_uses_topic_argument() {
        let provider = Arc::new(SequentialMockProvider::texts(&[
            r#"Claro, aquí está: {"tool_name": "info_empresa_contacto_filosofia", "tool_input": {"tema": "horario"}}"#,
            "El check-in es a las 15:00.",
        ]));
        let retriever = Arc::new(StubRetriever::new("Horario de Check-in: 15:00."));
        let agent = agent(provider.clone(), retriever.clone());

        let ctx = agent.run("¿A qué hora es el check-in?").await;

        assert_eq!(ctx.route, Route::Retrieval);
        assert_eq!(ctx.retrieved_context.as_deref(), Some("Horario de Check-in: 15:00."));
        assert_eq!(ctx.response, "💬 Agente (RAG, impulsado por Tool): El check-in es a las 15:00.");
        assert_eq!(retriever.queries(), vec![("horario".to_string(), 1)]);

        let answer = &provider.requests()[1].messages;
        assert!(answer[0].content.starts_with(prompts::SYSTEM_AGENT_PROMPT));
        assert!(answer[0].content.contains("Contexto: Horario de Check-in: 15:00."));
        assert!(answer[0].content.contains("'¿A qué hora es el check-in?'"));
        assert_eq!(answer[1], Message::user("¿A qué hora es el check-in?"));
    }

    #[tokio::test]
    async fn retrieval_falls_back_to_user_input_without_topic() {
        let provider = Arc::new(SequentialMockProvider::texts(&[
            r#"{"tool_name": "info_empresa_contacto_filosofia", "tool_input": {}}"#,
            "respuesta",
        ]));
        let retriever = Arc::new(StubRetriever::new(""));
        let agent = agent(provider, retriever.clone()).with_top_k(2);

        let ctx = agent.run("¿Cuál es la política de cancelación?").await;

        assert_eq!(
            retriever.queries(),
            vec![("¿Cuál es la política de cancelación?".to_string(), 2)]
        );
        // Empty context is not an error
        assert_eq!(ctx.retrieved_context.as_deref(), Some(""));
        assert_eq!(ctx.route, Route::Retrieval);
    }

    #[tokio::test]
    async fn function_tool_is_executed_without_second_model_call() {
        let provider = Arc::new(SequentialMockProvider::texts(&[
            r#"{"tool_name": "echo", "tool_input": {"noches": "2", "tipo": "domo"}}"#,
        ]));
        let agent = agent(provider.clone(), Arc::new(StubRetriever::new("")));

        let ctx = agent.run("Reserva un domo por dos noches").await;

        assert_eq!(ctx.route, Route::Tool);
        assert_eq!(ctx.response, "✅ Respuesta de la Tool (echo): noches=2,tipo=domo");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn tool_failure_becomes_text() {
        let provider = Arc::new(SequentialMockProvider::texts(&[
            r#"{"tool_name": "broken", "tool_input": {}}"#,
        ]));
        let agent = agent(provider, Arc::new(StubRetriever::new("")));

        let ctx = agent.run("rompe algo").await;

        assert_eq!(ctx.route, Route::Tool);
        assert!(ctx.response.starts_with("✅ Respuesta de la Tool (broken): Error al ejecutar la tool"));
        assert!(ctx.response.contains("backend offline"));
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let provider = Arc::new(SequentialMockProvider::texts(&[
            r#"{"tool_name": "reservar_hotel", "tool_input": {"ciudad": "Lima"}}"#,
        ]));
        let retriever = Arc::new(StubRetriever::new(""));
        let agent = agent(provider.clone(), retriever.clone());

        let ctx = agent.run("Resérvame un hotel").await;

        assert_eq!(ctx.route, Route::ToolNotFound);
        assert_eq!(ctx.response, "✅ Respuesta de la Tool (reservar_hotel): Tool no encontrada.");
        assert_eq!(provider.call_count(), 1);
        assert!(retriever.queries().is_empty());
    }

    #[tokio::test]
    async fn malformed_routing_output_answers_directly() {
        let provider = Arc::new(SequentialMockProvider::texts(&[
            r#"Usaré la tool {"tool_name": "echo", "tool_input": "#,
            "Respuesta directa",
        ]));
        let agent = agent(provider, Arc::new(StubRetriever::new("")));

        let ctx = agent.run("¿Qué es el glamping?").await;

        assert_eq!(ctx.route, Route::Direct);
        assert_eq!(ctx.response, "💡 Agente (LLM): Respuesta directa");
    }

    #[tokio::test]
    async fn transport_failure_completes_query() {
        let provider = Arc::new(FailingProvider::default());
        let agent = RoutingAgent::new(
            LlmGateway::new(provider.clone(), "mock-model", 0.1),
            registry(),
            Arc::new(StubRetriever::new("")),
        );

        let response = agent.process_query("Hola").await;

        // The fallback text routes as NoTool, then the direct answer fails too.
        assert_eq!(response, format!("💡 Agente (LLM): {FALLBACK_RESPONSE}"));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn custom_persona_is_used_everywhere() {
        let provider = Arc::new(SequentialMockProvider::texts(&["NO_TOOL", "ok"]));
        let agent = agent(provider.clone(), Arc::new(StubRetriever::new("")))
            .with_persona("Eres el conserje del campamento.");
        agent.process_query("Hola").await;

        for request in provider.requests() {
            assert_eq!(request.messages[0], Message::system("Eres el conserje del campamento."));
        }
    }

    #[tokio::test]
    async fn from_config_applies_persona_and_top_k() {
        let mut config = AppConfig::default();
        config.agent.system_prompt = Some("Conserje.".into());
        config.knowledge.top_k = 3;

        let provider = Arc::new(SequentialMockProvider::texts(&[
            r#"{"tool_name": "info_empresa_contacto_filosofia", "tool_input": {"tema": "contacto"}}"#,
            "ok",
        ]));
        let retriever = Arc::new(StubRetriever::new("ctx"));
        let agent = RoutingAgent::from_config(provider.clone(), &config, registry(), retriever.clone());

        agent.process_query("¿Cómo los contacto?").await;

        assert_eq!(retriever.queries(), vec![("contacto".to_string(), 3)]);
        let requests = provider.requests();
        assert_eq!(requests[0].messages[0], Message::system("Conserje."));
        assert_eq!(requests[0].model, config.model);
        assert!(requests[1].messages[0].content.starts_with("Conserje.\n\n"));
    }

    struct AlwaysEcho;

    impl DecisionParser for AlwaysEcho {
        fn parse(&self, _raw_text: &str) -> RoutingDecision {
            RoutingDecision::tool_call("echo", ToolArguments::new())
        }
    }

    #[tokio::test]
    async fn parser_can_be_swapped() {
        let provider = Arc::new(SequentialMockProvider::texts(&["NO_TOOL"]));
        let agent = agent(provider, Arc::new(StubRetriever::new("")))
            .with_parser(Box::new(AlwaysEcho));

        let ctx = agent.run("Hola").await;
        assert_eq!(ctx.route, Route::Tool);
    }

    #[tokio::test]
    async fn query_context_serializes() {
        let provider = Arc::new(SequentialMockProvider::texts(&["NO_TOOL", "ok"]));
        let agent = agent(provider, Arc::new(StubRetriever::new("")));
        let ctx = agent.run("Hola").await;
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["route"], "direct");
        assert_eq!(json["decision"]["decision"], "no_tool");
    }
}
