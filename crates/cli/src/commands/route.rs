//! `routeclaw route`: Show the routing decision for a message.

use std::path::Path;

use routeclaw_core::routing::RoutingDecision;
use routeclaw_core::tool::{ToolHandler, ToolRegistry};

use crate::runtime::{CliResult, Runtime};

pub async fn run(config_path: Option<&Path>, text: &str) -> CliResult<()> {
    let runtime = Runtime::start(config_path).await?;
    let decision = runtime.agent.decide(text).await;

    println!("{}", describe(&decision, &runtime.tools));
    println!("{}", serde_json::to_string_pretty(&decision)?);

    Ok(())
}

/// One-line summary of where `decision` would send the query.
fn describe(decision: &RoutingDecision, tools: &ToolRegistry) -> String {
    match decision {
        RoutingDecision::NoTool => "→ direct answer (NO_TOOL)".to_string(),
        RoutingDecision::ToolCall { name, .. } => match tools.resolve(name) {
            Some(ToolHandler::Retrieval { topic_argument }) => {
                format!("→ retrieval via '{name}' (topic argument '{topic_argument}')")
            }
            Some(ToolHandler::Function(_)) => format!("→ tool '{name}'"),
            None => format!("→ unknown tool '{name}'"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeclaw_core::routing::ToolArguments;
    use routeclaw_core::tool::ToolDescriptor;

    #[test]
    fn describes_each_route() {
        let mut tools = ToolRegistry::new();
        tools.register_retrieval(ToolDescriptor::new("info", "Company info"), "tema");

        assert_eq!(describe(&RoutingDecision::NoTool, &tools), "→ direct answer (NO_TOOL)");
        assert_eq!(
            describe(&RoutingDecision::tool_call("info", ToolArguments::new()), &tools),
            "→ retrieval via 'info' (topic argument 'tema')"
        );
        assert_eq!(
            describe(&RoutingDecision::tool_call("nope", ToolArguments::new()), &tools),
            "→ unknown tool 'nope'"
        );
    }
}
