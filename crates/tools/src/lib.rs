//! Built-in tool implementations for RouteClaw.
//!
//! [`default_registry`] registers the built-in tools, marking the ones named
//! in `agent.retrieval_tools` as retrieval-triggering.

pub mod company_info;

use std::sync::Arc;
use routeclaw_config::AppConfig;
use routeclaw_core::tool::{Tool, ToolRegistry};

pub use company_info::{COMPANY_INFO_TOOL, CompanyInfoTool};

/// All built-in tools.
pub fn builtin_tools(config: &AppConfig) -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(CompanyInfoTool::new(config.company.clone()))]
}

/// Create the tool registry for `config`.
pub fn default_registry(config: &AppConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in builtin_tools(config) {
        register_tool(&mut registry, config, tool);
    }
    registry
}

/// Register `tool`, as a retrieval tool if config says so.
pub fn register_tool(registry: &mut ToolRegistry, config: &AppConfig, tool: Arc<dyn Tool>) {
    if config.agent.retrieval_tools.iter().any(|n| n == tool.name()) {
        registry.register_retrieval(tool.descriptor(), &config.agent.topic_argument);
    } else {
        registry.register(tool);
    }
}
