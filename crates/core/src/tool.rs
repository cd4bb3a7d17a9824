//! Tool trait and registry: the capabilities the dispatcher can route to.
//!
//! A tool is registered under a unique name with one of two handlers:
//! - [`ToolHandler::Retrieval`]: the dispatcher answers with retrieved
//!   context instead of calling a function
//! - [`ToolHandler::Function`]: the dispatcher executes the tool and returns
//!   its output
//!
//! The registry is built once at startup and is read-only afterwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use crate::error::ToolError;
use crate::routing::ToolArguments;

/// Name and description of a tool, as shown to the routing model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique key in the registry
    pub name: String,

    /// What the tool is for (sent to the LLM)
    pub description: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The core Tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "info_empresa_contacto_filosofia").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// Execute the tool with the argument mapping from the routing decision.
    async fn execute(&self, arguments: &ToolArguments) -> std::result::Result<String, ToolError>;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.name(), self.description())
    }
}

/// How the dispatcher serves a registered tool.
#[derive(Clone)]
pub enum ToolHandler {
    /// Answer from retrieved context; the topic is read from `topic_argument`.
    Retrieval { topic_argument: String },
    /// Execute the tool and return its output.
    Function(Arc<dyn Tool>),
}

impl std::fmt::Debug for ToolHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retrieval { topic_argument } => f
                .debug_struct("Retrieval")
                .field("topic_argument", topic_argument)
                .finish(),
            Self::Function(tool) => f.debug_tuple("Function").field(&tool.name()).finish(),
        }
    }
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

/// A registry of available tools, in registration order.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a function tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let descriptor = tool.descriptor();
        self.insert(descriptor, ToolHandler::Function(tool));
    }

    /// Register a retrieval-triggering tool.
    pub fn register_retrieval(&mut self, descriptor: ToolDescriptor, topic_argument: impl Into<String>) {
        self.insert(
            descriptor,
            ToolHandler::Retrieval {
                topic_argument: topic_argument.into(),
            },
        );
    }

    fn insert(&mut self, descriptor: ToolDescriptor, handler: ToolHandler) {
        debug!(tool = %descriptor.name, handler = ?handler, "Registering tool");
        let entry = RegisteredTool { descriptor, handler };
        match self.index.get(&entry.descriptor.name) {
            Some(&i) => self.tools[i] = entry,
            None => {
                self.index.insert(entry.descriptor.name.clone(), self.tools.len());
                self.tools.push(entry);
            }
        }
    }

    /// Look up how a tool should be handled.
    pub fn resolve(&self, name: &str) -> Option<&ToolHandler> {
        self.index.get(name).map(|&i| &self.tools[i].handler)
    }

    /// One `- name: description` line per tool, for the routing prompt.
    pub fn descriptions_block(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- {}: {}", t.descriptor.name, t.descriptor.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
