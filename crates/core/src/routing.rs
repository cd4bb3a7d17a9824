//! Routing decisions: the structured outcome of asking the model
//! whether (and which) tool applies to a query.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tool arguments as produced by the routing model: parameter name → value.
pub type ToolArguments = BTreeMap<String, String>;

/// What the dispatcher should do with a query.
///
/// Produced exactly once per query and never mutated. A `ToolCall` always
/// carries a non-empty name; parsers degrade to `NoTool` rather than build
/// one without.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Answer directly with the model.
    NoTool,
    /// Invoke the named tool with these arguments.
    ToolCall {
        name: String,
        arguments: ToolArguments,
    },
}

impl RoutingDecision {
    /// Build a tool call decision. Returns `NoTool` when `name` is blank.
    pub fn tool_call(name: impl Into<String>, arguments: ToolArguments) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            return Self::NoTool;
        }
        Self::ToolCall { name, arguments }
    }
}

/// Turns raw routing-model text into a [`RoutingDecision`].
///
/// Implementations must be total: every input yields a decision and no
/// failure escapes. The JSON heuristic lives behind this trait so it can be
/// replaced by a schema-constrained contract when the backend supports one.
pub trait DecisionParser: Send + Sync {
    fn parse(&self, raw_text: &str) -> RoutingDecision;
}
