//! The RouteClaw routing agent.
//!
//! Each utterance first goes through a routing step: the model is asked
//! whether a registered tool applies. Its answer, not a hardcoded rule,
//! picks one of three paths:
//!
//! 1. **Tool**: execute a function tool
//! 2. **RAG**: retrieve context for a retrieval tool and answer from it
//! 3. **Direct**: let the model answer on its own
//!
//! Every path ends in response text; no per-query failure escapes.

pub mod decision;
pub mod dispatcher;
pub mod gateway;
pub mod prompts;

pub use decision::JsonDecisionParser;
pub use dispatcher::{QueryContext, Route, RoutingAgent};
pub use gateway::{FALLBACK_RESPONSE, LlmGateway};

#[cfg(test)]
pub(crate) mod test_helpers;
