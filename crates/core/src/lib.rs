//! # RouteClaw Core
//!
//! Domain types, traits, and error definitions for the RouteClaw query router.
//! This crate has **no framework dependencies**: it defines the domain model
//! that the provider, knowledge, tools and agent crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator of the dispatcher is a trait here:
//! - [`Provider`] talks to a language model
//! - [`Retriever`] returns context passages for a query
//! - [`Tool`] is a callable capability
//! - [`DecisionParser`] turns raw model text into a [`RoutingDecision`]
//!
//! Implementations live in their respective crates, so tests can swap in
//! scripted substitutes for any of them.

pub mod error;
pub mod message;
pub mod provider;
pub mod retrieval;
pub mod routing;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{KnowledgeError, ProviderError, ToolError};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
pub use retrieval::{DocumentChunk, Retriever};
pub use routing::{DecisionParser, RoutingDecision, ToolArguments};
pub use tool::{Tool, ToolDescriptor, ToolHandler, ToolRegistry};
