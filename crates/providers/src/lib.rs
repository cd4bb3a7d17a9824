//! LLM Provider implementations for RouteClaw.
//!
//! All providers implement the `routeclaw_core::Provider` trait.
//! [`build_from_config`] selects the endpoint based on configuration.

pub mod openai_compat;
pub mod router;

pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
