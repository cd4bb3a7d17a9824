//! Retriever trait: best-effort context lookup over a fixed corpus.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A piece of a corpus document, produced once at startup by the splitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub text: String,
}

impl DocumentChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Returns the top-`k` passages relevant to a query.
///
/// The result is the passages' text joined by `\n` in descending relevance.
/// An empty corpus (or a failed lookup) yields an empty string; callers
/// treat that as "no context", not as an error.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve_context(&self, query: &str, k: usize) -> String;
}
