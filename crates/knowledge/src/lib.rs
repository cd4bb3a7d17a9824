//! Knowledge base for RouteClaw: the Context Retriever.
//!
//! Startup pipeline: corpus → [`CharacterTextSplitter`] → [`Embedder`] →
//! [`DocumentIndex`]. The index implements `routeclaw_core::Retriever`.

pub mod corpus;
pub mod embedding;
pub mod index;
pub mod splitter;
pub mod vector;

use std::sync::Arc;
use routeclaw_config::KnowledgeConfig;
use routeclaw_core::error::KnowledgeError;
use routeclaw_core::provider::Provider;

pub use corpus::{SAMPLE_DOCUMENTS, load_corpus};
pub use embedding::{Embedder, HashingEmbedder, ProviderEmbedder};
pub use index::{DocumentIndex, ScoredChunk};
pub use splitter::CharacterTextSplitter;

/// Pick the embedder named by `embedding_provider`.
pub fn embedder_from_config(config: &KnowledgeConfig, provider: Arc<dyn Provider>) -> Arc<dyn Embedder> {
    match config.embedding_provider.as_str() {
        "provider" => Arc::new(ProviderEmbedder::new(provider, &config.embedding_model)),
        _ => Arc::new(HashingEmbedder::new(config.embedding_dimensions)),
    }
}

/// Load the corpus and build the index described by `config`.
pub async fn build_index(
    config: &KnowledgeConfig,
    provider: Arc<dyn Provider>,
) -> Result<DocumentIndex, KnowledgeError> {
    let documents = load_corpus(config).await?;
    let splitter = CharacterTextSplitter::new(&config.separator, config.chunk_size, config.chunk_overlap)?;
    DocumentIndex::build(&documents, &splitter, embedder_from_config(config, provider)).await
}
