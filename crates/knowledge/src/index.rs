//! In-memory vector index over document chunks.
//!
//! Built once at startup and never mutated afterwards, so one index can be
//! shared (`Arc<DocumentIndex>`) by any number of concurrent queries.

use async_trait::async_trait;
use routeclaw_core::error::KnowledgeError;
use routeclaw_core::retrieval::{DocumentChunk, Retriever};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::embedding::Embedder;
use crate::splitter::CharacterTextSplitter;
use crate::vector;

/// A chunk returned by a search, with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f32,
}

pub struct DocumentIndex {
    chunks: Vec<DocumentChunk>,
    embeddings: Vec<Vec<f32>>,
    embedder: Arc<dyn Embedder>,
}

impl DocumentIndex {
    /// Split `documents`, embed every chunk, and index the result.
    pub async fn build(
        documents: &[String],
        splitter: &CharacterTextSplitter,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, KnowledgeError> {
        let chunks = splitter.split_documents(documents);
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            embedder.embed(&texts).await?
        };

        if embeddings.len() != chunks.len() {
            return Err(KnowledgeError::EmbeddingFailed(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        if let Some(first) = embeddings.first() {
            let expected = first.len();
            if let Some(bad) = embeddings.iter().find(|e| e.len() != expected) {
                return Err(KnowledgeError::DimensionMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
        }

        info!(
            documents = documents.len(),
            chunks = chunks.len(),
            embedder = %embedder.name(),
            "RAG: documents indexed"
        );

        Ok(Self {
            chunks,
            embeddings,
            embedder,
        })
    }

    /// The `k` chunks most similar to `query`, best first.
    ///
    /// Returns every chunk when the index holds fewer than `k`.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, KnowledgeError> {
        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| KnowledgeError::EmbeddingFailed("no embedding returned for query".into()))?;

        let expected = self.embeddings[0].len();
        if query_embedding.len() != expected {
            return Err(KnowledgeError::DimensionMismatch {
                expected,
                actual: query_embedding.len(),
            });
        }

        Ok(vector::top_k(&self.embeddings, &query_embedding, k)
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                chunk: self.chunks[i].clone(),
                score,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl Retriever for DocumentIndex {
    async fn retrieve_context(&self, query: &str, k: usize) -> String {
        match self.search(query, k).await {
            Ok(found) => {
                debug!(
                    query = %query,
                    k,
                    hits = found.len(),
                    best = found.first().map(|c| c.score).unwrap_or(0.0),
                    "RAG: context retrieved"
                );
                found
                    .into_iter()
                    .map(|c| c.chunk.text)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Err(e) => {
                warn!(error = %e, query = %query, "RAG: retrieval failed, continuing without context");
                String::new()
            }
        }
    }
}
