//! Character text splitter.
//!
//! Splits a document on a separator, then greedily merges the pieces back
//! into chunks of at most `chunk_size` characters, carrying up to
//! `chunk_overlap` characters of trailing pieces into the next chunk.
//! A single piece longer than `chunk_size` becomes its own oversized chunk.

use std::collections::VecDeque;
use routeclaw_core::error::KnowledgeError;
use routeclaw_core::retrieval::DocumentChunk;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct CharacterTextSplitter {
    separator: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl CharacterTextSplitter {
    pub fn new(
        separator: impl Into<String>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<Self, KnowledgeError> {
        if chunk_size == 0 {
            return Err(KnowledgeError::InvalidSplitter("chunk_size must be > 0".into()));
        }
        if chunk_overlap >= chunk_size {
            return Err(KnowledgeError::InvalidSplitter(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            separator: separator.into(),
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces: Vec<&str> = if self.separator.is_empty() {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        } else {
            text.split(self.separator.as_str()).collect()
        };
        let pieces: Vec<&str> = pieces.into_iter().filter(|p| !p.trim().is_empty()).collect();
        self.merge(&pieces)
    }

    pub fn split_documents(&self, documents: &[String]) -> Vec<DocumentChunk> {
        documents
            .iter()
            .flat_map(|doc| self.split_text(doc))
            .map(DocumentChunk::new)
            .collect()
    }

    fn merge(&self, pieces: &[&str]) -> Vec<String> {
        let sep_len = self.separator.chars().count();
        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = piece.chars().count();
            let joined_len = |current: &VecDeque<&str>, total: usize| {
                total + len + if current.is_empty() { 0 } else { sep_len }
            };

            if joined_len(&current, total) > self.chunk_size {
                if total > self.chunk_size {
                    warn!(size = total, limit = self.chunk_size, "Created a chunk larger than chunk_size");
                }
                if !current.is_empty() {
                    self.push_chunk(&mut chunks, &current);
                    while total > self.chunk_overlap
                        || (total > 0 && joined_len(&current, total) > self.chunk_size)
                    {
                        let Some(front) = current.pop_front() else { break };
                        total -= front.chars().count() + if current.is_empty() { 0 } else { sep_len };
                    }
                }
            }

            total += len + if current.is_empty() { 0 } else { sep_len };
            current.push_back(piece);
        }

        if !current.is_empty() {
            self.push_chunk(&mut chunks, &current);
        }
        chunks
    }

    fn push_chunk(&self, chunks: &mut Vec<String>, current: &VecDeque<&str>) {
        let text = current
            .iter()
            .copied()
            .collect::<Vec<_>>()
            .join(&self.separator);
        let text = text.trim();
        if !text.is_empty() {
            chunks.push(text.to_string());
        }
    }
}
