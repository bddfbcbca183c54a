use crate::embedding_service::{cosine_similarity, Embedder};
use crate::models::Snippet;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub const SEED_TEXT: &str = "mitochondria is the powerhouse of the cell";
pub const DEFAULT_K: usize = 4;
pub const SNIPPET_SEPARATOR: &str = "\n\n";

// Anything that can turn a query into prompt context.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<String>;
}

struct IndexedSnippet {
    snippet: Snippet,
    embedding: Vec<f32>,
}

// In-memory vector index. Read-only once built.
pub struct VectorStore {
    entries: Vec<IndexedSnippet>,
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl VectorStore {
    pub async fn from_texts(
        texts: Vec<String>,
        metadatas: Vec<Value>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        if texts.len() != metadatas.len() {
            anyhow::bail!(
                "got {} texts but {} metadata entries",
                texts.len(),
                metadatas.len()
            );
        }

        let embeddings = embedder.embed_documents(&texts).await?;
        let entries = texts
            .into_iter()
            .zip(metadatas)
            .zip(embeddings)
            .map(|((text, metadata), embedding)| IndexedSnippet {
                snippet: Snippet { text, metadata },
                embedding,
            })
            .collect::<Vec<_>>();

        log::info!("Seeded vector store with {} snippets", entries.len());

        Ok(Self {
            entries,
            embedder,
            k: DEFAULT_K,
        })
    }

    pub async fn seed_default(embedder: Arc<dyn Embedder>) -> Result<Self> {
        Self::from_texts(vec![SEED_TEXT.to_string()], vec![json!({ "id": 1 })], embedder).await
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Snippet>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed_query(query).await?;

        let mut scored: Vec<(&IndexedSnippet, f32)> = self
            .entries
            .iter()
            .map(|entry| (entry, cosine_similarity(&query_embedding, &entry.embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(entry, _)| entry.snippet.clone())
            .collect())
    }
}

pub fn format_snippets(snippets: &[Snippet]) -> String {
    snippets
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(SNIPPET_SEPARATOR)
}

#[async_trait]
impl Retriever for VectorStore {
    async fn retrieve(&self, query: &str) -> Result<String> {
        let snippets = self.similarity_search(query, self.k).await?;
        log::debug!("Retrieved {} snippets", snippets.len());
        Ok(format_snippets(&snippets))
    }
}
