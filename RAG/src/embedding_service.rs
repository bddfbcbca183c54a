use crate::config::OpenAiConfig;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

// Turns text into vectors for similarity search.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_documents(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("empty embedding response"))
    }
}

// Embeddings through the OpenAI `/embeddings` endpoint.
pub struct OpenAiEmbeddingService {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiEmbeddingService {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Embedder for OpenAiEmbeddingService {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // Inputs are sent with newlines flattened to spaces.
        let request = EmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: texts.iter().map(|t| t.replace('\n', " ")).collect(),
        };

        let response = self
            .client
            .post(self.config.endpoint("embeddings"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!(
                "OpenAI embeddings error ({}): {}",
                status,
                error_text
            ));
        }

        let mut embedding_response: EmbeddingResponse = response.json().await?;
        if embedding_response.data.len() != texts.len() {
            return Err(anyhow::anyhow!(
                "expected {} embeddings, got {}",
                texts.len(),
                embedding_response.data.len()
            ));
        }

        embedding_response.data.sort_by_key(|d| d.index);
        log::debug!("Embedded {} texts", texts.len());

        Ok(embedding_response
            .data
            .into_iter()
            .map(|d| d.embedding)
            .collect())
    }
}

pub fn cosine_similarity(embedding1: &[f32], embedding2: &[f32]) -> f32 {
    let min_len = embedding1.len().min(embedding2.len());

    let dot_product: f32 = embedding1[..min_len]
        .iter()
        .zip(embedding2[..min_len].iter())
        .map(|(a, b)| a * b)
        .sum();

    let norm1: f32 = embedding1[..min_len].iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm2: f32 = embedding2[..min_len].iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm1 == 0.0 || norm2 == 0.0 {
        0.0
    } else {
        dot_product / (norm1 * norm2)
    }
}
