pub mod answer_pipeline;
pub mod chat_service;
pub mod config;
pub mod embedding_service;
pub mod knowledge_store;
pub mod models;

pub use answer_pipeline::AnswerPipeline;
pub use chat_service::{ChatModel, OpenAiChatService};
pub use config::OpenAiConfig;
pub use embedding_service::{Embedder, OpenAiEmbeddingService};
pub use knowledge_store::{Retriever, VectorStore};
pub use models::*;

use anyhow::Result;
use std::sync::Arc;

// Seeds the default knowledge store and wires it to the OpenAI chat model.
pub async fn build_default_pipeline(config: &OpenAiConfig) -> Result<AnswerPipeline> {
    log::info!("Initializing answer pipeline...");

    let embedder = Arc::new(OpenAiEmbeddingService::new(config.clone()));
    let store = VectorStore::seed_default(embedder).await?;
    let model = OpenAiChatService::new(config.clone());

    log::info!("Answer pipeline initialized");
    Ok(AnswerPipeline::new(Arc::new(store), Arc::new(model)))
}
