use crate::chat_service::ChatModel;
use crate::knowledge_store::Retriever;
use crate::models::ChatMessage;
use anyhow::Result;
use std::sync::Arc;

// Retrieval, prompt fill, generation and text extraction, in that order.
pub struct AnswerPipeline {
    retriever: Arc<dyn Retriever>,
    model: Arc<dyn ChatModel>,
}

impl AnswerPipeline {
    pub fn new(retriever: Arc<dyn Retriever>, model: Arc<dyn ChatModel>) -> Self {
        Self { retriever, model }
    }

    pub async fn answer(&self, question: &str) -> Result<String> {
        let context = self.retriever.retrieve(question).await?;
        log::debug!("Retrieved {} bytes of context", context.len());

        let prompt = build_prompt(&context, question);
        let message = self.model.complete(&prompt).await?;

        extract_text(message)
    }
}

pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the question based only on the following context:\n{context}\n\nQuestion: {question}"
    )
}

pub fn extract_text(message: ChatMessage) -> Result<String> {
    message
        .content
        .ok_or_else(|| anyhow::anyhow!("completion message has no text content"))
}
