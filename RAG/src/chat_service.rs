use crate::config::OpenAiConfig;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

// A remote text-generation model answering one prompt at a time.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<ChatMessage>;
}

pub struct OpenAiChatService {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiChatService {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatService {
    async fn complete(&self, prompt: &str) -> Result<ChatMessage> {
        let request = ChatCompletionRequest {
            model: self.config.chat_model.clone(),
            messages: vec![ChatMessage::user(prompt)],
        };

        let response = self
            .client
            .post(self.config.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("OpenAI API error ({}): {}", status, error_text));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow::anyhow!("OpenAI returned no completion choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn service_for(server: &mockito::Server) -> OpenAiChatService {
        OpenAiChatService::new(OpenAiConfig::new("sk-test").with_base_url(server.url()))
    }

    #[tokio::test]
    async fn sends_single_user_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "say hi" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "chatcmpl-1",
                    "choices": [{
                        "index": 0,
                        "message": { "role": "assistant", "content": "hi" },
                        "finish_reason": "stop"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let message = service_for(&server).complete("say hi").await.unwrap();

        mock.assert_async().await;
        assert_eq!(message, ChatMessage::assistant("hi"));
    }

    #[tokio::test]
    async fn rate_limit_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"Rate limit reached"}}"#)
            .create_async()
            .await;

        let err = service_for(&server).complete("say hi").await.unwrap_err();
        assert!(err.to_string().contains("Rate limit reached"));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "choices": [] }).to_string())
            .create_async()
            .await;

        assert!(service_for(&server).complete("say hi").await.is_err());
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        assert!(service_for(&server).complete("say hi").await.is_err());
    }
}
