use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{ApiError, Result};

/// One role-tagged message in a chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Everything a caller controls about a single completion call. The model
/// identifier belongs to the client, not the request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask the service to answer with a JSON object.
    pub json_response: bool,
}

/// The completion-service boundary. Services depend on this trait so tests
/// can swap in a stub instead of the live HTTP client.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Returns the text of the first completion choice, empty string if the
    /// response carried none. No retries, no explicit timeout.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// HTTP client for an OpenAI-style `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", config.completion_api_key)
                .parse()
                .unwrap(),
        );
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.completion_base_url.trim_end_matches('/').to_string(),
            model: config.completion_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionApi for CompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_response
                .then(|| serde_json::json!({ "type": "json_object" })),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::ExternalServiceError(format!(
                "completion API error {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_format_is_omitted_unless_requested() {
        let messages = vec![ChatMessage::user("hi")];
        let body = ChatCompletionRequest {
            model: "test-model",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 100,
            response_format: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("response_format").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn missing_choices_and_content_deserialize_cleanly() {
        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());

        let no_content: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert!(no_content.choices[0].message.content.is_none());
    }
}
