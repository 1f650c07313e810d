//! OpenAI Chat Completions API adapter
//!
//! Also serves OpenAI-compatible providers through a custom base URL.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use topic_labeler_domain::{CompletionError, CompletionRequest, CompletionService};

use super::LlmConfig;

/// Chat completion client for OpenAI and compatible providers
pub struct OpenAiChatClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: LlmConfig,
}

impl OpenAiChatClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    pub fn with_base_url(
        api_key: SecretString,
        base_url: String,
        config: LlmConfig,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionService for OpenAiChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            response_format: request.json_output.then_some(ResponseFormat {
                r#type: "json_object",
            }),
            temperature: self.config.temperature,
            max_tokens: self.config.max_output_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(
            url = %url,
            model = %self.config.model,
            prompt_len = request.user.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Api(e.to_string())
                }
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Auth(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidFormat(e.to_string()))?;

        let text = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(CompletionError::InvalidFormat("Empty response".to_string()));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_labeler_domain::prompt::{SYSTEM_PROMPT, build_topic_request};
    use topic_labeler_domain::usecases::TopicLabeler;
    use topic_labeler_domain::CommunityId;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, config: LlmConfig) -> OpenAiChatClient {
        OpenAiChatClient::with_base_url(SecretString::new("test-key".into()), server.uri(), config)
            .unwrap()
    }

    fn mock_reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o",
                "response_format": { "type": "json_object" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_reply("{}")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, LlmConfig::default());
        let text = client
            .complete(&build_topic_request("papers"))
            .await
            .unwrap();

        assert_eq!(text, "{}");

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
        assert_eq!(messages[1]["role"], "user");
        assert!(messages[1]["content"].as_str().unwrap().contains("papers"));
        assert!(body.get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_label_through_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_reply(
                "```json\n{\"description\": \"Studies graph embeddings.\", \"topic\": \"Graph representation learning\"}\n```",
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let labeler = TopicLabeler::new(client_for(&mock_server, LlmConfig::default()));
        let result = labeler
            .label("1. DeepWalk\n2. node2vec", CommunityId::Number(17))
            .await
            .unwrap();

        assert_eq!(result.topic, "Graph representation learning");
        assert_eq!(result.community_id, CommunityId::Number(17));
    }

    #[tokio::test]
    async fn test_complete_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, LlmConfig::default());
        let result = client.complete(&build_topic_request("papers")).await;

        assert!(matches!(result, Err(CompletionError::Auth(_))));
    }

    #[tokio::test]
    async fn test_complete_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, LlmConfig::default());
        let result = client.complete(&build_topic_request("papers")).await;

        assert!(matches!(result, Err(CompletionError::RateLimited)));
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, LlmConfig::default());
        let result = client.complete(&build_topic_request("papers")).await;

        assert!(matches!(result, Err(CompletionError::Api(msg)) if msg.contains("Internal error")));
    }

    #[tokio::test]
    async fn test_complete_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, LlmConfig::default());
        let result = client.complete(&build_topic_request("papers")).await;

        assert!(matches!(result, Err(CompletionError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_complete_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_reply("{}"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(
            &mock_server,
            LlmConfig {
                timeout_secs: 1,
                ..Default::default()
            },
        );
        let result = client.complete(&build_topic_request("papers")).await;

        assert!(matches!(result, Err(CompletionError::Timeout)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenAiChatClient::with_base_url(
            SecretString::new("k".into()),
            "https://llm.example.com/v1/".to_string(),
            LlmConfig::default(),
        )
        .unwrap();

        assert_eq!(client.base_url, "https://llm.example.com/v1");
    }
}
