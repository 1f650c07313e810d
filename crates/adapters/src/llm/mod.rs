//! LLM provider adapters

pub mod openai_chat;
pub mod stub;

pub use openai_chat::OpenAiChatClient;
pub use stub::StubCompletion;

use serde::{Deserialize, Serialize};

/// Common LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name/ID
    pub model: String,
    /// Sampling temperature, provider default when unset
    pub temperature: Option<f64>,
    /// Maximum output tokens, provider default when unset
    pub max_output_tokens: Option<u32>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: None,
            max_output_tokens: None,
            timeout_secs: 600,
        }
    }
}
