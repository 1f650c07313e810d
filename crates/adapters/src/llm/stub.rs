//! Stub completion service for testing and offline mode

use async_trait::async_trait;
use std::sync::RwLock;
use topic_labeler_domain::{CompletionError, CompletionRequest, CompletionService};

enum StubMode {
    Reply(String),
    Error(CompletionError),
    Echo,
}

/// Stub completion service that returns configurable replies
pub struct StubCompletion {
    mode: StubMode,
    last_request: RwLock<Option<CompletionRequest>>,
}

impl StubCompletion {
    fn with_mode(mode: StubMode) -> Self {
        Self {
            mode,
            last_request: RwLock::new(None),
        }
    }

    /// Create a stub that returns the given reply text verbatim
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::with_mode(StubMode::Reply(reply.into()))
    }

    /// Create a stub that always returns an error
    pub fn with_error(error: CompletionError) -> Self {
        Self::with_mode(StubMode::Error(error))
    }

    /// Create a stub that answers with a fenced JSON label derived from the request
    pub fn echo() -> Self {
        Self::with_mode(StubMode::Echo)
    }

    /// The most recent request seen by this stub
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.read().ok().and_then(|r| r.clone())
    }
}

impl Default for StubCompletion {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        {
            let mut last = self
                .last_request
                .write()
                .map_err(|e| CompletionError::Api(e.to_string()))?;
            *last = Some(request.clone());
        }

        match &self.mode {
            StubMode::Reply(text) => Ok(text.clone()),
            StubMode::Error(error) => Err(error.clone()),
            StubMode::Echo => {
                let label = serde_json::json!({
                    "description": format!(
                        "Stub description generated from a {}-line prompt",
                        request.user.lines().count()
                    ),
                    "topic": "Stub topic",
                });
                Ok(format!("```json\n{}\n```", label))
            }
        }
    }
}
