//! Community labeling use case

use thiserror::Error;

use crate::{
    model::{CommunityId, LabelResult, field_text},
    ports::{CompletionError, CompletionService},
    prompt::build_topic_request,
    reply::{ReplyError, into_label_result, parse_reply_json},
};

/// Error type for the labeling use case
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),
    #[error("Invalid model reply: {0}")]
    Reply(#[from] ReplyError),
}

/// Use case for labeling a community from its hub and authority titles
///
/// One call issues exactly one completion request. Failures are returned
/// to the caller unchanged; nothing is retried.
pub struct TopicLabeler<C> {
    service: C,
}

impl<C: CompletionService> TopicLabeler<C> {
    pub fn new(service: C) -> Self {
        Self { service }
    }

    /// Label one community
    pub async fn label(
        &self,
        papers: &str,
        community_id: CommunityId,
    ) -> Result<LabelResult, LabelError> {
        let request = build_topic_request(papers);

        tracing::info!(
            community_id = %community_id,
            papers_len = papers.len(),
            "Labeling community"
        );

        let reply = self.service.complete(&request).await?;
        tracing::debug!(reply_len = reply.len(), "Received completion");

        let value = parse_reply_json(&reply)?;
        let result = into_label_result(value, community_id)?;

        tracing::info!(
            community_id = %result.community_id,
            topic = %field_text(&result.topic),
            "Labeled community"
        );

        Ok(result)
    }
}
