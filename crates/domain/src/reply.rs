//! Parsing of model replies into label results

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{CommunityId, LabelResult};

/// Error type for reply parsing
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Failed to parse JSON: {0}")]
    InvalidJson(String),
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("Missing field '{0}'")]
    MissingField(&'static str),
}

/// Remove a leading "```json\n" and a trailing "```", each only if present
pub fn strip_code_fence(reply: &str) -> &str {
    let body = reply.strip_prefix("```json\n").unwrap_or(reply);
    body.strip_suffix("```").unwrap_or(body)
}

/// Parse a model reply as JSON
///
/// The exact fence strip runs first. When that does not yield valid JSON,
/// the first fenced block (any language tag) and then the outermost `{...}`
/// span are tried before giving up.
pub fn parse_reply_json(reply: &str) -> Result<Value, ReplyError> {
    let stripped = strip_code_fence(reply);
    match serde_json::from_str(stripped) {
        Ok(value) => Ok(value),
        Err(err) => match extract_embedded_json(reply) {
            Some(value) => {
                tracing::debug!(error = %err, "Recovered JSON from loosely wrapped reply");
                Ok(value)
            }
            None => Err(ReplyError::InvalidJson(err.to_string())),
        },
    }
}

/// Turn a parsed reply into a result owned by `community_id`
///
/// Only the presence of `description` and `topic` is checked; their values
/// are kept as whatever JSON the model produced. A `community_id` key
/// supplied by the model is discarded.
pub fn into_label_result(
    value: Value,
    community_id: CommunityId,
) -> Result<LabelResult, ReplyError> {
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => return Err(ReplyError::NotAnObject(json_kind(&other))),
    };

    fields.remove("community_id");
    let description = take_field(&mut fields, "description")?;
    let topic = take_field(&mut fields, "topic")?;

    Ok(LabelResult {
        description,
        topic,
        community_id,
        extra: fields,
    })
}

fn take_field(fields: &mut Map<String, Value>, field: &'static str) -> Result<Value, ReplyError> {
    fields.remove(field).ok_or(ReplyError::MissingField(field))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn extract_embedded_json(reply: &str) -> Option<Value> {
    fenced_block(reply)
        .and_then(|block| serde_json::from_str(block).ok())
        .or_else(|| brace_span(reply).and_then(|span| serde_json::from_str(span).ok()))
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let block = &rest[..rest.find("```")?];

    // Skip the language tag line if present
    match block.find('\n') {
        Some(newline) if !block[..newline].trim_start().starts_with('{') => {
            Some(block[newline + 1..].trim())
        }
        _ => Some(block.trim()),
    }
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
