//! Domain models and value objects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier of a community in the citation network
///
/// Communities are keyed upstream either by integer (e.g. the output of a
/// clustering pass) or by name. The value is never inspected, only echoed
/// back into the [`LabelResult`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommunityId {
    /// Integer key
    Number(i64),
    /// Free-form key
    Text(String),
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for CommunityId {
    type Err = Infallible;

    /// Integers become [`CommunityId::Number`], anything else is kept as text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

impl From<i64> for CommunityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CommunityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CommunityId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Provider-neutral chat completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System message framing the assistant
    pub system: String,
    /// User message carrying the rendered prompt
    pub user: String,
    /// Ask the provider to constrain output to a JSON object
    pub json_output: bool,
}

/// Topic label for one community
///
/// `description` and `topic` hold whatever JSON the model put under those
/// keys. Strings are requested, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelResult {
    /// 100-200 word plain-language description of the research area
    pub description: Value,
    /// One-sentence topic summary
    pub topic: Value,
    /// Caller-supplied community identifier
    pub community_id: CommunityId,
    /// Any further keys the model returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LabelResult {
    pub fn new(
        description: impl Into<Value>,
        topic: impl Into<Value>,
        community_id: CommunityId,
    ) -> Self {
        Self {
            description: description.into(),
            topic: topic.into(),
            community_id,
            extra: Map::new(),
        }
    }
}

/// Render a label field for display: strings verbatim, other JSON as text
pub fn field_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_community_id_from_str() {
        assert_eq!("42".parse::<CommunityId>(), Ok(CommunityId::Number(42)));
        assert_eq!(
            "nlp-cluster".parse::<CommunityId>(),
            Ok(CommunityId::Text("nlp-cluster".to_string()))
        );
        // Not trimmed: the identifier is echoed exactly as given
        assert_eq!(
            " 7".parse::<CommunityId>(),
            Ok(CommunityId::Text(" 7".to_string()))
        );
    }

    #[test]
    fn test_community_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&CommunityId::Number(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&CommunityId::from("c3")).unwrap(),
            r#""c3""#
        );
    }

    #[test]
    fn test_label_result_flattens_extra_fields() {
        let mut result = LabelResult::new("D", "T", 5.into());
        result
            .extra
            .insert("keywords".to_string(), serde_json::json!(["graphs"]));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "description": "D",
                "topic": "T",
                "community_id": 5,
                "keywords": ["graphs"]
            })
        );
    }

    #[test]
    fn test_field_text_renders_non_strings_as_json() {
        assert_eq!(field_text(&Value::from("Graph mining")), "Graph mining");
        assert_eq!(field_text(&Value::Null), "null");
        assert_eq!(field_text(&serde_json::json!(["a", "b"])), r#"["a","b"]"#);
    }
}
