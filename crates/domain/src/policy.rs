//! Output constraints requested of the model
//!
//! The prompt asks for a 100-200 word description and a topic of at most
//! ten words. These checks report where a result falls outside that; they
//! never reject it. A field holding non-text JSON is reported as such and
//! not counted.

use std::ops::RangeInclusive;

use serde_json::Value;

use crate::model::LabelResult;

/// Policy configuration
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Accepted description length in words
    pub description_words: RangeInclusive<usize>,
    /// Maximum topic length in words
    pub max_topic_words: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            description_words: 100..=200,
            max_topic_words: 10,
        }
    }
}

/// Reviews label results against the requested format
pub struct PolicyValidator {
    config: PolicyConfig,
}

impl PolicyValidator {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// List every constraint the result does not meet
    pub fn review(&self, result: &LabelResult) -> Vec<PolicyViolation> {
        let mut violations = Vec::new();

        match word_count(&result.description) {
            Some(words) if !self.config.description_words.contains(&words) => {
                violations.push(PolicyViolation::DescriptionLength {
                    words,
                    min: *self.config.description_words.start(),
                    max: *self.config.description_words.end(),
                });
            }
            Some(_) => {}
            None => violations.push(PolicyViolation::NotText {
                field: "description",
            }),
        }

        match word_count(&result.topic) {
            Some(words) if words > self.config.max_topic_words => {
                violations.push(PolicyViolation::TopicLength {
                    words,
                    max: self.config.max_topic_words,
                });
            }
            Some(_) => {}
            None => violations.push(PolicyViolation::NotText { field: "topic" }),
        }

        violations
    }
}

impl Default for PolicyValidator {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

fn word_count(value: &Value) -> Option<usize> {
    value.as_str().map(|text| text.split_whitespace().count())
}

/// Policy violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("Description has {words} words, expected {min}-{max}")]
    DescriptionLength { words: usize, min: usize, max: usize },
    #[error("Topic has {words} words, expected at most {max}")]
    TopicLength { words: usize, max: usize },
    #[error("Field '{field}' is not text")]
    NotText { field: &'static str },
}
