//! Application use cases / business logic

pub mod label;

pub use label::{LabelError, TopicLabeler};
