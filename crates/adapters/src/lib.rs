//! topic-labeler adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `llm`: completion service adapters (OpenAI chat completions, stub)

pub mod llm;
