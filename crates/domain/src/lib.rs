//! topic-labeler domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `prompt`: Prompt construction for the completion service
//! - `reply`: Parsing of model replies
//! - `usecases`: Application use cases / business logic
//! - `policy`: Advisory format constraints

pub mod model;
pub mod policy;
pub mod ports;
pub mod prompt;
pub mod reply;
pub mod usecases;

pub use model::*;
pub use ports::*;
