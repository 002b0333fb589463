//! Content module - the declarative story data the engine consumes.
//!
//! - **Scenes**: immutable nodes with a background, text and ordered choices
//! - **Choices**: gated actions carrying an effect and a navigation target
//! - **Story graph**: scenes keyed by id, loaded from JSON or TOML

mod graph;
mod scene;

pub use graph::*;
pub use scene::*;
