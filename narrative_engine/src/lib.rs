//! # Narrative Engine
//!
//! Walks a branching story: a fixed graph of scenes whose conditional choices
//! mutate a small numeric player state, with endings picked from that state.
//! The rules themselves live in `survival_rules`; this crate owns the scene
//! graph, the session state machine and story loading.
//!
//! ## Core Components
//!
//! - **content**: Scenes, choices and the story graph, loaded from JSON or TOML
//! - **session**: One player's run; filters choices, applies effects, dispatches endings
//! - **events**: What happened during each player action, for the presentation layer
//! - **config**: Which scenes play the start, day-loop and dispatch roles
//!
//! ## Design Philosophy
//!
//! - **Content is data**: the engine never hardcodes scenes beyond their structural roles
//! - **Single owner**: each session owns exactly one player state and borrows the graph
//! - **No fatal paths**: bad references are logged and leave the session where it was

pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod session;

pub use config::*;
pub use content::*;
pub use error::*;
pub use events::*;
pub use session::*;
