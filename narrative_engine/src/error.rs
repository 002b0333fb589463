//! Error types for content loading, configuration and session control.

use thiserror::Error;

use crate::content::SceneId;

/// Story content could not be parsed.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid JSON story: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML story: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Engine configuration is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Routing this scene to the dispatch node would never settle.
    #[error("{field} must not be the dispatch scene '{id}'")]
    DispatchLoop { field: &'static str, id: SceneId },

    #[error("dispatch scene '{0}' collides with an ending scene")]
    DispatchIsEnding(SceneId),

    #[error("fallback label must not be empty")]
    EmptyFallbackLabel,
}

/// A session control call was rejected. State is untouched.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session has not been started")]
    NotStarted,

    #[error("choice '{label}' is not available in scene '{scene}'")]
    ChoiceUnavailable { scene: SceneId, label: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
