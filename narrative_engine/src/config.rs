//! Engine configuration: which scenes play which structural role.

use serde::{Deserialize, Serialize};
use survival_rules::{Ending, Ruleset};

use crate::content::SceneId;
use crate::error::ConfigError;

/// Configuration for a narrative session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scene entered on start and restart.
    pub start_scene: SceneId,

    /// Day-loop entry: where "keep going" and fallback continuations lead.
    pub day_loop_scene: SceneId,

    /// Dispatch id that runs the ending checkpoint instead of a lookup.
    pub resolve_scene: SceneId,

    pub ruleset: Ruleset,

    /// Label of the continuation synthesized when nothing is eligible.
    pub fallback_label: String,

    pub fallback_text: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_scene: SceneId::from("prologue"),
            day_loop_scene: SceneId::from("day_start"),
            resolve_scene: SceneId::from("resolve_end"),
            ruleset: Ruleset::Base,
            fallback_label: "continue".to_string(),
            fallback_text: "Continue".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML config. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject role assignments that would make dispatch recurse forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, id) in [
            ("start_scene", &self.start_scene),
            ("day_loop_scene", &self.day_loop_scene),
        ] {
            if *id == self.resolve_scene {
                return Err(ConfigError::DispatchLoop {
                    field,
                    id: id.clone(),
                });
            }
        }

        if Ending::from_scene_id(self.resolve_scene.as_str()).is_some() {
            return Err(ConfigError::DispatchIsEnding(self.resolve_scene.clone()));
        }

        if self.fallback_label.is_empty() {
            return Err(ConfigError::EmptyFallbackLabel);
        }

        Ok(())
    }
}
