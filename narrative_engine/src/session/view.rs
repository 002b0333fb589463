//! What the presentation layer receives for each step.

use serde::{Deserialize, Serialize};
use survival_rules::{Mode, StatDiff};

use crate::content::SceneId;
use crate::events::SessionEvent;

/// A scene as it should be shown right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneView {
    pub scene_id: SceneId,
    /// Opaque background reference.
    pub background: String,
    /// Scene text with `{day}` substituted.
    pub text: String,
    /// Mode the choice texts were selected with.
    pub mode: Mode,
    /// Currently eligible choices, in authored order.
    pub choices: Vec<ChoiceView>,
}

impl SceneView {
    pub fn labels(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn choice(&self, label: &str) -> Option<&ChoiceView> {
        self.choices.iter().find(|c| c.label == label)
    }
}

/// One offered choice with its mode-resolved text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub label: String,
    pub text: String,
    /// True for the continuation the engine adds when nothing is eligible.
    pub synthesized: bool,
}

/// Result of one session control call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    /// Scene entered by this step. `None` when the target was missing and
    /// the session stayed where it was.
    pub view: Option<SceneView>,

    /// Stat changes actually applied, post-clamp.
    pub changes: StatDiff,

    pub events: Vec<SessionEvent>,
}

impl Step {
    /// Ending reached during this step, if any.
    pub fn ending(&self) -> Option<survival_rules::Ending> {
        self.events.iter().find_map(SessionEvent::ending)
    }
}
