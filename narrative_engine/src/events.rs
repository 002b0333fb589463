//! Session events - what happened during one player action, in order.

use serde::{Deserialize, Serialize};
use survival_rules::{Ending, StatDiff};

use crate::content::SceneId;

/// A single transition reported to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// State initialized to the default vector and the start scene entered.
    Started,

    /// State reset, either by a reset choice or an external restart.
    Restarted,

    /// An authored choice was activated.
    ChoiceTaken { scene: SceneId, label: String },

    /// The synthesized continuation was activated.
    FallbackTaken { scene: SceneId },

    /// Post-clamp changes from the activated choice's delta.
    StatsChanged(StatDiff),

    /// A fatal stat overrode the choice's declared target.
    AutoEnding { ending: Ending },

    /// The day-boundary checkpoint selected an ending.
    EndingResolved { ending: Ending },

    /// The checkpoint found no ending; back to the day loop.
    LoopContinued,

    /// Navigation target is not in the story graph; nothing was entered.
    MissingScene { id: SceneId },
}

impl SessionEvent {
    /// The ending this event moves the session into, if any.
    pub fn ending(&self) -> Option<Ending> {
        match self {
            SessionEvent::AutoEnding { ending } | SessionEvent::EndingResolved { ending } => {
                Some(*ending)
            }
            _ => None,
        }
    }
}
