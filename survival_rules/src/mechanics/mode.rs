//! Psychological mode: a derived lens on state used to pick text tone.

use serde::{Deserialize, Serialize};

use crate::player_state::{PlayerState, Stat};

/// Loss at or above this collapses every line into the broken register.
pub const BROKEN_LOSS: i32 = 7;

/// How far power and distance must diverge before one dominates.
pub const DOMINANCE_MARGIN: i32 = 2;

/// Discrete psychological mode.
///
/// Never stored: classify the current state whenever text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Broken,
    Power,
    Distance,
    Base,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Broken, Mode::Power, Mode::Distance, Mode::Base];

    /// First match wins: broken, then power dominance, then distance
    /// dominance, else base.
    pub fn classify(state: &PlayerState) -> Self {
        let power = state.get(Stat::Power);
        let distance = state.get(Stat::Distance);

        if state.get(Stat::Loss) >= BROKEN_LOSS {
            Mode::Broken
        } else if power - distance >= DOMINANCE_MARGIN {
            Mode::Power
        } else if distance - power >= DOMINANCE_MARGIN {
            Mode::Distance
        } else {
            Mode::Base
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Broken => "broken",
            Mode::Power => "power",
            Mode::Distance => "distance",
            Mode::Base => "base",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
