//! Ending policy: fatal checks after every delta, identity endings at the
//! day-boundary checkpoint.

use serde::{Deserialize, Serialize};

use crate::player_state::{PlayerState, Ruleset, Stat};

/// Every terminal outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    // Immediate
    Dead,
    Starve,
    Break,

    // Extended ruleset only
    Together,
    Betrayed,

    // Day-boundary
    Guardian,
    Lonely,
    Hollow,
}

impl Ending {
    pub const ALL: [Ending; 8] = [
        Ending::Dead,
        Ending::Starve,
        Ending::Break,
        Ending::Together,
        Ending::Betrayed,
        Ending::Guardian,
        Ending::Lonely,
        Ending::Hollow,
    ];

    /// Scene id of the ending's content node.
    pub fn scene_id(&self) -> &'static str {
        match self {
            Ending::Dead => "end_dead",
            Ending::Starve => "end_starve",
            Ending::Break => "end_break",
            Ending::Together => "end_together",
            Ending::Betrayed => "end_betrayed",
            Ending::Guardian => "end_guardian",
            Ending::Lonely => "end_lonely",
            Ending::Hollow => "end_hollow",
        }
    }

    pub fn from_scene_id(id: &str) -> Option<Self> {
        Ending::ALL.into_iter().find(|ending| ending.scene_id() == id)
    }

    /// Fatal endings can interrupt any choice, mid-encounter.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Ending::Dead | Ending::Starve | Ending::Break)
    }

    /// Whether a session playing `ruleset` can ever reach this ending.
    pub fn reachable_in(&self, ruleset: Ruleset) -> bool {
        match self {
            Ending::Together | Ending::Betrayed => ruleset == Ruleset::Extended,
            _ => true,
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.scene_id())
    }
}

/// Outcome of the day-boundary checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Ending(Ending),
    /// No ending applies yet; go back to the day loop.
    Continue,
}

/// Fatal check run right after every delta: hp, then food, then loss.
pub fn immediate_ending(state: &PlayerState) -> Option<Ending> {
    if state.get(Stat::Hp) <= 0 {
        Some(Ending::Dead)
    } else if state.get(Stat::Food) <= 0 {
        Some(Ending::Starve)
    } else if state.get(Stat::Loss) >= 10 {
        Some(Ending::Break)
    } else {
        None
    }
}

/// Checkpoint waterfall. Order is a contract: the first satisfied rule wins.
pub fn resolve_ending(state: &PlayerState) -> Resolution {
    if let Some(ending) = immediate_ending(state) {
        return Resolution::Ending(ending);
    }

    let hp = state.get(Stat::Hp);
    let power = state.get(Stat::Power);
    let distance = state.get(Stat::Distance);
    let loss = state.get(Stat::Loss);

    if state.ruleset() == Ruleset::Extended {
        let party = state.get(Stat::Party);
        let trust = state.get(Stat::Trust);

        if party >= 2 && trust >= 7 && distance <= 7 {
            return Resolution::Ending(Ending::Together);
        }
        if party >= 2 && trust <= 1 {
            return Resolution::Ending(Ending::Betrayed);
        }
    }

    if power >= 6 && distance <= 4 && hp >= 3 {
        Resolution::Ending(Ending::Guardian)
    } else if distance >= 7 {
        Resolution::Ending(Ending::Lonely)
    } else if power >= 5 && loss >= 7 {
        Resolution::Ending(Ending::Hollow)
    } else {
        Resolution::Continue
    }
}
