//! Player state management - the numeric vector every choice mutates.

mod delta;
mod stats;

pub use delta::*;
pub use stats::*;

use serde::{Deserialize, Serialize};

/// Which stat set a session plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Ruleset {
    /// day, hp, food, power, distance, loss.
    #[default]
    Base,
    /// Base plus companion stats (party, trust) and the companionship endings.
    Extended,
}

impl Ruleset {
    /// Whether this ruleset tracks `stat`. Untracked stats read as zero and
    /// are never written.
    pub fn tracks(&self, stat: Stat) -> bool {
        match stat {
            Stat::Party | Stat::Trust => *self == Ruleset::Extended,
            _ => true,
        }
    }

    /// Tracked stats in canonical order.
    pub fn stats(&self) -> impl Iterator<Item = Stat> + '_ {
        Stat::ALL.into_iter().filter(move |stat| self.tracks(*stat))
    }
}

/// The complete player state at any point in a session.
///
/// Fields are private: every write goes through a clamp, so each tracked
/// stat is always inside its [`StatBounds`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    ruleset: Ruleset,
    day: i32,
    hp: i32,
    food: i32,
    power: i32,
    distance: i32,
    loss: i32,
    party: i32,
    trust: i32,
}

impl PlayerState {
    /// Create the default vector for `ruleset`.
    pub fn new(ruleset: Ruleset) -> Self {
        let (party, trust) = match ruleset {
            Ruleset::Base => (0, 0),
            Ruleset::Extended => (0, 5),
        };
        Self {
            ruleset,
            day: 1,
            hp: 7,
            food: 4,
            power: 0,
            distance: 0,
            loss: 4,
            party,
            trust,
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// Current value of `stat`; zero when the ruleset does not track it.
    pub fn get(&self, stat: Stat) -> i32 {
        if !self.ruleset.tracks(stat) {
            return 0;
        }
        match stat {
            Stat::Day => self.day,
            Stat::Hp => self.hp,
            Stat::Food => self.food,
            Stat::Power => self.power,
            Stat::Distance => self.distance,
            Stat::Loss => self.loss,
            Stat::Party => self.party,
            Stat::Trust => self.trust,
        }
    }

    pub fn day(&self) -> i32 {
        self.day
    }

    /// Set `stat` to `value`, clamped into its bounds.
    ///
    /// Builder used for scripted setups; untracked stats are left alone.
    pub fn with(mut self, stat: Stat, value: i32) -> Self {
        self.set(stat, value);
        self
    }

    fn set(&mut self, stat: Stat, value: i32) {
        if !self.ruleset.tracks(stat) {
            return;
        }
        let value = stat.bounds().clamp(value);
        let slot = match stat {
            Stat::Day => &mut self.day,
            Stat::Hp => &mut self.hp,
            Stat::Food => &mut self.food,
            Stat::Power => &mut self.power,
            Stat::Distance => &mut self.distance,
            Stat::Loss => &mut self.loss,
            Stat::Party => &mut self.party,
            Stat::Trust => &mut self.trust,
        };
        *slot = value;
    }

    /// Produce the default vector for this state's ruleset.
    pub fn reset(&self) -> Self {
        Self::new(self.ruleset)
    }

    /// Add `delta` to a copy of this state and clamp every stat.
    ///
    /// The receiver is untouched; the caller swaps in the returned value, so
    /// a half-applied delta is never observable.
    pub fn apply_delta(&self, delta: &Delta) -> Self {
        let mut next = self.clone();
        for (stat, amount) in delta.iter() {
            next.set(stat, self.get(stat).saturating_add(amount));
        }
        next
    }

    /// Apply `effect`: an additive delta, or a full reset.
    pub fn apply_effect(&self, effect: &Effect) -> Self {
        match effect {
            Effect::Apply(delta) => self.apply_delta(delta),
            Effect::Reset => self.reset(),
        }
    }

    /// Like [`apply_delta`](Self::apply_delta), also returning what changed.
    pub fn apply_delta_with_diff(&self, delta: &Delta) -> (Self, StatDiff) {
        let next = self.apply_delta(delta);
        let diff = Self::diff(self, &next);
        (next, diff)
    }

    /// Non-zero per-stat changes from `before` to `after`, for the stats
    /// `after` tracks.
    pub fn diff(before: &PlayerState, after: &PlayerState) -> StatDiff {
        let changes = after
            .ruleset
            .stats()
            .filter_map(|stat| {
                let change = StatChange {
                    stat,
                    before: before.get(stat),
                    after: after.get(stat),
                };
                (change.amount() != 0).then_some(change)
            })
            .collect();
        StatDiff::from_changes(changes)
    }

    /// Whether every tracked stat is inside its bounds.
    pub fn is_within_bounds(&self) -> bool {
        self.ruleset
            .stats()
            .all(|stat| stat.bounds().contains(self.get(stat)))
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Ruleset::Base)
    }
}
