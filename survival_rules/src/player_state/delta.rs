//! Deltas, choice effects and the post-clamp diffs they produce.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Stat;

/// A partial additive update to one or more stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Delta(BTreeMap<Stat, i32>);

impl Delta {
    /// Create an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the increment for `stat`.
    pub fn with(mut self, stat: Stat, amount: i32) -> Self {
        let entry = self.0.entry(stat).or_insert(0);
        *entry = entry.saturating_add(amount);
        self
    }

    /// The increment for `stat`, zero if the delta does not name it.
    pub fn get(&self, stat: Stat) -> i32 {
        self.0.get(&stat).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(stat, increment)` pairs in canonical stat order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.0.iter().map(|(stat, amount)| (*stat, *amount))
    }
}

impl FromIterator<(Stat, i32)> for Delta {
    fn from_iter<I: IntoIterator<Item = (Stat, i32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Delta::new(), |delta, (stat, amount)| delta.with(stat, amount))
    }
}

/// What activating a choice does to player state.
///
/// Reinitializing is its own action rather than a magic delta value, so an
/// `Apply` is always pure addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Add the delta and clamp.
    Apply(Delta),
    /// Discard every stat and return to the default vector.
    Reset,
}

impl Effect {
    pub fn is_reset(&self) -> bool {
        matches!(self, Effect::Reset)
    }
}

impl Default for Effect {
    fn default() -> Self {
        Effect::Apply(Delta::new())
    }
}

impl From<Delta> for Effect {
    fn from(delta: Delta) -> Self {
        Effect::Apply(delta)
    }
}

/// One stat's value before and after a delta, post-clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: Stat,
    pub before: i32,
    pub after: i32,
}

impl StatChange {
    /// Signed change actually applied.
    pub fn amount(&self) -> i32 {
        self.after - self.before
    }
}

/// The stat-by-stat changes a delta actually produced.
///
/// Only non-zero changes are listed, in canonical stat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatDiff {
    changes: Vec<StatChange>,
}

impl StatDiff {
    pub(crate) fn from_changes(changes: Vec<StatChange>) -> Self {
        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Net change for `stat`, zero if it did not move.
    pub fn amount(&self, stat: Stat) -> i32 {
        self.changes
            .iter()
            .find(|change| change.stat == stat)
            .map(StatChange::amount)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatChange> {
        self.changes.iter()
    }

    /// Whether any stat went down.
    pub fn has_losses(&self) -> bool {
        self.changes.iter().any(|change| change.amount() < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_builder() {
        let delta = Delta::new()
            .with(Stat::Hp, 1)
            .with(Stat::Food, -1)
            .with(Stat::Hp, 2);

        assert_eq!(delta.get(Stat::Hp), 3);
        assert_eq!(delta.get(Stat::Food), -1);
        assert_eq!(delta.get(Stat::Loss), 0);
        assert_eq!(delta.len(), 2);
    }

    #[test]
    fn test_delta_iterates_in_canonical_order() {
        let delta: Delta = [(Stat::Loss, 1), (Stat::Day, 1), (Stat::Power, 2)]
            .into_iter()
            .collect();

        let stats: Vec<_> = delta.iter().map(|(stat, _)| stat).collect();
        assert_eq!(stats, vec![Stat::Day, Stat::Power, Stat::Loss]);
    }

    #[test]
    fn test_delta_rejects_unknown_keys() {
        let delta: Delta = serde_json::from_str(r#"{"hp": 1, "food": -1}"#).unwrap();
        assert_eq!(delta.get(Stat::Hp), 1);
        assert_eq!(delta.get(Stat::Food), -1);

        assert!(serde_json::from_str::<Delta>(r#"{"hp": 1, "morale": 2}"#).is_err());
    }

    #[test]
    fn test_effect_serde_shapes() {
        let reset: Effect = serde_json::from_str(r#""reset""#).unwrap();
        assert!(reset.is_reset());

        let apply: Effect = serde_json::from_str(r#"{"apply": {"power": 2}}"#).unwrap();
        assert_eq!(apply, Effect::Apply(Delta::new().with(Stat::Power, 2)));
    }

    #[test]
    fn test_effect_default_is_empty_apply() {
        assert_eq!(Effect::default(), Effect::Apply(Delta::new()));
        assert!(!Effect::default().is_reset());
    }

    #[test]
    fn test_stat_diff_amounts() {
        let diff = StatDiff::from_changes(vec![
            StatChange {
                stat: Stat::Hp,
                before: 7,
                after: 8,
            },
            StatChange {
                stat: Stat::Food,
                before: 4,
                after: 3,
            },
        ]);

        assert_eq!(diff.amount(Stat::Hp), 1);
        assert_eq!(diff.amount(Stat::Food), -1);
        assert_eq!(diff.amount(Stat::Loss), 0);
        assert!(diff.has_losses());
    }
}
