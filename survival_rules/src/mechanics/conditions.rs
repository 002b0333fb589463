//! Choice gating: a closed two-operator predicate language over stats.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::RuleError;
use crate::player_state::{PlayerState, Stat};

/// Comparison operators available to conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `_gte`: stat must be at least the threshold.
    AtLeast,
    /// `_lte`: stat must be at most the threshold.
    AtMost,
}

impl Comparison {
    pub fn suffix(&self) -> &'static str {
        match self {
            Comparison::AtLeast => "_gte",
            Comparison::AtMost => "_lte",
        }
    }

    pub fn holds(&self, value: i32, threshold: i32) -> bool {
        match self {
            Comparison::AtLeast => value >= threshold,
            Comparison::AtMost => value <= threshold,
        }
    }
}

/// A single `stat <op> threshold` test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub stat: Stat,
    pub comparison: Comparison,
    pub threshold: i32,
}

impl Clause {
    pub fn at_least(stat: Stat, threshold: i32) -> Self {
        Self {
            stat,
            comparison: Comparison::AtLeast,
            threshold,
        }
    }

    pub fn at_most(stat: Stat, threshold: i32) -> Self {
        Self {
            stat,
            comparison: Comparison::AtMost,
            threshold,
        }
    }

    /// Parse a content key such as `power_gte`.
    pub fn parse(key: &str, threshold: i32) -> Result<Self, RuleError> {
        let (name, comparison) = if let Some(name) = key.strip_suffix("_gte") {
            (name, Comparison::AtLeast)
        } else if let Some(name) = key.strip_suffix("_lte") {
            (name, Comparison::AtMost)
        } else {
            return Err(RuleError::MalformedConditionKey(key.to_string()));
        };

        Ok(Self {
            stat: name.parse()?,
            comparison,
            threshold,
        })
    }

    /// The content key this clause is written as.
    pub fn key(&self) -> String {
        format!("{}{}", self.stat.name(), self.comparison.suffix())
    }

    pub fn holds(&self, state: &PlayerState) -> bool {
        self.comparison.holds(state.get(self.stat), self.threshold)
    }
}

/// Conjunction of clauses. Empty means always eligible.
///
/// Content spells conditions as `{ power_gte = 3, distance_lte = 7 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Build a condition from content keys, rejecting anything outside the
    /// `_gte`/`_lte` grammar.
    pub fn from_keys<'a>(
        keys: impl IntoIterator<Item = (&'a str, i32)>,
    ) -> Result<Self, RuleError> {
        let clauses = keys
            .into_iter()
            .map(|(key, threshold)| Clause::parse(key, threshold))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clauses })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether every clause holds against `state`.
    pub fn meets(&self, state: &PlayerState) -> bool {
        self.clauses.iter().all(|clause| clause.holds(state))
    }
}

impl TryFrom<BTreeMap<String, i32>> for Condition {
    type Error = RuleError;

    fn try_from(keys: BTreeMap<String, i32>) -> Result<Self, Self::Error> {
        Condition::from_keys(keys.iter().map(|(key, value)| (key.as_str(), *value)))
    }
}

impl From<Condition> for BTreeMap<String, i32> {
    fn from(condition: Condition) -> Self {
        condition
            .clauses
            .iter()
            .map(|clause| (clause.key(), clause.threshold))
            .collect()
    }
}

/// Gate check for an optional condition; no condition is vacuously true.
pub fn meets(state: &PlayerState, condition: Option<&Condition>) -> bool {
    condition.map_or(true, |c| c.meets(state))
}
