//! Stat definitions and their inclusive bounds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::RuleError;

/// A single bounded integer dimension of player state.
///
/// Declaration order is the canonical stat order used for diffs and
/// serialized maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    /// Elapsed in-story days.
    Day,
    /// Survival health.
    Hp,
    /// Food reserve.
    Food,
    /// Self-reliance and strength accumulation.
    Power,
    /// Isolation accumulation.
    Distance,
    /// Psychological damage accumulation.
    Loss,
    /// Number of companions (extended ruleset only).
    Party,
    /// Companion trust (extended ruleset only).
    Trust,
}

impl Stat {
    /// Every stat, in canonical order.
    pub const ALL: [Stat; 8] = [
        Stat::Day,
        Stat::Hp,
        Stat::Food,
        Stat::Power,
        Stat::Distance,
        Stat::Loss,
        Stat::Party,
        Stat::Trust,
    ];

    /// The name used in story content and condition keys.
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Day => "day",
            Stat::Hp => "hp",
            Stat::Food => "food",
            Stat::Power => "power",
            Stat::Distance => "distance",
            Stat::Loss => "loss",
            Stat::Party => "party",
            Stat::Trust => "trust",
        }
    }

    /// Inclusive bounds every value of this stat is clamped into.
    pub fn bounds(&self) -> StatBounds {
        match self {
            Stat::Day => StatBounds::new(1, 9999),
            Stat::Party => StatBounds::new(0, 4),
            Stat::Hp | Stat::Food | Stat::Power | Stat::Distance | Stat::Loss | Stat::Trust => {
                StatBounds::new(0, 10)
            }
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stat {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| RuleError::UnknownStat(s.to_string()))
    }
}

impl Serialize for Stat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Stat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive `[min, max]` range for a stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Saturate `value` into this range.
    pub fn clamp(&self, value: i32) -> i32 {
        clamp(value, self.min, self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Standard saturating clamp: the result always satisfies `lo <= v' <= hi`.
pub fn clamp(value: i32, lo: i32, hi: i32) -> i32 {
    value.max(lo).min(hi)
}
