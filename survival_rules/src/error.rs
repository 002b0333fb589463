//! Errors raised while reading rule data from story content.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown stat '{0}'")]
    UnknownStat(String),

    /// Condition keys must be `<stat>_gte` or `<stat>_lte`.
    #[error("malformed condition key '{0}', expected '<stat>_gte' or '<stat>_lte'")]
    MalformedConditionKey(String),
}
