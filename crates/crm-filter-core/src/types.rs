//! Core types: opaque ids, semantic field types, logical operators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a condition, assigned by the authoring UI.
pub type ConditionId = u64;

/// Opaque identifier of a group, assigned by the authoring UI.
pub type GroupId = u64;

/// Foreign-key identifier into a reference (lookup) table.
pub type LookupId = i64;

/// How a field's values are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Free-form string matching.
    Text,
    /// Closed value set, matched by identity after normalization.
    Enumerated,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Text => "text",
            SemanticType::Enumerated => "enumerated",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean connective used inside a group and between groups.
///
/// Accepts `AND`/`OR` in upper, lower or title case when deserializing;
/// serializes as upper case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[default]
    #[serde(rename = "AND", alias = "and", alias = "And")]
    And,
    #[serde(rename = "OR", alias = "or", alias = "Or")]
    Or,
}

impl LogicalOperator {
    /// Combine a sequence of results. Short-circuits like `&&` / `||`.
    pub fn combine<I>(self, results: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut results = results.into_iter();
        match self {
            LogicalOperator::And => results.all(|r| r),
            LogicalOperator::Or => results.any(|r| r),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
