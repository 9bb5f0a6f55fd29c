//! Operator registry: the comparison operators each semantic type supports,
//! with their labels, symbols and description phrases.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::SemanticType;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorId {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

/// Operators for free-text fields, in presentation order.
pub const TEXT_OPERATORS: [OperatorId; 8] = [
    OperatorId::Equals,
    OperatorId::NotEquals,
    OperatorId::Contains,
    OperatorId::NotContains,
    OperatorId::StartsWith,
    OperatorId::EndsWith,
    OperatorId::IsEmpty,
    OperatorId::IsNotEmpty,
];

/// Operators for enumerated fields, in presentation order.
pub const ENUMERATED_OPERATORS: [OperatorId; 4] = [
    OperatorId::Equals,
    OperatorId::NotEquals,
    OperatorId::IsEmpty,
    OperatorId::IsNotEmpty,
];

/// Ordered operators supported by `semantic_type`. Never empty.
pub fn operators_for(semantic_type: SemanticType) -> &'static [OperatorId] {
    match semantic_type {
        SemanticType::Text => &TEXT_OPERATORS,
        SemanticType::Enumerated => &ENUMERATED_OPERATORS,
    }
}

impl OperatorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorId::Equals => "equals",
            OperatorId::NotEquals => "not_equals",
            OperatorId::Contains => "contains",
            OperatorId::NotContains => "not_contains",
            OperatorId::StartsWith => "starts_with",
            OperatorId::EndsWith => "ends_with",
            OperatorId::IsEmpty => "is_empty",
            OperatorId::IsNotEmpty => "is_not_empty",
        }
    }

    /// Parse a wire identifier such as `"not_contains"`.
    pub fn parse(raw: &str) -> Option<Self> {
        TEXT_OPERATORS.into_iter().find(|op| op.as_str() == raw)
    }

    pub fn is_valid_for(&self, semantic_type: SemanticType) -> bool {
        operators_for(semantic_type).contains(self)
    }

    /// False for the emptiness checks, which ignore the condition value.
    pub fn requires_operand(&self) -> bool {
        !matches!(self, OperatorId::IsEmpty | OperatorId::IsNotEmpty)
    }

    /// The operator whose result is always the logical negation of this one.
    pub fn negation(&self) -> Option<OperatorId> {
        match self {
            OperatorId::Equals => Some(OperatorId::NotEquals),
            OperatorId::NotEquals => Some(OperatorId::Equals),
            OperatorId::Contains => Some(OperatorId::NotContains),
            OperatorId::NotContains => Some(OperatorId::Contains),
            OperatorId::IsEmpty => Some(OperatorId::IsNotEmpty),
            OperatorId::IsNotEmpty => Some(OperatorId::IsEmpty),
            OperatorId::StartsWith | OperatorId::EndsWith => None,
        }
    }

    /// Menu label shown by the filter builder.
    pub fn label(&self, semantic_type: SemanticType) -> &'static str {
        match (self, semantic_type) {
            (OperatorId::Equals, SemanticType::Enumerated) => "Is",
            (OperatorId::NotEquals, SemanticType::Enumerated) => "Is Not",
            (OperatorId::Equals, _) => "Equals",
            (OperatorId::NotEquals, _) => "Not Equals",
            (OperatorId::Contains, _) => "Contains",
            (OperatorId::NotContains, _) => "Does Not Contain",
            (OperatorId::StartsWith, _) => "Starts With",
            (OperatorId::EndsWith, _) => "Ends With",
            (OperatorId::IsEmpty, _) => "Is Empty",
            (OperatorId::IsNotEmpty, _) => "Is Not Empty",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorId::Equals => "=",
            OperatorId::NotEquals => "≠",
            OperatorId::Contains => "⊃",
            OperatorId::NotContains => "⊅",
            OperatorId::StartsWith => "⊲",
            OperatorId::EndsWith => "⊳",
            OperatorId::IsEmpty => "∅",
            OperatorId::IsNotEmpty => "≠∅",
        }
    }

    /// Lower-case phrase used in filter descriptions.
    pub fn phrase(&self, semantic_type: SemanticType) -> &'static str {
        match (self, semantic_type) {
            (OperatorId::Equals, SemanticType::Enumerated) => "is",
            (OperatorId::NotEquals, SemanticType::Enumerated) => "is not",
            (OperatorId::Equals, _) => "equals",
            (OperatorId::NotEquals, _) => "does not equal",
            (OperatorId::Contains, _) => "contains",
            (OperatorId::NotContains, _) => "does not contain",
            (OperatorId::StartsWith, _) => "starts with",
            (OperatorId::EndsWith, _) => "ends with",
            (OperatorId::IsEmpty, _) => "is empty",
            (OperatorId::IsNotEmpty, _) => "is not empty",
        }
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operator as authored on a condition.
///
/// Filters arrive from outside the engine, so an operator id the registry
/// does not know is kept verbatim rather than rejected. Evaluation treats it
/// as `equals`; descriptions print the raw id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperatorRef {
    Known(OperatorId),
    Unknown(String),
}

impl OperatorRef {
    pub fn known(&self) -> Option<OperatorId> {
        match self {
            OperatorRef::Known(op) => Some(*op),
            OperatorRef::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OperatorRef::Known(op) => op.as_str(),
            OperatorRef::Unknown(raw) => raw,
        }
    }

    /// The operator evaluation will actually apply for a field of
    /// `semantic_type`: the authored one when it is known and valid,
    /// `equals` otherwise.
    pub fn effective(&self, semantic_type: SemanticType) -> OperatorId {
        match self.known() {
            Some(op) if op.is_valid_for(semantic_type) => op,
            _ => OperatorId::Equals,
        }
    }
}

impl From<OperatorId> for OperatorRef {
    fn from(op: OperatorId) -> Self {
        OperatorRef::Known(op)
    }
}

impl From<&str> for OperatorRef {
    fn from(raw: &str) -> Self {
        match OperatorId::parse(raw) {
            Some(op) => OperatorRef::Known(op),
            None => OperatorRef::Unknown(raw.to_string()),
        }
    }
}

impl fmt::Display for OperatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
