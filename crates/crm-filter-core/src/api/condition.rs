//! Conditions: single `(field, operator, value)` tests against a projected
//! record.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::catalog::FieldCatalog;
use crate::types::ConditionId;

use super::operator::{OperatorId, OperatorRef};
use super::projection::ProjectedRecord;

/// One leaf test of a filter, as authored in the filter builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub id: ConditionId,
    pub field: String,
    pub operator: OperatorRef,
    /// Operand; ignored by the emptiness operators.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

impl Condition {
    pub fn new(
        id: ConditionId,
        field: impl Into<String>,
        operator: impl Into<OperatorRef>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id,
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// False only for `is_empty` / `is_not_empty`. Unknown operators are
    /// evaluated as `equals` and therefore take an operand.
    pub fn requires_operand(&self) -> bool {
        self.operator
            .known()
            .is_none_or(|op| op.requires_operand())
    }

    /// The operand as evaluation sees it: blank for emptiness checks.
    pub fn effective_value(&self) -> &str {
        if self.requires_operand() { &self.value } else { "" }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A condition resolved against a catalog: the operator is guaranteed valid
/// for the field's semantic type and the operand is already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCondition {
    field: String,
    operator: OperatorId,
    needle: String,
}

impl CompiledCondition {
    /// Resolve `condition` against `catalog`.
    ///
    /// Unknown fields are evaluated as text. Unknown operators, and operators
    /// the field's semantic type does not support, fall back to `equals`.
    pub fn compile(condition: &Condition, catalog: &FieldCatalog) -> Self {
        let semantic_type = catalog.semantic_type_of(&condition.field);
        if !catalog.contains(&condition.field) {
            warn!(field = %condition.field, "condition references a field outside the catalog");
        }

        let operator = condition.operator.effective(semantic_type);
        if condition.operator.known() != Some(operator) {
            warn!(
                field = %condition.field,
                operator = %condition.operator,
                %semantic_type,
                "operator not supported for field, evaluating as equals"
            );
        }

        let needle = if operator.requires_operand() {
            normalize(&condition.value)
        } else {
            String::new()
        };

        Self {
            field: condition.field.clone(),
            operator,
            needle,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> OperatorId {
        self.operator
    }

    /// Evaluate against one projected record.
    pub fn matches(&self, record: &ProjectedRecord) -> bool {
        let value = normalize(record.get(&self.field));
        let needle = self.needle.as_str();

        match self.operator {
            OperatorId::IsEmpty => value.is_empty(),
            OperatorId::IsNotEmpty => !value.is_empty(),
            OperatorId::Equals => value == needle,
            OperatorId::NotEquals => value != needle,
            // An empty needle is a substring of everything.
            OperatorId::Contains => value.contains(needle),
            OperatorId::NotContains => !value.contains(needle),
            OperatorId::StartsWith => value.starts_with(needle),
            OperatorId::EndsWith => value.ends_with(needle),
        }
    }
}

/// Evaluate a single condition against a projected record.
///
/// Convenience wrapper that compiles on every call; filters evaluated over
/// many records should go through [`CompiledCondition`].
pub fn evaluate(condition: &Condition, record: &ProjectedRecord, catalog: &FieldCatalog) -> bool {
    CompiledCondition::compile(condition, catalog).matches(record)
}

/// Trim and lower-case for case-insensitive comparison.
pub(crate) fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
