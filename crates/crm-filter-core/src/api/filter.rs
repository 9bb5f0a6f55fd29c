//! Filter groups and configurations, and the group/filter evaluator.
//!
//! A [`FilterConfig`] is a list of groups combined by one logical operator;
//! each [`Group`] is a list of conditions combined by its own operator.
//! Both lists are non-empty by construction, including when deserialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::FieldCatalog;
use crate::error::FilterError;
use crate::types::{GroupId, LogicalOperator};

use super::condition::{CompiledCondition, Condition};
use super::operator::OperatorRef;
use super::projection::{LookupMaps, ProjectedRecord, project};

/// Conditions combined by one shared AND/OR operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GroupRepr", rename_all = "camelCase")]
pub struct Group {
    id: GroupId,
    logical_operator: LogicalOperator,
    conditions: Vec<Condition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupRepr {
    #[serde(default)]
    id: GroupId,
    #[serde(default, alias = "operator")]
    logical_operator: LogicalOperator,
    conditions: Vec<Condition>,
}

impl Group {
    /// Create a group. Fails if `conditions` is empty.
    pub fn new(
        id: GroupId,
        logical_operator: LogicalOperator,
        conditions: Vec<Condition>,
    ) -> Result<Self, FilterError> {
        if conditions.is_empty() {
            return Err(FilterError::EmptyGroup { group: id });
        }
        Ok(Self {
            id,
            logical_operator,
            conditions,
        })
    }

    /// A group holding exactly one condition.
    pub fn single(id: GroupId, condition: Condition) -> Self {
        Self {
            id,
            logical_operator: LogicalOperator::And,
            conditions: vec![condition],
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn logical_operator(&self) -> LogicalOperator {
        self.logical_operator
    }

    /// Never empty.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl TryFrom<GroupRepr> for Group {
    type Error = FilterError;

    fn try_from(repr: GroupRepr) -> Result<Self, Self::Error> {
        Group::new(repr.id, repr.logical_operator, repr.conditions)
    }
}

/// The full authored query: groups plus the operator combining them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilterConfigRepr", rename_all = "camelCase")]
pub struct FilterConfig {
    groups: Vec<Group>,
    group_operator: LogicalOperator,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterConfigRepr {
    groups: Vec<Group>,
    #[serde(default)]
    group_operator: LogicalOperator,
}

impl FilterConfig {
    /// Create a filter. Fails if `groups` is empty.
    pub fn new(groups: Vec<Group>, group_operator: LogicalOperator) -> Result<Self, FilterError> {
        if groups.is_empty() {
            return Err(FilterError::NoGroups);
        }
        Ok(Self {
            groups,
            group_operator,
        })
    }

    /// The configuration a freshly opened filter builder starts from: one
    /// group with one condition on the catalog's default field and default
    /// operator, with a blank value.
    pub fn default_for(catalog: &FieldCatalog) -> Self {
        let condition = Condition::new(
            1,
            catalog.default_field().key.clone(),
            catalog.default_operator(),
            "",
        );
        Self {
            groups: vec![Group::single(1, condition)],
            group_operator: LogicalOperator::And,
        }
    }

    /// Never empty.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_operator(&self) -> LogicalOperator {
        self.group_operator
    }

    /// Check every condition against `catalog`, reporting the first field
    /// the catalog does not know, operator the registry does not know, or
    /// operator the field's semantic type does not support.
    pub fn validate(&self, catalog: &FieldCatalog) -> Result<(), FilterError> {
        for condition in self.groups.iter().flat_map(|g| g.conditions.iter()) {
            let field = catalog
                .get(&condition.field)
                .ok_or_else(|| FilterError::UnknownField(condition.field.clone()))?;
            match &condition.operator {
                OperatorRef::Unknown(raw) => {
                    return Err(FilterError::UnknownOperator {
                        field: field.key.clone(),
                        operator: raw.clone(),
                    });
                }
                OperatorRef::Known(op) if !op.is_valid_for(field.semantic_type()) => {
                    return Err(FilterError::UnsupportedOperator {
                        field: field.key.clone(),
                        operator: op.as_str().to_string(),
                        semantic_type: field.semantic_type(),
                    });
                }
                OperatorRef::Known(_) => {}
            }
        }
        Ok(())
    }
}

impl TryFrom<FilterConfigRepr> for FilterConfig {
    type Error = FilterError;

    fn try_from(repr: FilterConfigRepr) -> Result<Self, Self::Error> {
        FilterConfig::new(repr.groups, repr.group_operator)
    }
}

/// True iff `config` is the untouched default filter: exactly one group
/// holding exactly one condition on the catalog's default field, with an
/// operand-taking operator and a blank value.
///
/// Emptiness checks count as active, as do extra groups or conditions.
pub fn is_filter_empty(config: &FilterConfig, catalog: &FieldCatalog) -> bool {
    let [group] = config.groups() else {
        return false;
    };
    let [condition] = group.conditions() else {
        return false;
    };
    condition.field == catalog.default_field().key
        && condition.requires_operand()
        && condition.value.trim().is_empty()
}

/// A [`FilterConfig`] resolved against a catalog, ready to be evaluated
/// against many projected records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFilter {
    groups: Vec<CompiledGroup>,
    group_operator: LogicalOperator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CompiledGroup {
    logical_operator: LogicalOperator,
    conditions: Vec<CompiledCondition>,
}

impl CompiledGroup {
    fn matches(&self, record: &ProjectedRecord) -> bool {
        self.logical_operator
            .combine(self.conditions.iter().map(|c| c.matches(record)))
    }
}

impl CompiledFilter {
    pub fn compile(config: &FilterConfig, catalog: &FieldCatalog) -> Self {
        let groups = config
            .groups()
            .iter()
            .map(|group| CompiledGroup {
                logical_operator: group.logical_operator(),
                conditions: group
                    .conditions()
                    .iter()
                    .map(|c| CompiledCondition::compile(c, catalog))
                    .collect(),
            })
            .collect();
        Self {
            groups,
            group_operator: config.group_operator(),
        }
    }

    /// Inclusion decision for one projected record.
    pub fn matches(&self, record: &ProjectedRecord) -> bool {
        self.group_operator
            .combine(self.groups.iter().map(|g| g.matches(record)))
    }
}

/// Filter `records`, returning the order-preserving subsequence that
/// satisfies `config`. The default (empty) filter returns every record.
pub fn apply_advanced_filters<'r>(
    records: &'r [Value],
    config: &FilterConfig,
    catalog: &FieldCatalog,
    lookups: &LookupMaps,
) -> Vec<&'r Value> {
    if is_filter_empty(config, catalog) {
        debug!(total = records.len(), "filter is empty, returning all records");
        return records.iter().collect();
    }

    let compiled = CompiledFilter::compile(config, catalog);
    debug!(
        total = records.len(),
        groups = config.groups().len(),
        group_operator = %config.group_operator(),
        "applying advanced filter"
    );

    let matched: Vec<&Value> = records
        .iter()
        .filter(|record| compiled.matches(&project(record, catalog, lookups)))
        .collect();

    debug!(total = records.len(), matched = matched.len(), "advanced filter applied");
    matched
}
