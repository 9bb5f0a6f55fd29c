//! Human-readable filter summaries for the results banner.

use crate::catalog::FieldCatalog;

use super::condition::Condition;
use super::filter::{FilterConfig, Group, is_filter_empty};
use super::operator::OperatorRef;

/// Summary shown when no filter is active.
pub const NO_FILTERS: &str = "No filters applied";

/// Render `config` as a single line, e.g.
/// `(First Name starts with "Jo" AND City equals "Austin") OR Email is empty`.
///
/// Fields and operators the catalog or registry does not know are printed
/// by their raw identifiers. Never fails.
pub fn describe_filter(config: &FilterConfig, catalog: &FieldCatalog) -> String {
    if is_filter_empty(config, catalog) {
        return NO_FILTERS.to_string();
    }

    let parenthesize = config.groups().len() > 1;
    let separator = format!(" {} ", config.group_operator());
    config
        .groups()
        .iter()
        .map(|group| describe_group(group, catalog, parenthesize))
        .collect::<Vec<_>>()
        .join(&separator)
}

fn describe_group(group: &Group, catalog: &FieldCatalog, parenthesize: bool) -> String {
    let separator = format!(" {} ", group.logical_operator());
    let body = group
        .conditions()
        .iter()
        .map(|condition| describe_condition(condition, catalog))
        .collect::<Vec<_>>()
        .join(&separator);

    if parenthesize && group.conditions().len() > 1 {
        format!("({body})")
    } else {
        body
    }
}

fn describe_condition(condition: &Condition, catalog: &FieldCatalog) -> String {
    let label = catalog.label_of(&condition.field);
    let operator = match &condition.operator {
        OperatorRef::Known(op) => op.phrase(catalog.semantic_type_of(&condition.field)),
        OperatorRef::Unknown(raw) => raw.as_str(),
    };

    if condition.requires_operand() {
        format!("{label} {operator} \"{}\"", condition.value)
    } else {
        format!("{label} {operator}")
    }
}
