//! Record projection: flatten a raw contact row into the label-valued view
//! the filter operators compare against.
//!
//! Rows loaded from the database hold foreign-key identifiers
//! (`job_title_id: 26`) while users filter on labels ("java"). Projection
//! resolves every catalogued field through the supplied lookup maps. An
//! identifier with no resolving label projects to the empty string, never to
//! the identifier itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::catalog::{FieldCatalog, FieldDescriptor};
use crate::types::LookupId;

/// Per-field identifier → label tables, assembled from tenant-scoped
/// reference data. Read-only from the engine's point of view.
///
/// Serialized as `{ "<field>": { "<id>": "<label>" } }`. Every `<id>` must be
/// an integer; a table with any other key fails to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupMaps {
    tables: HashMap<String, HashMap<LookupId, String>>,
}

impl LookupMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single `id → label` entry for `field`.
    pub fn insert(&mut self, field: impl Into<String>, id: LookupId, label: impl Into<String>) {
        self.tables
            .entry(field.into())
            .or_default()
            .insert(id, label.into());
    }

    /// Builder-style variant of [`insert`](Self::insert) for a whole table.
    pub fn with_table<I, L>(mut self, field: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (LookupId, L)>,
        L: Into<String>,
    {
        let table = self.tables.entry(field.into()).or_default();
        for (id, label) in entries {
            table.insert(id, label.into());
        }
        self
    }

    pub fn resolve(&self, field: &str, id: LookupId) -> Option<&str> {
        self.tables.get(field)?.get(&id).map(String::as_str)
    }

    pub fn table(&self, field: &str) -> Option<&HashMap<LookupId, String>> {
        self.tables.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// A record reduced to `field key → plain string`, one entry per catalogued
/// field. Produced per evaluation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectedRecord {
    values: HashMap<String, String>,
}

impl ProjectedRecord {
    /// Projected value of `key`; missing keys read as `""`.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProjectedRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Project one raw record. Total: malformed or unresolvable attributes
/// degrade to `""`.
pub fn project(record: &Value, catalog: &FieldCatalog, lookups: &LookupMaps) -> ProjectedRecord {
    let values = catalog
        .fields()
        .iter()
        .map(|field| (field.key.clone(), project_field(record, field, lookups)))
        .collect();
    ProjectedRecord { values }
}

/// Project a whole record set, preserving order.
pub fn project_all(
    records: &[Value],
    catalog: &FieldCatalog,
    lookups: &LookupMaps,
) -> Vec<ProjectedRecord> {
    records
        .iter()
        .map(|record| project(record, catalog, lookups))
        .collect()
}

fn project_field(record: &Value, field: &FieldDescriptor, lookups: &LookupMaps) -> String {
    if let Some(attr) = &field.identifier_attribute
        && let Some(id) = to_nullable_id(resolve_attr(record, attr))
    {
        return resolve_label(lookups, &field.key, id);
    }

    match resolve_attr(record, &field.key) {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        raw @ (Value::Number(_) | Value::Object(_)) => match to_nullable_id(raw) {
            Some(id) => resolve_label(lookups, &field.key, id),
            None => String::new(),
        },
        Value::Null | Value::Array(_) => String::new(),
    }
}

fn resolve_label(lookups: &LookupMaps, field: &str, id: LookupId) -> String {
    match lookups.resolve(field, id) {
        Some(label) => label.to_string(),
        None => {
            trace!(field, id, "no lookup label for identifier");
            String::new()
        }
    }
}

/// Coerce a loosely-typed identifier into a [`LookupId`].
///
/// Accepts integral numbers, strings of ASCII digits (surrounding whitespace
/// allowed) and objects carrying an `id` or `value` member, as produced by
/// select widgets. Everything else is "no identifier".
pub fn to_nullable_id(value: &Value) -> Option<LookupId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| LookupId::try_from(u).ok()))
            .or_else(|| {
                let f = n.as_f64()?;
                let integral = f.is_finite() && f.fract() == 0.0;
                (integral && f.abs() < LookupId::MAX as f64).then_some(f as LookupId)
            }),
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                trimmed.parse().ok()
            } else {
                None
            }
        }
        Value::Object(obj) => {
            if let Some(id) = obj.get("id") {
                to_nullable_id(id)
            } else {
                obj.get("value").and_then(to_nullable_id)
            }
        }
        Value::Null | Value::Bool(_) | Value::Array(_) => None,
    }
}

/// Resolve a dot-separated attribute path on a record.
///
/// Returns `Value::Null` if any segment is missing.
pub fn resolve_attr<'a>(record: &'a Value, path: &str) -> &'a Value {
    let mut current = record;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(v) => current = v,
            None => return &Value::Null,
        }
    }
    current
}
