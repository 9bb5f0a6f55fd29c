//! Field catalog: the immutable registry of filterable contact attributes.
//!
//! A catalog is validated once when it is built and never mutated
//! afterwards. The engine receives it by value at construction, so no
//! tenant's reference data is baked into the evaluator.

pub mod contacts;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::operator::{OperatorId, operators_for};
use crate::error::{self, CatalogError};
use crate::types::SemanticType;

/// One permitted value of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedValue {
    pub value: String,
    pub label: String,
}

impl AllowedValue {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Semantic type of a field, carrying the value set for enumerated fields.
///
/// Encoding the allowed values inside the `Enumerated` variant makes
/// "allowed values present iff enumerated" hold by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Enumerated { allowed_values: Vec<AllowedValue> },
}

/// A single filterable attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Key used by conditions and by projected records.
    pub key: String,
    /// Display label, e.g. `"Job Title"`.
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Raw record attribute holding this field's lookup identifier
    /// (e.g. `job_title_id` for `job_title`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_attribute: Option<String>,
}

impl FieldDescriptor {
    /// Create a free-text field.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FieldKind::Text,
            identifier_attribute: None,
        }
    }

    /// Create an enumerated field from `(value, label)` pairs.
    pub fn enumerated<I, V, L>(key: impl Into<String>, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FieldKind::Enumerated {
                allowed_values: values
                    .into_iter()
                    .map(|(value, label)| AllowedValue::new(value, label))
                    .collect(),
            },
            identifier_attribute: None,
        }
    }

    /// Declare the raw attribute this field reads its identifier from.
    pub fn with_identifier_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.identifier_attribute = Some(attribute.into());
        self
    }

    pub fn semantic_type(&self) -> SemanticType {
        match self.kind {
            FieldKind::Text => SemanticType::Text,
            FieldKind::Enumerated { .. } => SemanticType::Enumerated,
        }
    }

    /// Permitted values; empty for text fields.
    pub fn allowed_values(&self) -> &[AllowedValue] {
        match &self.kind {
            FieldKind::Text => &[],
            FieldKind::Enumerated { allowed_values } => allowed_values,
        }
    }
}

/// Validated, immutable set of filterable fields.
///
/// The first field is the default field for freshly created conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogDefinition", into = "CatalogDefinition")]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
    default_operator: OperatorId,
}

/// Unvalidated catalog as read from configuration. Turn it into a
/// [`FieldCatalog`] with [`FieldCatalog::from_definition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDefinition {
    pub fields: Vec<FieldDescriptor>,
    /// Operator for freshly created conditions; defaults to the first
    /// operator of the default field's type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<OperatorId>,
}

impl FieldCatalog {
    /// Build a catalog. The default operator is the first operator valid for
    /// the default field's semantic type.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, CatalogError> {
        let first = fields.first().ok_or(CatalogError::EmptyCatalog)?;
        let default_operator = operators_for(first.semantic_type())[0];

        let mut index = HashMap::with_capacity(fields.len());
        for (pos, field) in fields.iter().enumerate() {
            if let FieldKind::Enumerated { allowed_values } = &field.kind
                && allowed_values.is_empty()
            {
                return Err(CatalogError::EmptyAllowedValues(field.key.clone()));
            }
            if index.insert(field.key.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateField(field.key.clone()));
            }
        }

        Ok(Self {
            fields,
            index,
            default_operator,
        })
    }

    /// Validate a configured catalog definition.
    pub fn from_definition(definition: CatalogDefinition) -> error::Result<Self> {
        Ok(Self::try_from(definition)?)
    }

    /// Override the operator given to freshly created conditions.
    pub fn with_default_operator(mut self, operator: OperatorId) -> Result<Self, CatalogError> {
        let field = self.default_field();
        if !operator.is_valid_for(field.semantic_type()) {
            return Err(CatalogError::UnsupportedDefaultOperator {
                field: field.key.clone(),
                operator: operator.as_str().to_string(),
            });
        }
        self.default_operator = operator;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.index.get(key).map(|&pos| &self.fields[pos])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn default_field(&self) -> &FieldDescriptor {
        // Non-empty is checked in `new`.
        &self.fields[0]
    }

    pub fn default_operator(&self) -> OperatorId {
        self.default_operator
    }

    /// Semantic type of `key`. Unknown fields are treated as text.
    pub fn semantic_type_of(&self, key: &str) -> SemanticType {
        self.get(key)
            .map(FieldDescriptor::semantic_type)
            .unwrap_or(SemanticType::Text)
    }

    /// Display label of `key`, falling back to the raw key.
    pub fn label_of<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map(|f| f.label.as_str()).unwrap_or(key)
    }
}

impl TryFrom<CatalogDefinition> for FieldCatalog {
    type Error = CatalogError;

    fn try_from(repr: CatalogDefinition) -> Result<Self, Self::Error> {
        let catalog = FieldCatalog::new(repr.fields)?;
        match repr.default_operator {
            Some(op) => catalog.with_default_operator(op),
            None => Ok(catalog),
        }
    }
}

impl From<FieldCatalog> for CatalogDefinition {
    fn from(catalog: FieldCatalog) -> Self {
        CatalogDefinition {
            fields: catalog.fields,
            default_operator: Some(catalog.default_operator),
        }
    }
}
