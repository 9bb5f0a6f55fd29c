//! Error types for catalog construction and filter validation.
//!
//! Evaluation, projection and description never fail; these errors only
//! surface when building a catalog or filter, or when validating a filter
//! against a catalog.

use thiserror::Error;

use crate::types::{GroupId, SemanticType};

/// Top-level error type for the filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("field catalog must contain at least one field")]
    EmptyCatalog,

    #[error("duplicate field key: {0}")]
    DuplicateField(String),

    #[error("enumerated field '{0}' has no allowed values")]
    EmptyAllowedValues(String),

    #[error("default operator '{operator}' is not valid for default field '{field}'")]
    UnsupportedDefaultOperator { field: String, operator: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("filter must contain at least one group")]
    NoGroups,

    #[error("group {group} must contain at least one condition")]
    EmptyGroup { group: GroupId },

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown operator '{operator}' on field '{field}'")]
    UnknownOperator { field: String, operator: String },

    #[error("operator '{operator}' is not supported for {semantic_type} field '{field}'")]
    UnsupportedOperator {
        field: String,
        operator: String,
        semantic_type: SemanticType,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
