//! `FilterEngine`: a catalog-bound handle over the filter operations.

use serde_json::Value;

use crate::catalog::{CatalogDefinition, FieldCatalog};
use crate::error::Result;

use super::condition::{self, Condition};
use super::describe;
use super::filter::{self, CompiledFilter, FilterConfig};
use super::projection::{self, LookupMaps, ProjectedRecord};

/// The advanced filter engine, bound to one immutable field catalog.
///
/// Every operation is a pure function of its arguments, so one engine can
/// be shared freely across threads.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    catalog: FieldCatalog,
}

impl FilterEngine {
    pub fn new(catalog: FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Build an engine from an unvalidated catalog definition.
    pub fn from_definition(definition: CatalogDefinition) -> Result<Self> {
        Ok(Self::new(FieldCatalog::from_definition(definition)?))
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// The untouched filter a new builder session starts from.
    pub fn default_filter(&self) -> FilterConfig {
        FilterConfig::default_for(&self.catalog)
    }

    pub fn project(&self, record: &Value, lookups: &LookupMaps) -> ProjectedRecord {
        projection::project(record, &self.catalog, lookups)
    }

    /// Project a record set once, for callers that filter it repeatedly.
    pub fn project_all(&self, records: &[Value], lookups: &LookupMaps) -> Vec<ProjectedRecord> {
        projection::project_all(records, &self.catalog, lookups)
    }

    pub fn evaluate(&self, condition: &Condition, record: &ProjectedRecord) -> bool {
        condition::evaluate(condition, record, &self.catalog)
    }

    pub fn compile(&self, config: &FilterConfig) -> CompiledFilter {
        CompiledFilter::compile(config, &self.catalog)
    }

    pub fn validate(&self, config: &FilterConfig) -> Result<()> {
        Ok(config.validate(&self.catalog)?)
    }

    pub fn is_filter_empty(&self, config: &FilterConfig) -> bool {
        filter::is_filter_empty(config, &self.catalog)
    }

    /// See [`filter::apply_advanced_filters`].
    pub fn apply_advanced_filters<'r>(
        &self,
        records: &'r [Value],
        config: &FilterConfig,
        lookups: &LookupMaps,
    ) -> Vec<&'r Value> {
        filter::apply_advanced_filters(records, config, &self.catalog, lookups)
    }

    pub fn describe_filter(&self, config: &FilterConfig) -> String {
        describe::describe_filter(config, &self.catalog)
    }
}
