//! Input loading and the filter run itself.

use std::path::{Path, PathBuf};

use crm_filter_core::api::{FilterConfig, FilterEngine, LookupMaps, ProjectedRecord};
use crm_filter_core::catalog::FieldCatalog;
use crm_filter_core::catalog::contacts::contacts_catalog;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ConsoleError;

/// Where to read each input from. Only `records` is mandatory.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub records: PathBuf,
    pub lookups: Option<PathBuf>,
    pub filter: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Everything the engine needs, loaded and parsed.
pub struct Inputs {
    pub records: Vec<Value>,
    pub lookups: LookupMaps,
    pub filter: Option<FilterConfig>,
    pub catalog: FieldCatalog,
}

impl Inputs {
    pub fn load(sources: &Sources) -> Result<Self, ConsoleError> {
        let catalog = match &sources.catalog {
            Some(path) => FieldCatalog::from_definition(load_json(path)?)?,
            None => contacts_catalog(),
        };
        let records: Vec<Value> = load_json(&sources.records)?;
        let lookups = match &sources.lookups {
            Some(path) => load_json(path)?,
            None => LookupMaps::new(),
        };
        let filter = sources.filter.as_deref().map(load_json).transpose()?;

        debug!(
            records = records.len(),
            fields = catalog.len(),
            has_filter = filter.is_some(),
            "inputs loaded"
        );
        Ok(Self {
            records,
            lookups,
            filter,
            catalog,
        })
    }
}

/// Result of one filter run.
pub struct Report {
    pub description: String,
    pub total: usize,
    pub matched: Vec<Value>,
    pub projected: Vec<ProjectedRecord>,
}

/// Apply the loaded filter. With `strict`, the filter must first pass
/// catalog validation.
pub fn run(inputs: &Inputs, strict: bool) -> Result<(FilterEngine, Report), ConsoleError> {
    let engine = FilterEngine::new(inputs.catalog.clone());
    let filter = match &inputs.filter {
        Some(filter) => filter.clone(),
        None => engine.default_filter(),
    };
    if strict {
        engine.validate(&filter)?;
    }

    let matched: Vec<Value> = engine
        .apply_advanced_filters(&inputs.records, &filter, &inputs.lookups)
        .into_iter()
        .cloned()
        .collect();
    let projected = engine.project_all(&matched, &inputs.lookups);
    info!(total = inputs.records.len(), matched = matched.len(), "filter run complete");

    let report = Report {
        description: engine.describe_filter(&filter),
        total: inputs.records.len(),
        matched,
        projected,
    };
    Ok((engine, report))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConsoleError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConsoleError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConsoleError::Json {
        path: display,
        source,
    })
}
