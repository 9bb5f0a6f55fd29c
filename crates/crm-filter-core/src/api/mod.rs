//! Public API: operator registry, record projection, condition and filter
//! evaluation, filter descriptions, and the `FilterEngine` handle.

pub mod condition;
pub mod describe;
pub mod engine;
pub mod filter;
pub mod operator;
pub mod projection;

pub use condition::{CompiledCondition, Condition};
pub use describe::describe_filter;
pub use engine::FilterEngine;
pub use filter::{CompiledFilter, FilterConfig, Group, apply_advanced_filters, is_filter_empty};
pub use operator::{OperatorId, OperatorRef, operators_for};
pub use projection::{LookupMaps, ProjectedRecord, project, project_all, to_nullable_id};
