//! # crm-filter-core
//!
//! The advanced filter engine behind the contacts screen of a multi-tenant
//! recruiting CRM.
//!
//! Users author nested AND/OR queries against human-readable labels
//! ("Job Title contains java"), while contact rows store foreign-key
//! identifiers into lookup tables. The engine projects each raw record into
//! plain labels through caller-supplied lookup maps, then evaluates the
//! filter against the projection, entirely in memory.
//!
//! ## Quick Start
//!
//! ```
//! use crm_filter_core::api::{Condition, FilterConfig, FilterEngine, Group, LookupMaps, OperatorId};
//! use crm_filter_core::catalog::contacts::contacts_catalog;
//! use crm_filter_core::types::LogicalOperator;
//! use serde_json::json;
//!
//! let engine = FilterEngine::new(contacts_catalog());
//!
//! let mut lookups = LookupMaps::new();
//! lookups.insert("job_title", 26, "Java Full Stack Developer");
//! lookups.insert("job_title", 55, "Registered Nurse (RN)");
//!
//! let records = vec![
//!     json!({"id": 1, "first_name": "John", "job_title_id": 26}),
//!     json!({"id": 2, "first_name": "Jane", "job_title_id": 55}),
//! ];
//!
//! let filter = FilterConfig::new(
//!     vec![Group::single(1, Condition::new(1, "job_title", OperatorId::Contains, "java"))],
//!     LogicalOperator::And,
//! )
//! .unwrap();
//!
//! let matched = engine.apply_advanced_filters(&records, &filter, &lookups);
//! assert_eq!(matched.len(), 1);
//! assert_eq!(matched[0]["first_name"], "John");
//! assert_eq!(engine.describe_filter(&filter), "Job Title contains \"java\"");
//! ```

pub mod api;
pub mod catalog;
pub mod error;
pub mod types;
