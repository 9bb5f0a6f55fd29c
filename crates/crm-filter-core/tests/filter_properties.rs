//! Integration tests: end-to-end filtering of contact rows through lookup
//! projection, plus the algebraic properties the filter builder relies on.

use serde_json::{Value, json};

use crm_filter_core::api::{
    Condition, FilterConfig, FilterEngine, Group, LookupMaps, OperatorId, operators_for,
};
use crm_filter_core::catalog::contacts::contacts_catalog;
use crm_filter_core::types::{LogicalOperator, SemanticType};

fn engine() -> FilterEngine {
    FilterEngine::new(contacts_catalog())
}

fn lookups() -> LookupMaps {
    LookupMaps::new()
        .with_table(
            "job_title",
            [
                (26, "Java Full Stack Developer"),
                (55, "Registered Nurse (RN)"),
                (61, "JavaScript Engineer"),
            ],
        )
        .with_table("visa_status", [(32, "OPT"), (34, "H1B"), (36, "GC")])
        .with_table("status", [(1, "Initial Contact"), (7, "Placed into Job")])
}

fn john_and_jane() -> Vec<Value> {
    vec![
        json!({"id": 1, "first_name": "John", "job_title_id": 26, "visa_status_id": 34}),
        json!({"id": 2, "first_name": "Jane", "job_title_id": 55, "visa_status_id": 32}),
    ]
}

fn roster() -> Vec<Value> {
    vec![
        json!({"id": 1, "first_name": "John", "last_name": "Doe", "email": "john@example.com", "job_title_id": 26, "visa_status_id": 34, "workflow_status_id": 1}),
        json!({"id": 2, "first_name": "Jane", "last_name": "Smith", "email": "jane@example.com", "job_title_id": 55, "visa_status_id": 32, "workflow_status_id": 7}),
        json!({"id": 3, "first_name": "Bob", "last_name": "Johnson", "email": "bob@test.com", "job_title_id": 61, "visa_status_id": null, "workflow_status_id": 1}),
        json!({"id": 4, "first_name": "Alice", "last_name": "Williams", "email": null, "job_title_id": 999, "visa_status_id": 36}),
        json!({"id": 5, "first_name": "  ", "last_name": "O'Brien", "email": "  OBRIEN@TEST.COM ", "city": "Austin"}),
    ]
}

fn ids(records: &[&Value]) -> Vec<i64> {
    records.iter().map(|r| r["id"].as_i64().unwrap()).collect()
}

fn one(field: &str, operator: OperatorId, value: &str) -> FilterConfig {
    FilterConfig::new(
        vec![Group::single(1, Condition::new(1, field, operator, value))],
        LogicalOperator::And,
    )
    .unwrap()
}

fn group_of(op: LogicalOperator, conditions: Vec<Condition>) -> FilterConfig {
    FilterConfig::new(vec![Group::new(1, op, conditions).unwrap()], LogicalOperator::And).unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_and_group_selects_john() {
    let records = john_and_jane();
    let config = group_of(
        LogicalOperator::And,
        vec![
            Condition::new(1, "job_title", OperatorId::Contains, "java"),
            Condition::new(2, "visa_status", OperatorId::Equals, "H1B"),
        ],
    );
    let matched = engine().apply_advanced_filters(&records, &config, &lookups());
    assert_eq!(ids(&matched), vec![1]);
}

#[test]
fn test_scenario_or_group_selects_both() {
    let records = john_and_jane();
    let config = group_of(
        LogicalOperator::Or,
        vec![
            Condition::new(1, "job_title", OperatorId::Contains, "java"),
            Condition::new(2, "visa_status", OperatorId::Equals, "OPT"),
        ],
    );
    let matched = engine().apply_advanced_filters(&records, &config, &lookups());
    assert_eq!(ids(&matched), vec![1, 2]);
}

#[test]
fn test_identifier_resolution_drives_text_match() {
    let records = john_and_jane();
    let config = one("job_title", OperatorId::Contains, "java");
    let matched = engine().apply_advanced_filters(&records, &config, &lookups());
    assert_eq!(ids(&matched), vec![1]);
}

#[test]
fn test_unresolved_identifier_never_matches_its_digits() {
    // Alice's job_title_id 999 has no label; "999" must not leak into matching.
    let records = roster();
    let config = one("job_title", OperatorId::Contains, "999");
    assert!(engine().apply_advanced_filters(&records, &config, &lookups()).is_empty());

    let config = one("job_title", OperatorId::IsEmpty, "");
    let matched = engine().apply_advanced_filters(&records, &config, &lookups());
    assert_eq!(ids(&matched), vec![4, 5]);
}

#[test]
fn test_describe_starts_with_scenario() {
    let text = engine().describe_filter(&one("first_name", OperatorId::StartsWith, "Jo"));
    assert!(text.contains("First Name"), "{text}");
    assert!(text.contains("starts with"), "{text}");
    assert!(text.contains("Jo"), "{text}");
}

#[test]
fn test_multi_group_filter_from_builder_json() {
    let config: FilterConfig = serde_json::from_value(json!({
        "groups": [
            {
                "id": 1,
                "logicalOperator": "AND",
                "conditions": [
                    {"id": 1, "field": "status", "operator": "equals", "value": "Initial Contact"},
                    {"id": 2, "field": "visa_status", "operator": "is_empty", "value": ""}
                ]
            },
            {
                "id": 2,
                "logicalOperator": "AND",
                "conditions": [
                    {"id": 3, "field": "city", "operator": "equals", "value": "austin"}
                ]
            }
        ],
        "groupOperator": "OR"
    }))
    .unwrap();

    let records = roster();
    let matched = engine().apply_advanced_filters(&records, &config, &lookups());
    assert_eq!(ids(&matched), vec![3, 5]);
    assert_eq!(
        engine().describe_filter(&config),
        "(Status is \"Initial Contact\" AND Visa Status is empty) OR City equals \"austin\""
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_default_filter_is_identity() {
    let engine = engine();
    let records = roster();
    let matched = engine.apply_advanced_filters(&records, &engine.default_filter(), &lookups());
    assert_eq!(matched.len(), records.len());
    assert!(matched.iter().zip(&records).all(|(m, r)| std::ptr::eq(*m, r)));
}

#[test]
fn test_equals_includes_exact_match_and_not_equals_is_complement() {
    let engine = engine();
    let records = roster();
    let lookups = lookups();
    let projected = engine.project_all(&records, &lookups);

    for (record, proj) in records.iter().zip(&projected) {
        let value = proj.get("job_title").to_string();
        let eq = one("job_title", OperatorId::Equals, &value);
        let ne = one("job_title", OperatorId::NotEquals, &value);

        let eq_hits = engine.apply_advanced_filters(&records, &eq, &lookups);
        assert!(eq_hits.iter().any(|r| std::ptr::eq(*r, record)));

        let ne_hits = engine.apply_advanced_filters(&records, &ne, &lookups);
        assert_eq!(eq_hits.len() + ne_hits.len(), records.len());
        assert!(eq_hits.iter().all(|r| !ne_hits.iter().any(|n| std::ptr::eq(*r, *n))));
    }
}

#[test]
fn test_contains_is_reflexive_on_substrings() {
    let engine = engine();
    let lookups = lookups();
    let record = json!({"job_title_id": 26});
    let projected = engine.project(&record, &lookups);
    let label = projected.get("job_title");

    for start in 0..label.len() {
        for end in start..=label.len() {
            let needle = label[start..end].to_uppercase();
            let condition = Condition::new(1, "job_title", OperatorId::Contains, needle);
            assert!(engine.evaluate(&condition, &projected));
        }
    }
}

#[test]
fn test_negated_operators_are_logical_negations() {
    let engine = engine();
    let lookups = lookups();
    let projected = engine.project_all(&roster(), &lookups);
    let probes = ["", "java", "JOHN", "o", "@test.com", "H1B", "zzz"];

    for field in ["first_name", "last_name", "email", "job_title", "visa_status", "city"] {
        let semantic_type = engine.catalog().semantic_type_of(field);
        for &op in operators_for(semantic_type) {
            let Some(negated) = op.negation() else {
                continue;
            };
            for probe in probes {
                let base = Condition::new(1, field, op, probe);
                let neg = Condition::new(2, field, negated, probe);
                for record in &projected {
                    assert_ne!(
                        engine.evaluate(&base, record),
                        engine.evaluate(&neg, record),
                        "{field} {op} {probe:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_or_never_shrinks_the_result_of_and() {
    let engine = engine();
    let records = roster();
    let lookups = lookups();
    let condition_sets = [
        vec![
            Condition::new(1, "first_name", OperatorId::StartsWith, "j"),
            Condition::new(2, "email", OperatorId::EndsWith, "example.com"),
        ],
        vec![
            Condition::new(1, "job_title", OperatorId::Contains, "java"),
            Condition::new(2, "visa_status", OperatorId::IsEmpty, ""),
            Condition::new(3, "last_name", OperatorId::NotContains, "son"),
        ],
        vec![
            Condition::new(1, "status", OperatorId::Equals, "Placed into Job"),
            Condition::new(2, "city", OperatorId::IsNotEmpty, ""),
        ],
    ];

    for conditions in condition_sets {
        let and = group_of(LogicalOperator::And, conditions.clone());
        let or = group_of(LogicalOperator::Or, conditions);
        let and_hits = ids(&engine.apply_advanced_filters(&records, &and, &lookups));
        let or_hits = ids(&engine.apply_advanced_filters(&records, &or, &lookups));
        assert!(and_hits.iter().all(|id| or_hits.contains(id)), "{and_hits:?} ⊄ {or_hits:?}");
    }
}

#[test]
fn test_is_filter_empty_only_for_canonical_default() {
    let engine = engine();
    let default = engine.default_filter();
    assert!(engine.is_filter_empty(&default));

    let with_value = one("first_name", OperatorId::StartsWith, "a");
    let emptiness = one("first_name", OperatorId::IsNotEmpty, "");
    let extra_group = FilterConfig::new(
        vec![default.groups()[0].clone(), default.groups()[0].clone()],
        LogicalOperator::And,
    )
    .unwrap();
    let extra_condition = group_of(
        LogicalOperator::And,
        vec![
            default.groups()[0].conditions()[0].clone(),
            default.groups()[0].conditions()[0].clone(),
        ],
    );

    for config in [with_value, emptiness, extra_group, extra_condition] {
        assert!(!engine.is_filter_empty(&config), "{config:?}");
    }
}

#[test]
fn test_results_preserve_input_order() {
    let engine = engine();
    let records = roster();
    let config = one("email", OperatorId::Contains, "");
    let matched = engine.apply_advanced_filters(&records, &config, &lookups());
    assert_eq!(ids(&matched), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_enumerated_operator_sets_exclude_substring_tests() {
    let ops = operators_for(SemanticType::Enumerated);
    assert!(!ops.contains(&OperatorId::Contains));
    assert!(!ops.contains(&OperatorId::StartsWith));
}
