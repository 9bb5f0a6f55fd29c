use criterion::{Criterion, criterion_group, criterion_main};
use crm_filter_core::api::{Condition, FilterConfig, FilterEngine, Group, LookupMaps, OperatorId};
use crm_filter_core::catalog::contacts::contacts_catalog;
use crm_filter_core::types::LogicalOperator;
use serde_json::{Value, json};
use std::hint::black_box;

const TITLES: [&str; 4] = [
    "Java Full Stack Developer",
    "Registered Nurse (RN)",
    "Data Engineer",
    "Travel Nurse",
];
const VISAS: [&str; 4] = ["F1", "OPT", "H1B", "GC"];

fn lookups() -> LookupMaps {
    LookupMaps::new()
        .with_table("job_title", TITLES.iter().enumerate().map(|(i, t)| (i as i64, *t)))
        .with_table("visa_status", VISAS.iter().enumerate().map(|(i, v)| (i as i64, *v)))
}

fn contacts(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "id": i,
                "first_name": format!("Contact{i:05}"),
                "email": format!("contact{i}@example.com"),
                "job_title_id": i % TITLES.len(),
                "visa_status_id": (i / 3) % VISAS.len(),
                "city": if i % 2 == 0 { "Austin" } else { "Pune" },
            })
        })
        .collect()
}

fn two_group_filter() -> FilterConfig {
    FilterConfig::new(
        vec![
            Group::new(
                1,
                LogicalOperator::And,
                vec![
                    Condition::new(1, "job_title", OperatorId::Contains, "java"),
                    Condition::new(2, "visa_status", OperatorId::Equals, "H1B"),
                ],
            )
            .unwrap(),
            Group::new(
                2,
                LogicalOperator::Or,
                vec![
                    Condition::new(3, "city", OperatorId::Equals, "pune"),
                    Condition::new(4, "email", OperatorId::EndsWith, "7@example.com"),
                ],
            )
            .unwrap(),
        ],
        LogicalOperator::Or,
    )
    .unwrap()
}

fn bench_project_10k(c: &mut Criterion) {
    let engine = FilterEngine::new(contacts_catalog());
    let lookups = lookups();
    let records = contacts(10_000);
    c.bench_function("project_10k", |b| {
        b.iter(|| black_box(engine.project_all(&records, &lookups)));
    });
}

fn bench_apply_10k(c: &mut Criterion) {
    let engine = FilterEngine::new(contacts_catalog());
    let lookups = lookups();
    let records = contacts(10_000);
    let filter = two_group_filter();
    c.bench_function("apply_10k", |b| {
        b.iter(|| black_box(engine.apply_advanced_filters(&records, &filter, &lookups)));
    });
}

fn bench_reuse_projection_10k(c: &mut Criterion) {
    // Project once outside the benchmark loop.
    let engine = FilterEngine::new(contacts_catalog());
    let projected = engine.project_all(&contacts(10_000), &lookups());
    let compiled = engine.compile(&two_group_filter());
    c.bench_function("matches_precomputed_10k", |b| {
        b.iter(|| black_box(projected.iter().filter(|p| compiled.matches(p)).count()));
    });
}

criterion_group!(
    benches,
    bench_project_10k,
    bench_apply_10k,
    bench_reuse_projection_10k
);
criterion_main!(benches);
