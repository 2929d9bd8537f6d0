use criterion::{criterion_group, criterion_main, Criterion};
use sift::{evaluate, optimize, Expr};

fn wide_predicate() -> Expr {
    Expr::and(vec![
        Expr::gt_eq("qty", "10"),
        Expr::lt("qty", "1000"),
        Expr::lt_eq("qty", "500"),
        Expr::or(vec![
            Expr::eq("status", "active"),
            Expr::eq("status", "pending"),
            Expr::eq("status", "review"),
        ]),
        Expr::not(Expr::and(vec![
            Expr::contains("name", "test"),
            Expr::not(Expr::eq("env", "prod")),
        ])),
        Expr::and(vec![
            Expr::starts_with("sku", "AB-"),
            Expr::matches("sku", "[A-Z]{2}-[0-9]+"),
        ]),
    ])
}

fn bench_optimize(c: &mut Criterion) {
    let expr = wide_predicate();
    c.bench_function("optimize_wide_predicate", |b| {
        b.iter(|| optimize(std::hint::black_box(expr.clone())))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let row: std::collections::HashMap<String, String> = [
        ("qty", "42"),
        ("status", "active"),
        ("name", "widget"),
        ("env", "prod"),
        ("sku", "AB-1234"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let raw = wide_predicate();
    let optimized = optimize(raw.clone());
    c.bench_function("evaluate_raw", |b| {
        b.iter(|| evaluate(std::hint::black_box(&raw), &row))
    });
    c.bench_function("evaluate_optimized", |b| {
        b.iter(|| evaluate(std::hint::black_box(&optimized), &row))
    });
}

criterion_group!(benches, bench_optimize, bench_evaluate);
criterion_main!(benches);
