/// Basic example demonstrating sift's fluent row filtering.
///
/// This example shows how to:
/// 1. Build a filter with chained field conditions
/// 2. Inspect the optimized predicate tree
/// 3. Apply the filter to rows
use std::collections::HashMap;

use sift::RowFilter;

fn main() {
    // Step 1: Build a filter. Every chain step runs the optimizer, so the
    // two age bounds below coalesce into a single BETWEEN node.
    let filter = RowFilter::field("age")
        .gt_eq("18")
        .and(RowFilter::field("age").lt("65"))
        .and(RowFilter::field("status").eq("active"));

    // Step 2: Inspect what will actually be evaluated.
    println!("Filter: {}\n", filter.expr());

    // Step 3: Apply it to rows.
    let rows = [
        make_row(&[("name", "Erica"), ("age", "19"), ("status", "active")]),
        make_row(&[("name", "Lorenzo"), ("age", "23"), ("status", "inactive")]),
        make_row(&[("name", "Ada"), ("age", "70"), ("status", "active")]),
        make_row(&[("name", "Grace"), ("age", "44"), ("status", "active")]),
    ];

    for row in &rows {
        let name = row.get("name").map(String::as_str).unwrap_or("?");
        let verdict = if filter.evaluate(row) { "✓ kept" } else { "✗ dropped" };
        println!("  {} {}", verdict, name);
    }
}

fn make_row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
