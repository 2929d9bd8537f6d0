//! Same-field coalescing of comparisons under one connective.

use tracing::debug;

use super::range::Range;
use super::rebuild;
use crate::expr::{CmpOp, CompositeOp, Expr};
use crate::value;

/// Merge plain comparisons that target the same field, recursively.
///
/// Case-insensitive comparisons, ranges, in-lists and date ranges are
/// opaque here; only [`Expr::Cmp`] children join a field group. Same-operator
/// composite children are spliced first so that comparisons one nesting
/// level down join their field group; without this the pipeline would not be
/// idempotent, since flattening runs later.
pub(super) fn coalesce(expr: Expr) -> Expr {
    match expr {
        Expr::Not(inner) => Expr::not(coalesce(*inner)),
        Expr::Composite { op, children } => {
            let mut flat: Vec<Expr> = Vec::with_capacity(children.len());
            for child in children {
                match coalesce(child) {
                    Expr::Composite {
                        op: child_op,
                        children: grandchildren,
                    } if child_op == op => flat.extend(grandchildren),
                    other => flat.push(other),
                }
            }
            coalesce_children(op, flat)
        }
        leaf => leaf,
    }
}

/// Range simplification hook. Range merging is the coalescer's job; this
/// pass deliberately preserves the tree.
pub(super) fn simplify_ranges(expr: Expr) -> Expr {
    expr
}

fn coalesce_children(op: CompositeOp, children: Vec<Expr>) -> Expr {
    // Field groups in first-occurrence order.
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (idx, child) in children.iter().enumerate() {
        if let Expr::Cmp { field, .. } = child {
            match groups.iter_mut().find(|(name, _)| name == field) {
                Some((_, members)) => members.push(idx),
                None => groups.push((field.clone(), vec![idx])),
            }
        }
    }

    let mut replacements: Vec<Option<Vec<Expr>>> = (0..children.len()).map(|_| None).collect();
    let mut consumed = vec![false; children.len()];
    for (field, members) in &groups {
        if members.len() < 2 {
            continue;
        }
        let comps: Vec<(CmpOp, &str)> = members
            .iter()
            .map(|&idx| match &children[idx] {
                Expr::Cmp { op, value, .. } => (*op, value.as_str()),
                _ => unreachable!("field groups only collect comparisons"),
            })
            .collect();
        let merged = merge_group(op, field, &comps);
        for &idx in members {
            consumed[idx] = true;
        }
        replacements[members[0]] = Some(merged);
    }

    let mut rebuilt = Vec::with_capacity(children.len());
    for (idx, child) in children.into_iter().enumerate() {
        if let Some(nodes) = replacements[idx].take() {
            rebuilt.extend(nodes);
        } else if !consumed[idx] {
            rebuilt.push(child);
        }
    }
    rebuild(op, rebuilt)
}

/// Merge one field group. The result replaces the group's comparisons at
/// the position of its first member; constants produced here (contradiction
/// or tautology) collapse the surrounding composite during rebuild.
fn merge_group(op: CompositeOp, field: &str, comps: &[(CmpOp, &str)]) -> Vec<Expr> {
    let equalities: Vec<&str> = comps
        .iter()
        .filter(|(cmp_op, _)| *cmp_op == CmpOp::Eq)
        .map(|(_, value)| *value)
        .collect();

    let mut nodes: Vec<Expr> = Vec::new();
    let merged_equalities = !equalities.is_empty();
    if merged_equalities {
        match op {
            CompositeOp::And => {
                let first = equalities[0];
                if equalities.iter().all(|v| value::equal(v, first)) {
                    nodes.push(Expr::eq(field, first));
                } else {
                    debug!(field, "contradictory equality constraints");
                    return vec![Expr::FALSE];
                }
            }
            CompositeOp::Or => {
                let mut values: Vec<String> = Vec::new();
                for v in &equalities {
                    if !values.iter().any(|seen| value::equal(seen, v)) {
                        values.push((*v).to_string());
                    }
                }
                nodes.push(Expr::in_list(field, values));
            }
        }
    }

    // Numeric range fold. A comparison whose value is not numeric never
    // joins the fold; it passes through untouched below.
    let mut ranges: Vec<Range> = Vec::new();
    let mut in_fold = vec![false; comps.len()];
    for (idx, (cmp_op, value)) in comps.iter().enumerate() {
        if !cmp_op.is_range_op() {
            continue;
        }
        if let Ok(range) = Range::from_comparison(*cmp_op, value) {
            ranges.push(range);
            in_fold[idx] = true;
        }
    }
    let folded = if ranges.len() >= 2 {
        fold_ranges(op, &ranges)
    } else {
        None
    };
    let range_merged = folded.is_some();
    if let Some(range) = folded {
        if range.is_empty() {
            debug!(field, "contradictory range constraints");
        }
        nodes.push(range.to_expr(field));
    }

    // Everything unmerged passes through in its original order.
    for (idx, (cmp_op, value)) in comps.iter().enumerate() {
        let merged = match cmp_op {
            CmpOp::Eq => merged_equalities,
            _ => range_merged && in_fold[idx],
        };
        if !merged {
            nodes.push(Expr::cmp(field, *cmp_op, *value));
        }
    }
    nodes
}

fn fold_ranges(op: CompositeOp, ranges: &[Range]) -> Option<Range> {
    let mut acc = ranges[0];
    match op {
        CompositeOp::And => {
            for range in &ranges[1..] {
                acc = acc.intersect(range);
            }
            Some(acc)
        }
        CompositeOp::Or => {
            // The hull is only an exact rewrite of a disjunction when every
            // step overlaps or touches; otherwise leave the group alone.
            for range in &ranges[1..] {
                if !acc.touches(range) {
                    return None;
                }
                acc = acc.union(range);
            }
            Some(acc)
        }
    }
}
