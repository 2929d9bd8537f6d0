//! Algebraic predicate optimizer.
//!
//! [`optimize`] threads an expression through a fixed sequence of pure,
//! structurally-recursive rewrite passes, each of which preserves the
//! predicate's meaning:
//!
//! 1. negation pushdown (double negation, De Morgan)
//! 2. constant folding
//! 3. redundancy elimination (duplicates, complementary pairs)
//! 4. same-field coalescing (equalities, numeric ranges)
//! 5. range simplification hook
//! 6. absorption
//! 7. associative flattening
//! 8. cost-based reordering
//!
//! There is no fixed-point loop: each pass runs once, in order. Termination
//! is structural; every recursion descends into a strictly smaller subtree.

mod absorb;
mod coalesce;
mod cost;
mod flatten;
mod range;
mod redundancy;
mod simplify;

pub use cost::estimate_cost;

use crate::expr::{CompositeOp, Expr};

/// Optimize a predicate expression.
///
/// Pure and total: the result evaluates identically to the input on every
/// row, and optimizing an already-optimized tree returns it unchanged.
pub fn optimize(expr: Expr) -> Expr {
    tracing::trace!(input = %expr, "optimizing predicate");
    let optimized = cost::reorder(flatten::flatten(absorb::absorb(coalesce::simplify_ranges(
        coalesce::coalesce(redundancy::eliminate_redundant(simplify::fold_constants(
            simplify::simplify_negations(expr),
        ))),
    ))));
    tracing::trace!(output = %optimized, "optimized predicate");
    optimized
}

/// Rebuild a composite from already-rewritten children, restoring the tree
/// invariants every pass must uphold: no constants below the root, no
/// duplicate children, no complementary sibling pairs, no empty or
/// single-child composites.
///
/// Annihilator constants (FALSE under AND, TRUE under OR) collapse the whole
/// composite; identity constants drop out. Remaining children keep their
/// first-seen order.
pub(crate) fn rebuild(op: CompositeOp, children: Vec<Expr>) -> Expr {
    let mut kept: Vec<Expr> = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Expr::Constant(value) => {
                if value == op.annihilator() {
                    return Expr::Constant(value);
                }
            }
            child => {
                if !kept.contains(&child) {
                    kept.push(child);
                }
            }
        }
    }
    let complementary = kept.iter().any(|child| match child {
        Expr::Not(core) => kept.iter().any(|other| other == core.as_ref()),
        _ => false,
    });
    if complementary {
        return Expr::Constant(op.annihilator());
    }
    match kept.len() {
        0 => Expr::Constant(op.identity()),
        1 => kept.into_iter().next().expect("one child"),
        _ => Expr::Composite { op, children: kept },
    }
}
