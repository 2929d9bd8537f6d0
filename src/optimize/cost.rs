//! Heuristic evaluation cost and cost-based child reordering.

use crate::expr::{CmpOp, CompositeOp, Expr};

/// Estimate the relative cost of evaluating an expression against one row.
///
/// Equality checks are cheapest, numeric/ordering comparisons next, substring
/// scans more expensive, regex matches dominate. AND short-circuits on its
/// first false child so its cost is the maximum over children; OR may have to
/// touch every child, so it sums. Leaves not listed cost 1.
pub fn estimate_cost(expr: &Expr) -> u32 {
    match expr {
        Expr::Cmp { op, .. } => match op {
            CmpOp::Eq | CmpOp::NotEq => 1,
            CmpOp::Lt | CmpOp::LtEq | CmpOp::Gt | CmpOp::GtEq => 2,
            CmpOp::Contains | CmpOp::StartsWith | CmpOp::EndsWith => 5,
            CmpOp::Matches => 10,
            CmpOp::IsNull | CmpOp::IsNotNull => 3,
        },
        Expr::Composite {
            op: CompositeOp::And,
            children,
        } => children.iter().map(estimate_cost).max().unwrap_or(1),
        Expr::Composite {
            op: CompositeOp::Or,
            children,
        } => children.iter().map(estimate_cost).sum::<u32>().max(1),
        Expr::Not(inner) => estimate_cost(inner),
        _ => 1,
    }
}

/// Reorder composite children by non-decreasing cost, recursively. The sort
/// is stable: equal-cost children keep their relative order.
pub(super) fn reorder(expr: Expr) -> Expr {
    match expr {
        Expr::Not(inner) => Expr::not(reorder(*inner)),
        Expr::Composite { op, children } => {
            let mut children: Vec<Expr> = children.into_iter().map(reorder).collect();
            children.sort_by_key(estimate_cost);
            Expr::Composite { op, children }
        }
        leaf => leaf,
    }
}
