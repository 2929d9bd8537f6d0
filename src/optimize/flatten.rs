//! Associative flattening of same-operator nesting.

use super::rebuild;
use crate::expr::Expr;

/// Splice the children of a same-operator composite child into its parent,
/// recursing first. NOT does not associate and is carried through.
pub(super) fn flatten(expr: Expr) -> Expr {
    match expr {
        Expr::Not(inner) => Expr::not(flatten(*inner)),
        Expr::Composite { op, children } => {
            let mut merged = Vec::with_capacity(children.len());
            for child in children {
                match flatten(child) {
                    Expr::Composite {
                        op: child_op,
                        children: grandchildren,
                    } if child_op == op => merged.extend(grandchildren),
                    other => merged.push(other),
                }
            }
            rebuild(op, merged)
        }
        leaf => leaf,
    }
}
