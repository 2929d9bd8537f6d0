//! Negation pushdown and constant folding.

use super::rebuild;
use crate::expr::Expr;

/// Remove double negations and push NOT through composites via De Morgan.
/// Negation is never pushed through a leaf comparison; `NOT (a = '1')`
/// stays as written.
pub(super) fn simplify_negations(expr: Expr) -> Expr {
    match expr {
        Expr::Not(inner) => negate(*inner),
        Expr::Composite { op, children } => Expr::Composite {
            op,
            children: children.into_iter().map(simplify_negations).collect(),
        },
        leaf => leaf,
    }
}

fn negate(expr: Expr) -> Expr {
    match expr {
        // NOT (NOT x) = x
        Expr::Not(inner) => simplify_negations(*inner),
        // NOT (a AND b) = NOT a OR NOT b, and dually
        Expr::Composite { op, children } => Expr::Composite {
            op: op.opposite(),
            children: children.into_iter().map(negate).collect(),
        },
        leaf => Expr::not(leaf),
    }
}

/// Fold boolean constants out of the tree. `NOT TRUE` becomes FALSE,
/// identity constants drop out of composites, annihilators collapse them.
pub(super) fn fold_constants(expr: Expr) -> Expr {
    match expr {
        Expr::Not(inner) => match fold_constants(*inner) {
            Expr::Constant(value) => Expr::Constant(!value),
            inner => Expr::not(inner),
        },
        Expr::Composite { op, children } => {
            rebuild(op, children.into_iter().map(fold_constants).collect())
        }
        leaf => leaf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    #[test]
    fn double_negation_unwraps() {
        let expr = Expr::not(Expr::not(Expr::eq("a", "1")));
        assert_eq!(simplify_negations(expr), Expr::eq("a", "1"));
    }

    #[test]
    fn de_morgan_flips_the_connective() {
        let expr = Expr::not(Expr::and(vec![
            Expr::eq("a", "1"),
            Expr::not(Expr::eq("b", "2")),
        ]));
        assert_eq!(
            simplify_negations(expr),
            Expr::or(vec![Expr::not(Expr::eq("a", "1")), Expr::eq("b", "2")])
        );
    }

    #[test]
    fn negation_stays_on_leaves() {
        let expr = Expr::not(Expr::eq("a", "1"));
        assert_eq!(simplify_negations(expr.clone()), expr);
    }

    #[test]
    fn constants_fold() {
        assert_eq!(fold_constants(Expr::not(Expr::TRUE)), Expr::FALSE);
        assert_eq!(
            fold_constants(Expr::and(vec![Expr::eq("a", "1"), Expr::TRUE])),
            Expr::eq("a", "1")
        );
        assert_eq!(
            fold_constants(Expr::and(vec![Expr::eq("a", "1"), Expr::FALSE])),
            Expr::FALSE
        );
        assert_eq!(
            fold_constants(Expr::or(vec![Expr::eq("a", "1"), Expr::TRUE])),
            Expr::TRUE
        );
        assert_eq!(fold_constants(Expr::and(vec![])), Expr::TRUE);
        assert_eq!(fold_constants(Expr::or(vec![])), Expr::FALSE);
    }
}
