//! Duplicate and complementary-pair elimination within a composite.

use super::rebuild;
use crate::expr::Expr;

/// Bottom-up: children first, then this level. A composite that contains
/// both `x` and `NOT x` collapses to its annihilator constant; structurally
/// equal children collapse to one. Comparison is structural equality, never
/// identity, and no reasoning crosses nested connectives.
pub(super) fn eliminate_redundant(expr: Expr) -> Expr {
    match expr {
        Expr::Not(inner) => Expr::not(eliminate_redundant(*inner)),
        Expr::Composite { op, children } => {
            let children: Vec<Expr> = children.into_iter().map(eliminate_redundant).collect();
            let mut positives: Vec<&Expr> = Vec::new();
            let mut negated: Vec<&Expr> = Vec::new();
            for child in &children {
                match child {
                    Expr::Not(core) => {
                        if !negated.contains(&core.as_ref()) {
                            negated.push(core);
                        }
                    }
                    other => {
                        if !positives.contains(&other) {
                            positives.push(other);
                        }
                    }
                }
            }
            if positives.iter().any(|p| negated.contains(p)) {
                return Expr::Constant(op.annihilator());
            }
            if positives.len() + negated.len() == children.len() {
                // Nothing eliminated; keep the original child order.
                return rebuild(op, children);
            }
            let deduped: Vec<Expr> = positives
                .into_iter()
                .cloned()
                .chain(negated.into_iter().cloned().map(Expr::not))
                .collect();
            rebuild(op, deduped)
        }
        leaf => leaf,
    }
}
