//! Absorption: `A AND (A OR B)` is just `A`.

use super::rebuild;
use crate::expr::{CompositeOp, Expr};

/// Bottom-up absorption over conjunctions. An OR child is absorbed when one
/// of its alternatives is structurally equal to another child of the AND;
/// the alternative already implies the whole OR. With exactly two conjuncts
/// this collapses the AND to the shared child.
pub(super) fn absorb(expr: Expr) -> Expr {
    match expr {
        Expr::Not(inner) => Expr::not(absorb(*inner)),
        Expr::Composite { op, children } => {
            let children: Vec<Expr> = children.into_iter().map(absorb).collect();
            match op {
                CompositeOp::And => absorb_children(children),
                CompositeOp::Or => rebuild(op, children),
            }
        }
        leaf => leaf,
    }
}

fn absorb_children(children: Vec<Expr>) -> Expr {
    let absorbed: Vec<bool> = children
        .iter()
        .enumerate()
        .map(|(idx, child)| match child {
            Expr::Composite {
                op: CompositeOp::Or,
                children: alternatives,
            } => children
                .iter()
                .enumerate()
                .any(|(other_idx, other)| other_idx != idx && alternatives.contains(other)),
            _ => false,
        })
        .collect();
    let kept: Vec<Expr> = children
        .into_iter()
        .zip(absorbed)
        .filter_map(|(child, gone)| (!gone).then_some(child))
        .collect();
    rebuild(CompositeOp::And, kept)
}
