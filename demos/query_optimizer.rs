/// Walkthrough of the algebraic rewrites the optimizer applies.
use sift::{optimize, Expr};

fn show(label: &str, expr: Expr) {
    let before = expr.to_string();
    let after = optimize(expr);
    println!("{}:\n  before: {}\n  after:  {}\n", label, before, after);
}

fn main() {
    show(
        "constant short-circuit",
        Expr::and(vec![Expr::eq("a", "1"), Expr::FALSE, Expr::eq("b", "2")]),
    );

    show(
        "De Morgan + double negation",
        Expr::not(Expr::and(vec![
            Expr::eq("a", "1"),
            Expr::not(Expr::eq("b", "2")),
        ])),
    );

    show(
        "contradictory equalities",
        Expr::and(vec![Expr::eq("x", "1"), Expr::eq("x", "2")]),
    );

    show(
        "equalities coalesce into IN",
        Expr::or(vec![
            Expr::eq("x", "a"),
            Expr::eq("x", "b"),
            Expr::eq("x", "c"),
        ]),
    );

    show(
        "range intersection",
        Expr::and(vec![
            Expr::gt_eq("n", "10"),
            Expr::lt("n", "20"),
            Expr::lt_eq("n", "15"),
        ]),
    );

    show(
        "flatten + reorder by cost",
        Expr::and(vec![
            Expr::contains("a", "z"),
            Expr::and(vec![Expr::eq("b", "1"), Expr::matches("c", ".*")]),
        ]),
    );

    show(
        "absorption",
        Expr::and(vec![
            Expr::eq("a", "1"),
            Expr::or(vec![Expr::eq("a", "1"), Expr::eq("b", "2")]),
        ]),
    );
}
