//! End-to-end optimizer scenarios: literal input trees and their expected
//! optimized forms.

use sift::{optimize, CmpOp, Expr};

#[test]
fn and_with_false_short_circuits() {
    let expr = Expr::and(vec![Expr::eq("a", "1"), Expr::FALSE, Expr::eq("b", "2")]);
    assert_eq!(optimize(expr), Expr::FALSE);
}

#[test]
fn or_with_true_short_circuits() {
    let expr = Expr::or(vec![Expr::eq("a", "1"), Expr::TRUE]);
    assert_eq!(optimize(expr), Expr::TRUE);
}

#[test]
fn identity_constants_drop_out() {
    let expr = Expr::and(vec![Expr::eq("a", "1"), Expr::TRUE, Expr::eq("b", "2")]);
    assert_eq!(
        optimize(expr),
        Expr::and(vec![Expr::eq("a", "1"), Expr::eq("b", "2")])
    );
}

#[test]
fn de_morgan_with_double_negation() {
    let expr = Expr::not(Expr::and(vec![
        Expr::eq("a", "1"),
        Expr::not(Expr::eq("b", "2")),
    ]));
    // Both results cost 1, so the stable reorder keeps the De Morgan order.
    assert_eq!(
        optimize(expr),
        Expr::or(vec![Expr::not(Expr::eq("a", "1")), Expr::eq("b", "2")])
    );
}

#[test]
fn double_negation_alone_unwraps() {
    let expr = Expr::not(Expr::not(Expr::eq("a", "1")));
    assert_eq!(optimize(expr), Expr::eq("a", "1"));
}

#[test]
fn negation_is_not_pushed_through_leaves() {
    let expr = Expr::not(Expr::gt("n", "5"));
    assert_eq!(optimize(expr), Expr::not(Expr::gt("n", "5")));
}

#[test]
fn contradictory_equalities_under_and() {
    let expr = Expr::and(vec![Expr::eq("x", "1"), Expr::eq("x", "2")]);
    assert_eq!(optimize(expr), Expr::FALSE);
}

#[test]
fn or_of_equalities_coalesces_to_in_list() {
    let expr = Expr::or(vec![
        Expr::eq("x", "a"),
        Expr::eq("x", "b"),
        Expr::eq("x", "c"),
    ]);
    assert_eq!(
        optimize(expr),
        Expr::in_list("x", vec!["a".into(), "b".into(), "c".into()])
    );
}

#[test]
fn range_intersection_under_and() {
    let expr = Expr::and(vec![
        Expr::gt_eq("n", "10"),
        Expr::lt("n", "20"),
        Expr::lt_eq("n", "15"),
    ]);
    assert_eq!(
        optimize(expr),
        Expr::between_with_bounds("n", "10", "15", true, true)
    );
}

#[test]
fn disjoint_ranges_under_and_collapse_to_false() {
    let expr = Expr::and(vec![Expr::gt("n", "10"), Expr::lt("n", "5")]);
    assert_eq!(optimize(expr), Expr::FALSE);
}

#[test]
fn degenerate_range_lowers_to_equality() {
    let expr = Expr::and(vec![Expr::gt_eq("n", "10"), Expr::lt_eq("n", "10")]);
    assert_eq!(optimize(expr), Expr::eq("n", "10"));
}

#[test]
fn flattening_then_cost_reorder() {
    let expr = Expr::and(vec![
        Expr::contains("a", "z"),
        Expr::and(vec![Expr::eq("b", "1"), Expr::matches("c", ".*")]),
    ]);
    assert_eq!(
        optimize(expr),
        Expr::and(vec![
            Expr::eq("b", "1"),
            Expr::contains("a", "z"),
            Expr::matches("c", ".*"),
        ])
    );
}

#[test]
fn absorption_collapses_to_the_shared_child() {
    let expr = Expr::and(vec![
        Expr::eq("a", "1"),
        Expr::or(vec![Expr::eq("a", "1"), Expr::eq("b", "2")]),
    ]);
    assert_eq!(optimize(expr), Expr::eq("a", "1"));
}

#[test]
fn absorption_keeps_unrelated_conjuncts() {
    let expr = Expr::and(vec![
        Expr::eq("a", "1"),
        Expr::contains("c", "x"),
        Expr::or(vec![Expr::eq("a", "1"), Expr::eq("b", "2")]),
    ]);
    assert_eq!(
        optimize(expr),
        Expr::and(vec![Expr::eq("a", "1"), Expr::contains("c", "x")])
    );
}

#[test]
fn duplicate_children_collapse() {
    let expr = Expr::or(vec![
        Expr::contains("s", "x"),
        Expr::eq("t", "1"),
        Expr::contains("s", "x"),
    ]);
    assert_eq!(
        optimize(expr),
        Expr::or(vec![Expr::eq("t", "1"), Expr::contains("s", "x")])
    );
}

#[test]
fn complementary_pair_annihilates() {
    let and = Expr::and(vec![
        Expr::eq("a", "1"),
        Expr::not(Expr::eq("a", "1")),
        Expr::eq("b", "2"),
    ]);
    assert_eq!(optimize(and), Expr::FALSE);

    let or = Expr::or(vec![Expr::gt("n", "5"), Expr::not(Expr::gt("n", "5"))]);
    assert_eq!(optimize(or), Expr::TRUE);
}

#[test]
fn tautological_subtree_folds_away() {
    let expr = Expr::and(vec![
        Expr::eq("x", "1"),
        Expr::or(vec![Expr::eq("y", "2"), Expr::not(Expr::eq("y", "2"))]),
    ]);
    assert_eq!(optimize(expr), Expr::eq("x", "1"));
}

#[test]
fn covering_ranges_under_or_become_true() {
    let expr = Expr::or(vec![Expr::lt_eq("n", "5"), Expr::gt_eq("n", "5")]);
    assert_eq!(optimize(expr), Expr::TRUE);
}

#[test]
fn disjoint_ranges_under_or_are_left_alone() {
    let expr = Expr::or(vec![Expr::lt("n", "5"), Expr::gt("n", "10")]);
    assert_eq!(optimize(expr.clone()), expr);
}

#[test]
fn unparseable_range_values_stay_as_leaves() {
    let expr = Expr::and(vec![
        Expr::gt_eq("n", "10"),
        Expr::lt_eq("n", "20"),
        Expr::gt("n", "abc"),
    ]);
    assert_eq!(
        optimize(expr),
        Expr::and(vec![
            Expr::between_with_bounds("n", "10", "20", true, true),
            Expr::gt("n", "abc"),
        ])
    );
}

#[test]
fn case_insensitive_leaves_are_opaque() {
    let expr = Expr::and(vec![
        Expr::cmp_ignore_case("x", CmpOp::Eq, "1"),
        Expr::cmp_ignore_case("x", CmpOp::Eq, "2"),
    ]);
    assert_eq!(optimize(expr.clone()), expr);
}

#[test]
fn date_ranges_are_opaque() {
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let expr = Expr::and(vec![
        Expr::date_between("d", start, end, "%Y-%m-%d"),
        Expr::date_between("d", start, end, "%Y-%m-%d"),
        Expr::eq("e", "1"),
    ]);
    // Structural duplicates still collapse, but the node itself is untouched.
    assert_eq!(
        optimize(expr),
        Expr::and(vec![
            Expr::date_between("d", start, end, "%Y-%m-%d"),
            Expr::eq("e", "1"),
        ])
    );
}

#[test]
fn comparisons_one_nesting_level_down_still_coalesce() {
    let expr = Expr::and(vec![
        Expr::gt_eq("n", "10"),
        Expr::and(vec![Expr::lt_eq("n", "20"), Expr::eq("s", "x")]),
    ]);
    assert_eq!(
        optimize(expr),
        Expr::and(vec![
            Expr::between_with_bounds("n", "10", "20", true, true),
            Expr::eq("s", "x"),
        ])
    );
}

#[test]
fn single_child_composites_unwrap() {
    let expr = Expr::and(vec![Expr::or(vec![Expr::eq("a", "1")])]);
    assert_eq!(optimize(expr), Expr::eq("a", "1"));
}

#[test]
fn root_may_be_constant_but_children_never_are() {
    let expr = Expr::or(vec![
        Expr::and(vec![Expr::eq("a", "1"), Expr::FALSE]),
        Expr::and(vec![Expr::eq("b", "2"), Expr::TRUE]),
    ]);
    assert_eq!(optimize(expr), Expr::eq("b", "2"));
}
