//! Numeric interval algebra backing same-field range coalescing.
//!
//! A [`Range`] is a half-open/closed interval over `f64` with `None` bounds
//! denoting infinity. Empty results are normalized to the designated
//! [`Range::EMPTY`] value so that ranges stay comparable.

use crate::error::RangeError;
use crate::expr::{CmpOp, Expr};
use crate::value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Range {
    lower: Option<f64>,
    lower_inclusive: bool,
    upper: Option<f64>,
    upper_inclusive: bool,
}

impl Range {
    /// The canonical empty interval.
    pub(super) const EMPTY: Range = Range {
        lower: Some(0.0),
        lower_inclusive: false,
        upper: Some(0.0),
        upper_inclusive: false,
    };

    /// Normalizing constructor: every empty interval becomes [`Range::EMPTY`]
    /// and infinite sides carry a canonical `false` inclusivity flag.
    fn new(
        lower: Option<f64>,
        lower_inclusive: bool,
        upper: Option<f64>,
        upper_inclusive: bool,
    ) -> Range {
        let range = Range {
            lower,
            lower_inclusive: lower.is_some() && lower_inclusive,
            upper,
            upper_inclusive: upper.is_some() && upper_inclusive,
        };
        if range.is_empty() {
            Range::EMPTY
        } else {
            range
        }
    }

    /// Map a single comparison to an interval. Only the four inequality
    /// operators and equality have one.
    pub(super) fn from_comparison(op: CmpOp, value: &str) -> Result<Range, RangeError> {
        let v = value::parse_numeric(value).ok_or_else(|| RangeError::NumericParse {
            value: value.to_string(),
        })?;
        match op {
            CmpOp::Gt => Ok(Range::new(Some(v), false, None, false)),
            CmpOp::GtEq => Ok(Range::new(Some(v), true, None, false)),
            CmpOp::Lt => Ok(Range::new(None, false, Some(v), false)),
            CmpOp::LtEq => Ok(Range::new(None, false, Some(v), true)),
            CmpOp::Eq => Ok(Range::new(Some(v), true, Some(v), true)),
            op => Err(RangeError::UnsupportedRangeOp { op }),
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => {
                lower > upper
                    || (lower == upper && !(self.lower_inclusive && self.upper_inclusive))
            }
            _ => false,
        }
    }

    /// Tighter lower bound, tighter upper bound. Equal bounds keep the
    /// stricter (AND of inclusivity).
    pub(super) fn intersect(&self, other: &Range) -> Range {
        let (lower, lower_inclusive) = match (self.lower, other.lower) {
            (None, None) => (None, false),
            (Some(_), None) => (self.lower, self.lower_inclusive),
            (None, Some(_)) => (other.lower, other.lower_inclusive),
            (Some(a), Some(b)) => {
                if a > b {
                    (self.lower, self.lower_inclusive)
                } else if b > a {
                    (other.lower, other.lower_inclusive)
                } else {
                    (self.lower, self.lower_inclusive && other.lower_inclusive)
                }
            }
        };
        let (upper, upper_inclusive) = match (self.upper, other.upper) {
            (None, None) => (None, false),
            (Some(_), None) => (self.upper, self.upper_inclusive),
            (None, Some(_)) => (other.upper, other.upper_inclusive),
            (Some(a), Some(b)) => {
                if a < b {
                    (self.upper, self.upper_inclusive)
                } else if b < a {
                    (other.upper, other.upper_inclusive)
                } else {
                    (self.upper, self.upper_inclusive && other.upper_inclusive)
                }
            }
        };
        Range::new(lower, lower_inclusive, upper, upper_inclusive)
    }

    /// Looser lower bound, looser upper bound (the convex hull). Equal
    /// bounds keep the looser (OR of inclusivity). The hull of two
    /// non-empty ranges is never empty.
    pub(super) fn union(&self, other: &Range) -> Range {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let (lower, lower_inclusive) = match (self.lower, other.lower) {
            (None, _) | (_, None) => (None, false),
            (Some(a), Some(b)) => {
                if a < b {
                    (self.lower, self.lower_inclusive)
                } else if b < a {
                    (other.lower, other.lower_inclusive)
                } else {
                    (self.lower, self.lower_inclusive || other.lower_inclusive)
                }
            }
        };
        let (upper, upper_inclusive) = match (self.upper, other.upper) {
            (None, _) | (_, None) => (None, false),
            (Some(a), Some(b)) => {
                if a > b {
                    (self.upper, self.upper_inclusive)
                } else if b > a {
                    (other.upper, other.upper_inclusive)
                } else {
                    (self.upper, self.upper_inclusive || other.upper_inclusive)
                }
            }
        };
        Range::new(lower, lower_inclusive, upper, upper_inclusive)
    }

    /// True when the hull of the two ranges covers no point outside their
    /// union: they overlap, or they are adjacent with at least one closed
    /// endpoint. Only then is [`Range::union`] an exact rewrite.
    pub(super) fn touches(&self, other: &Range) -> bool {
        if !self.intersect(other).is_empty() {
            return true;
        }
        adjacent(self, other) || adjacent(other, self)
    }

    /// Lower the interval back into the expression tree.
    pub(super) fn to_expr(&self, field: &str) -> Expr {
        if self.is_empty() {
            return Expr::FALSE;
        }
        match (self.lower, self.upper) {
            (None, None) => Expr::TRUE,
            (Some(lower), Some(upper)) => {
                if lower == upper && self.lower_inclusive && self.upper_inclusive {
                    Expr::eq(field, format_bound(lower))
                } else {
                    Expr::between_with_bounds(
                        field,
                        format_bound(lower),
                        format_bound(upper),
                        self.lower_inclusive,
                        self.upper_inclusive,
                    )
                }
            }
            (Some(lower), None) => {
                let op = if self.lower_inclusive {
                    CmpOp::GtEq
                } else {
                    CmpOp::Gt
                };
                Expr::cmp(field, op, format_bound(lower))
            }
            (None, Some(upper)) => {
                let op = if self.upper_inclusive {
                    CmpOp::LtEq
                } else {
                    CmpOp::Lt
                };
                Expr::cmp(field, op, format_bound(upper))
            }
        }
    }
}

fn adjacent(left: &Range, right: &Range) -> bool {
    match (left.upper, right.lower) {
        (Some(upper), Some(lower)) => {
            upper == lower && (left.upper_inclusive || right.lower_inclusive)
        }
        _ => false,
    }
}

/// Canonical bound representation: Rust's shortest round-trip float form
/// ("10", not "10.0"). The evaluator parses both sides back to `f64`, so
/// the representation choice is invisible downstream.
fn format_bound(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(op: CmpOp, value: &str) -> Range {
        Range::from_comparison(op, value).unwrap()
    }

    #[test]
    fn from_comparison_maps_operators() {
        assert_eq!(
            range(CmpOp::Gt, "10"),
            Range::new(Some(10.0), false, None, false)
        );
        assert_eq!(
            range(CmpOp::GtEq, "10"),
            Range::new(Some(10.0), true, None, false)
        );
        assert_eq!(
            range(CmpOp::Lt, "10"),
            Range::new(None, false, Some(10.0), false)
        );
        assert_eq!(
            range(CmpOp::LtEq, "10"),
            Range::new(None, false, Some(10.0), true)
        );
        assert_eq!(
            range(CmpOp::Eq, "10"),
            Range::new(Some(10.0), true, Some(10.0), true)
        );
    }

    #[test]
    fn from_comparison_rejects_non_range_ops_and_non_numeric_values() {
        assert_eq!(
            Range::from_comparison(CmpOp::Contains, "10"),
            Err(RangeError::UnsupportedRangeOp {
                op: CmpOp::Contains
            })
        );
        assert_eq!(
            Range::from_comparison(CmpOp::Gt, "apple"),
            Err(RangeError::NumericParse {
                value: "apple".to_string()
            })
        );
    }

    #[test]
    fn intersect_picks_tighter_bounds() {
        let a = range(CmpOp::GtEq, "10");
        let b = range(CmpOp::Lt, "20");
        let c = range(CmpOp::LtEq, "15");
        let folded = a.intersect(&b).intersect(&c);
        assert_eq!(folded, Range::new(Some(10.0), true, Some(15.0), true));
    }

    #[test]
    fn intersect_tie_breaks_toward_exclusive() {
        let a = range(CmpOp::Gt, "10");
        let b = range(CmpOp::GtEq, "10");
        let folded = a.intersect(&b);
        assert_eq!(folded, Range::new(Some(10.0), false, None, false));
    }

    #[test]
    fn intersect_of_disjoint_is_empty() {
        let a = range(CmpOp::Gt, "10");
        let b = range(CmpOp::Lt, "5");
        assert_eq!(a.intersect(&b), Range::EMPTY);
        // Equal bounds with an exclusive side are empty too.
        let c = range(CmpOp::GtEq, "10");
        let d = range(CmpOp::Lt, "10");
        assert!(c.intersect(&d).is_empty());
    }

    #[test]
    fn union_picks_looser_bounds() {
        let a = range(CmpOp::Gt, "5");
        let b = range(CmpOp::GtEq, "10");
        assert_eq!(a.union(&b), Range::new(Some(5.0), false, None, false));

        let c = range(CmpOp::GtEq, "10").intersect(&range(CmpOp::LtEq, "20"));
        let d = range(CmpOp::GtEq, "15").intersect(&range(CmpOp::LtEq, "25"));
        assert_eq!(c.union(&d), Range::new(Some(10.0), true, Some(25.0), true));
    }

    #[test]
    fn union_tie_breaks_toward_inclusive() {
        let a = range(CmpOp::Gt, "10");
        let b = range(CmpOp::GtEq, "10");
        assert_eq!(a.union(&b), Range::new(Some(10.0), true, None, false));
    }

    #[test]
    fn touches_detects_exact_hulls() {
        assert!(range(CmpOp::Lt, "10").touches(&range(CmpOp::Gt, "5")));
        // Adjacent with a closed endpoint: [_, 5] and (5, _].
        assert!(range(CmpOp::LtEq, "5").touches(&range(CmpOp::Gt, "5")));
        // A gap at the shared point: (_, 5) and (5, _).
        assert!(!range(CmpOp::Lt, "5").touches(&range(CmpOp::Gt, "5")));
        // A real gap.
        assert!(!range(CmpOp::Lt, "5").touches(&range(CmpOp::Gt, "10")));
    }

    #[test]
    fn to_expr_lowers_every_shape() {
        assert_eq!(Range::EMPTY.to_expr("n"), Expr::FALSE);
        assert_eq!(Range::new(None, false, None, false).to_expr("n"), Expr::TRUE);
        assert_eq!(
            range(CmpOp::Eq, "10").to_expr("n"),
            Expr::eq("n", "10")
        );
        assert_eq!(
            range(CmpOp::GtEq, "10")
                .intersect(&range(CmpOp::Lt, "20"))
                .to_expr("n"),
            Expr::between_with_bounds("n", "10", "20", true, false)
        );
        assert_eq!(range(CmpOp::Gt, "10").to_expr("n"), Expr::gt("n", "10"));
        assert_eq!(range(CmpOp::LtEq, "1.5").to_expr("n"), Expr::lt_eq("n", "1.5"));
    }
}
