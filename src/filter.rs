//! Fluent filter builder.
//!
//! Filters are built per-field and combined with `and`/`or`/`not` (or the
//! `&`, `|` and `!` operators). Every construction and combination step
//! finishes by running the optimizer, so a [`RowFilter`] always holds an
//! optimized tree.

use std::ops::{BitAnd, BitOr, Not};

use chrono::NaiveDate;

use crate::eval::Row;
use crate::expr::{CmpOp, CompositeOp, Expr};
use crate::optimize::optimize;

/// A compiled, optimized row predicate.
///
/// ```
/// use std::collections::HashMap;
/// use sift::RowFilter;
///
/// let filter = RowFilter::field("age")
///     .gt_eq("18")
///     .and(RowFilter::field("status").eq("active"));
///
/// let row: HashMap<String, String> = [
///     ("age".to_string(), "30".to_string()),
///     ("status".to_string(), "active".to_string()),
/// ]
/// .into();
/// assert!(filter.evaluate(&row));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowFilter {
    root: Expr,
}

impl RowFilter {
    /// Start building a condition on a field.
    ///
    /// # Panics
    ///
    /// Panics if the field name is empty or whitespace.
    pub fn field(name: impl Into<String>) -> FieldCondition {
        let name = name.into();
        assert!(!name.trim().is_empty(), "field name must not be empty");
        FieldCondition {
            field: name,
            case_insensitive: false,
        }
    }

    /// Start building a case-insensitive condition on a field.
    ///
    /// # Panics
    ///
    /// Panics if the field name is empty or whitespace.
    pub fn field_ignore_case(name: impl Into<String>) -> FieldCondition {
        let name = name.into();
        assert!(!name.trim().is_empty(), "field name must not be empty");
        FieldCondition {
            field: name,
            case_insensitive: true,
        }
    }

    /// Wrap an already-built expression tree, optimizing it.
    pub fn from_expr(expr: Expr) -> RowFilter {
        RowFilter {
            root: optimize(expr),
        }
    }

    /// The optimized expression tree behind this filter.
    pub fn expr(&self) -> &Expr {
        &self.root
    }

    pub fn into_expr(self) -> Expr {
        self.root
    }

    /// Evaluate the filter against a row.
    pub fn evaluate<R: Row>(&self, row: &R) -> bool {
        self.root.evaluate(row)
    }

    /// Combine with another filter under AND.
    pub fn and(self, other: RowFilter) -> RowFilter {
        self.combine(other, CompositeOp::And)
    }

    /// Combine with another filter under OR.
    pub fn or(self, other: RowFilter) -> RowFilter {
        self.combine(other, CompositeOp::Or)
    }

    /// Negate the filter.
    pub fn not(self) -> RowFilter {
        RowFilter {
            root: optimize(Expr::not(self.root)),
        }
    }

    fn combine(self, other: RowFilter, op: CompositeOp) -> RowFilter {
        RowFilter {
            root: optimize(Expr::Composite {
                op,
                children: vec![self.root, other.root],
            }),
        }
    }
}

// Operator trait implementations for ergonomic usage
impl BitAnd for RowFilter {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for RowFilter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for RowFilter {
    type Output = Self;

    fn not(self) -> Self::Output {
        RowFilter::not(self)
    }
}

/// Pending condition on one field; finishes into a [`RowFilter`].
#[derive(Clone, Debug)]
pub struct FieldCondition {
    field: String,
    case_insensitive: bool,
}

impl FieldCondition {
    fn filter(self, op: CmpOp, value: String) -> RowFilter {
        let root = if self.case_insensitive {
            Expr::cmp_ignore_case(self.field, op, value)
        } else {
            Expr::cmp(self.field, op, value)
        };
        RowFilter {
            root: optimize(root),
        }
    }

    /// Field equals the value.
    pub fn eq(self, value: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::Eq, value.into())
    }

    /// Field differs from the value.
    pub fn not_eq(self, value: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::NotEq, value.into())
    }

    /// Field is greater than the value.
    pub fn gt(self, value: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::Gt, value.into())
    }

    /// Field is greater than or equal to the value.
    pub fn gt_eq(self, value: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::GtEq, value.into())
    }

    /// Field is less than the value.
    pub fn lt(self, value: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::Lt, value.into())
    }

    /// Field is less than or equal to the value.
    pub fn lt_eq(self, value: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::LtEq, value.into())
    }

    /// Field contains the value as a substring.
    pub fn contains(self, value: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::Contains, value.into())
    }

    /// Field starts with the prefix.
    pub fn starts_with(self, prefix: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::StartsWith, prefix.into())
    }

    /// Field ends with the suffix.
    pub fn ends_with(self, suffix: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::EndsWith, suffix.into())
    }

    /// Field matches the regex over its whole value.
    pub fn matches(self, pattern: impl Into<String>) -> RowFilter {
        self.filter(CmpOp::Matches, pattern.into())
    }

    /// Field is absent from the row.
    pub fn is_null(self) -> RowFilter {
        self.filter(CmpOp::IsNull, String::new())
    }

    /// Field is present in the row.
    pub fn is_not_null(self) -> RowFilter {
        self.filter(CmpOp::IsNotNull, String::new())
    }

    /// Field lies between the bounds, inclusive on both ends.
    pub fn between(self, low: impl Into<String>, high: impl Into<String>) -> RowFilter {
        RowFilter {
            root: optimize(Expr::between(self.field, low, high)),
        }
    }

    /// Field's value is one of the given values.
    pub fn in_list<I, S>(self, values: I) -> RowFilter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        RowFilter {
            root: optimize(Expr::in_list(self.field, values)),
        }
    }

    /// Treat the field as a date with the given chrono format string.
    pub fn as_date(self, format: impl Into<String>) -> DateFieldCondition {
        DateFieldCondition {
            field: self.field,
            format: format.into(),
        }
    }
}

/// Pending condition on a date-valued field.
#[derive(Clone, Debug)]
pub struct DateFieldCondition {
    field: String,
    format: String,
}

impl DateFieldCondition {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.format).to_string()
    }

    /// Field's date is strictly after the given date.
    pub fn is_after(self, date: NaiveDate) -> RowFilter {
        let value = self.format_date(date);
        RowFilter {
            root: optimize(Expr::gt(self.field, value)),
        }
    }

    /// Field's date is strictly before the given date.
    pub fn is_before(self, date: NaiveDate) -> RowFilter {
        let value = self.format_date(date);
        RowFilter {
            root: optimize(Expr::lt(self.field, value)),
        }
    }

    /// Field's date is on or after the given date.
    pub fn is_on_or_after(self, date: NaiveDate) -> RowFilter {
        let value = self.format_date(date);
        RowFilter {
            root: optimize(Expr::gt_eq(self.field, value)),
        }
    }

    /// Field's date is on or before the given date.
    pub fn is_on_or_before(self, date: NaiveDate) -> RowFilter {
        let value = self.format_date(date);
        RowFilter {
            root: optimize(Expr::lt_eq(self.field, value)),
        }
    }

    /// Field's date is exactly the given date.
    pub fn is_on(self, date: NaiveDate) -> RowFilter {
        let value = self.format_date(date);
        RowFilter {
            root: optimize(Expr::eq(self.field, value)),
        }
    }

    /// Field's date lies in the inclusive range, parsed with the format.
    pub fn is_between(self, start: NaiveDate, end: NaiveDate) -> RowFilter {
        RowFilter {
            root: optimize(Expr::date_between(self.field, start, end, self.format)),
        }
    }
}
