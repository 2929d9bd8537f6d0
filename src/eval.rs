//! Predicate evaluation against a single row.
//!
//! A row is anything that can answer "what is the cell value for this
//! field", with `None` meaning the field is absent. A missing field makes
//! every leaf false except `IsNull`.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use regex::RegexBuilder;

use crate::expr::{CmpOp, CompositeOp, Expr};
use crate::value;

/// A single tabular row: a mapping from field name to cell value.
pub trait Row {
    fn get(&self, field: &str) -> Option<&str>;
}

impl Row for HashMap<String, String> {
    fn get(&self, field: &str) -> Option<&str> {
        HashMap::get(self, field).map(String::as_str)
    }
}

impl Row for BTreeMap<String, String> {
    fn get(&self, field: &str) -> Option<&str> {
        BTreeMap::get(self, field).map(String::as_str)
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn get(&self, field: &str) -> Option<&str> {
        (**self).get(field)
    }
}

impl Expr {
    /// Evaluate this predicate against a row.
    pub fn evaluate<R: Row>(&self, row: &R) -> bool {
        evaluate(self, row)
    }
}

/// Evaluate a predicate expression against a row.
pub fn evaluate<R: Row>(expr: &Expr, row: &R) -> bool {
    match expr {
        Expr::Constant(value) => *value,
        Expr::Cmp { field, op, value } => eval_cmp(row.get(field), *op, value),
        Expr::CaseInsensitiveCmp { field, op, value } => {
            eval_cmp_ignore_case(row.get(field), *op, value)
        }
        Expr::Between {
            field,
            low,
            high,
            low_inclusive,
            high_inclusive,
        } => match row.get(field) {
            Some(cell) => {
                in_bound_low(cell, low, *low_inclusive) && in_bound_high(cell, high, *high_inclusive)
            }
            None => false,
        },
        Expr::InList { field, values } => match row.get(field) {
            Some(cell) => values.iter().any(|v| value::equal(cell, v)),
            None => false,
        },
        Expr::DateBetween {
            field,
            start,
            end,
            format,
        } => match row.get(field) {
            Some(cell) => match NaiveDate::parse_from_str(cell, format) {
                Ok(date) => date >= *start && date <= *end,
                Err(_) => false,
            },
            None => false,
        },
        Expr::Not(inner) => !evaluate(inner, row),
        Expr::Composite { op, children } => match op {
            CompositeOp::And => children.iter().all(|child| evaluate(child, row)),
            CompositeOp::Or => children.iter().any(|child| evaluate(child, row)),
        },
    }
}

fn in_bound_low(cell: &str, low: &str, inclusive: bool) -> bool {
    let ord = value::compare(cell, low);
    if inclusive {
        ord.is_ge()
    } else {
        ord.is_gt()
    }
}

fn in_bound_high(cell: &str, high: &str, inclusive: bool) -> bool {
    let ord = value::compare(cell, high);
    if inclusive {
        ord.is_le()
    } else {
        ord.is_lt()
    }
}

fn eval_cmp(cell: Option<&str>, op: CmpOp, value: &str) -> bool {
    match op {
        CmpOp::IsNull => return cell.is_none(),
        CmpOp::IsNotNull => return cell.is_some(),
        _ => {}
    }
    let Some(cell) = cell else {
        return false;
    };
    match op {
        CmpOp::Eq => value::equal(cell, value),
        CmpOp::NotEq => !value::equal(cell, value),
        CmpOp::Lt => value::compare(cell, value).is_lt(),
        CmpOp::LtEq => value::compare(cell, value).is_le(),
        CmpOp::Gt => value::compare(cell, value).is_gt(),
        CmpOp::GtEq => value::compare(cell, value).is_ge(),
        CmpOp::Contains => cell.contains(value),
        CmpOp::StartsWith => cell.starts_with(value),
        CmpOp::EndsWith => cell.ends_with(value),
        CmpOp::Matches => regex_full_match(cell, value, false),
        CmpOp::IsNull | CmpOp::IsNotNull => unreachable!("handled above"),
    }
}

fn eval_cmp_ignore_case(cell: Option<&str>, op: CmpOp, value: &str) -> bool {
    match op {
        // String operators fold case; everything else keeps plain semantics.
        CmpOp::Eq | CmpOp::NotEq | CmpOp::Contains | CmpOp::StartsWith | CmpOp::EndsWith => {
            let Some(cell) = cell else {
                return false;
            };
            let cell = cell.to_lowercase();
            let value = value.to_lowercase();
            match op {
                CmpOp::Eq => cell == value,
                CmpOp::NotEq => cell != value,
                CmpOp::Contains => cell.contains(&value),
                CmpOp::StartsWith => cell.starts_with(&value),
                CmpOp::EndsWith => cell.ends_with(&value),
                _ => unreachable!(),
            }
        }
        CmpOp::Matches => match cell {
            Some(cell) => regex_full_match(cell, value, true),
            None => false,
        },
        _ => eval_cmp(cell, op, value),
    }
}

/// Full-string regex match. An invalid pattern matches nothing.
fn regex_full_match(cell: &str, pattern: &str, case_insensitive: bool) -> bool {
    RegexBuilder::new(&format!("^(?:{})$", pattern))
        .case_insensitive(case_insensitive)
        .build()
        .map(|re| re.is_match(cell))
        .unwrap_or(false)
}
