use chrono::NaiveDate;

/// Comparison operator for a single-field predicate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    IsNull,
    IsNotNull,
}

impl CmpOp {
    /// True for the four inequality operators, the only ones the range
    /// algebra can lower into numeric intervals.
    pub fn is_range_op(self) -> bool {
        matches!(self, CmpOp::Lt | CmpOp::LtEq | CmpOp::Gt | CmpOp::GtEq)
    }
}

/// Logical connective of a [`Expr::Composite`] node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CompositeOp {
    And,
    Or,
}

impl CompositeOp {
    pub fn opposite(self) -> Self {
        match self {
            CompositeOp::And => CompositeOp::Or,
            CompositeOp::Or => CompositeOp::And,
        }
    }

    /// The constant a child may contribute without changing the result.
    pub(crate) fn identity(self) -> bool {
        matches!(self, CompositeOp::And)
    }

    /// The constant that forces the whole composite to its own value.
    pub(crate) fn annihilator(self) -> bool {
        matches!(self, CompositeOp::Or)
    }
}

/// Expression tree for row predicates.
///
/// Nodes are immutable once constructed; every rewrite in
/// [`optimize`](crate::optimize::optimize) produces new nodes. Equality and
/// hashing are structural, which the optimizer relies on for duplicate
/// elimination and absorption.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Boolean constant. `Expr::TRUE` and `Expr::FALSE` are the canonical
    /// instances; any `Constant(b)` with the same value compares equal.
    Constant(bool),
    Cmp {
        field: String,
        op: CmpOp,
        value: String,
    },
    /// Same shape as [`Expr::Cmp`] with case-insensitive string semantics.
    /// The optimizer treats it as an opaque leaf and never coalesces it
    /// with plain comparisons.
    CaseInsensitiveCmp {
        field: String,
        op: CmpOp,
        value: String,
    },
    Between {
        field: String,
        low: String,
        high: String,
        low_inclusive: bool,
        high_inclusive: bool,
    },
    InList {
        field: String,
        values: Vec<String>,
    },
    /// Date range with an explicit parse format; opaque to the optimizer.
    DateBetween {
        field: String,
        start: NaiveDate,
        end: NaiveDate,
        format: String,
    },
    Not(Box<Expr>),
    Composite {
        op: CompositeOp,
        children: Vec<Expr>,
    },
}

impl Expr {
    pub const TRUE: Expr = Expr::Constant(true);
    pub const FALSE: Expr = Expr::Constant(false);

    /// Build a comparison expression with an explicit operator.
    pub fn cmp(field: impl Into<String>, op: CmpOp, value: impl Into<String>) -> Self {
        Expr::Cmp {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Build an equality expression (`=`).
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::Eq, value)
    }

    /// Build a not-equal expression (`!=`).
    pub fn not_eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::NotEq, value)
    }

    /// Build a less-than expression (`<`).
    pub fn lt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::Lt, value)
    }

    /// Build a less-than-or-equal expression (`<=`).
    pub fn lt_eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::LtEq, value)
    }

    /// Build a greater-than expression (`>`).
    pub fn gt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::Gt, value)
    }

    /// Build a greater-than-or-equal expression (`>=`).
    pub fn gt_eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::GtEq, value)
    }

    /// Build a substring containment expression.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::Contains, value)
    }

    /// Build a prefix match expression.
    pub fn starts_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::StartsWith, prefix)
    }

    /// Build a suffix match expression.
    pub fn ends_with(field: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::EndsWith, suffix)
    }

    /// Build a full-string regex match expression.
    pub fn matches(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::Matches, pattern)
    }

    /// Build an IS NULL expression (true when the field is absent).
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::IsNull, "")
    }

    /// Build an IS NOT NULL expression.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::cmp(field, CmpOp::IsNotNull, "")
    }

    /// Build a BETWEEN expression, inclusive on both ends.
    pub fn between(
        field: impl Into<String>,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        Self::between_with_bounds(field, low, high, true, true)
    }

    /// Build a BETWEEN expression with explicit bound inclusivity.
    pub fn between_with_bounds(
        field: impl Into<String>,
        low: impl Into<String>,
        high: impl Into<String>,
        low_inclusive: bool,
        high_inclusive: bool,
    ) -> Self {
        Expr::Between {
            field: field.into(),
            low: low.into(),
            high: high.into(),
            low_inclusive,
            high_inclusive,
        }
    }

    /// Build an IN (...) expression.
    pub fn in_list(field: impl Into<String>, values: Vec<String>) -> Self {
        Expr::InList {
            field: field.into(),
            values,
        }
    }

    /// Build a date range expression parsed with a chrono format string.
    pub fn date_between(
        field: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        format: impl Into<String>,
    ) -> Self {
        Expr::DateBetween {
            field: field.into(),
            start,
            end,
            format: format.into(),
        }
    }

    /// Build a case-insensitive comparison expression.
    pub fn cmp_ignore_case(
        field: impl Into<String>,
        op: CmpOp,
        value: impl Into<String>,
    ) -> Self {
        Expr::CaseInsensitiveCmp {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Build a NOT expression. No simplification happens here; in
    /// particular `Expr::not(Expr::not(x))` is a legal literal tree.
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    /// Build an AND expression.
    pub fn and(children: Vec<Expr>) -> Self {
        Expr::Composite {
            op: CompositeOp::And,
            children,
        }
    }

    /// Build an OR expression.
    pub fn or(children: Vec<Expr>) -> Self {
        Expr::Composite {
            op: CompositeOp::Or,
            children,
        }
    }
}

fn cmp_symbol(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "=",
        CmpOp::NotEq => "!=",
        CmpOp::Lt => "<",
        CmpOp::LtEq => "<=",
        CmpOp::Gt => ">",
        CmpOp::GtEq => ">=",
        CmpOp::Contains => "CONTAINS",
        CmpOp::StartsWith => "STARTS WITH",
        CmpOp::EndsWith => "ENDS WITH",
        CmpOp::Matches => "~",
        CmpOp::IsNull => "IS NULL",
        CmpOp::IsNotNull => "IS NOT NULL",
    }
}

fn fmt_cmp(
    f: &mut std::fmt::Formatter<'_>,
    field: &str,
    op: CmpOp,
    value: &str,
) -> std::fmt::Result {
    match op {
        CmpOp::IsNull | CmpOp::IsNotNull => write!(f, "{} {}", field, cmp_symbol(op)),
        _ => write!(f, "{} {} '{}'", field, cmp_symbol(op), value),
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Constant(true) => write!(f, "TRUE"),
            Expr::Constant(false) => write!(f, "FALSE"),
            Expr::Cmp { field, op, value } => fmt_cmp(f, field, *op, value),
            Expr::CaseInsensitiveCmp { field, op, value } => {
                write!(f, "lower({})", field)?;
                match op {
                    CmpOp::IsNull | CmpOp::IsNotNull => {
                        write!(f, " {}", cmp_symbol(*op))
                    }
                    _ => write!(f, " {} '{}'", cmp_symbol(*op), value.to_lowercase()),
                }
            }
            Expr::Between {
                field,
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => {
                if *low_inclusive && *high_inclusive {
                    write!(f, "{} BETWEEN '{}' AND '{}'", field, low, high)
                } else {
                    let lo = if *low_inclusive { ">=" } else { ">" };
                    let hi = if *high_inclusive { "<=" } else { "<" };
                    write!(
                        f,
                        "{} {} '{}' AND {} {} '{}'",
                        field, lo, low, field, hi, high
                    )
                }
            }
            Expr::InList { field, values } => {
                write!(f, "{} IN (", field)?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}'", v)?;
                }
                write!(f, ")")
            }
            Expr::DateBetween {
                field, start, end, ..
            } => {
                write!(f, "{} BETWEEN DATE '{}' AND DATE '{}'", field, start, end)
            }
            Expr::Not(inner) => write!(f, "NOT ({})", inner),
            Expr::Composite { op, children } => {
                let sep = match op {
                    CompositeOp::And => " AND ",
                    CompositeOp::Or => " OR ",
                };
                if children.is_empty() {
                    return match op {
                        CompositeOp::And => write!(f, "TRUE"),
                        CompositeOp::Or => write!(f, "FALSE"),
                    };
                }
                if children.len() == 1 {
                    return write!(f, "{}", children[0]);
                }
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", sep)?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
