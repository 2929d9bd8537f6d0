use thiserror::Error;

use crate::expr::CmpOp;

/// Errors raised inside the numeric range algebra.
///
/// Crate-internal: these never escape [`optimize`](crate::optimize::optimize).
/// The coalescer handles both kinds locally by leaving the offending
/// comparison untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum RangeError {
    /// A comparison operator that has no interval interpretation was handed
    /// to the range algebra.
    #[error("operator {op:?} has no numeric range interpretation")]
    UnsupportedRangeOp {
        /// The operator that was rejected.
        op: CmpOp,
    },

    /// A comparison value did not parse as a finite 64-bit float.
    #[error("value '{value}' is not numeric")]
    NumericParse {
        /// The literal that failed to parse.
        value: String,
    },
}
