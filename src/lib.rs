//! Predicate-based row filtering for tabular data.
//!
//! `sift` filters rows — mappings from field name to string cell value —
//! through boolean predicates built with a fluent API. Every predicate is
//! run through an algebraic optimizer before evaluation: constants fold,
//! negations push down, same-field comparisons coalesce into ranges and
//! in-lists, redundant and absorbed branches disappear, and children are
//! reordered so the cheapest checks run first.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use sift::RowFilter;
//!
//! let filter = RowFilter::field("age")
//!     .gt_eq("18")
//!     .and(RowFilter::field("age").lt("65"))
//!     .and(RowFilter::field("name").starts_with("A"));
//!
//! let row: HashMap<String, String> = [
//!     ("name".to_string(), "Alice".to_string()),
//!     ("age".to_string(), "30".to_string()),
//! ]
//! .into();
//! assert!(filter.evaluate(&row));
//! ```
//!
//! # Design
//!
//! - **Closed expression AST**: [`Expr`] is a tagged sum with structural
//!   equality and hashing; every optimizer pass matches it exhaustively.
//! - **Immutable trees**: passes return new nodes; unchanged subtrees may be
//!   shared freely.
//! - **Straight-line pipeline**: [`optimize`] composes its rewrite passes in
//!   a fixed order with no fixed-point iteration, so optimization cost is
//!   bounded by tree size.
//! - **No I/O**: parsing rows out of files is a caller concern; anything
//!   implementing [`Row`] can be filtered.

mod error;
pub mod eval;
pub mod expr;
pub mod filter;
pub mod optimize;
mod value;

pub use eval::{evaluate, Row};
pub use expr::{CmpOp, CompositeOp, Expr};
pub use filter::{DateFieldCondition, FieldCondition, RowFilter};
pub use optimize::{estimate_cost, optimize};
