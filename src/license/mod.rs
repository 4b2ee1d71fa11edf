//! License string normalization and disallow-set evaluation.
//!
//! - [`normalize`] — maps informal license labels ("GPL V3", "Apache License
//!   2.0") to canonical SPDX-style identifiers via a static alias table.
//! - [`expr`] — parses and evaluates boolean license expressions
//!   (AND/OR/WITH, parenthesized) against the policy's disallow-set, with a
//!   string-split fallback when the expression is not well formed.

pub mod expr;
pub mod normalize;
