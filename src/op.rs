// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Comparison operators of the feature-predicate algebra...
//!

use core::fmt;

/// Operators usable inside an attribute predicate and, after compilation,
/// inside an OGC filter comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Op {
    /// equal to
    Eq,
    /// not equal to
    Neq,
    /// less than
    Lt,
    /// greater than
    Gt,
    /// less than or equal to
    Lte,
    /// greater than or equal to
    Gte,
    /// SQL-style pattern match w/ `%` and `_` wildcards
    IsLike,
    /// closed-interval membership over numerics
    IsBetween,
}

impl Op {
    // operators admitting a numeric-range reading, used when simplifying
    // data predicates against a feature type...
    pub(crate) fn ranged(&self) -> bool {
        matches!(
            self,
            Op::Eq | Op::Lt | Op::Gt | Op::Lte | Op::Gte | Op::IsBetween
        )
    }

    /// Return the operator w/ its operands' roles swapped; i.e. the `op'`
    /// such that `a op b == b op' a`. Pattern operators do not commute and
    /// are returned unchanged.
    pub(crate) fn flip(&self) -> Op {
        match self {
            Op::Lt => Op::Gt,
            Op::Gt => Op::Lt,
            Op::Lte => Op::Gte,
            Op::Gte => Op::Lte,
            x => *x,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Eq => write!(f, "="),
            Op::Neq => write!(f, "<>"),
            Op::Lt => write!(f, "<"),
            Op::Gt => write!(f, ">"),
            Op::Lte => write!(f, "<="),
            Op::Gte => write!(f, ">="),
            Op::IsLike => write!(f, "LIKE"),
            Op::IsBetween => write!(f, "BETWEEN"),
        }
    }
}
