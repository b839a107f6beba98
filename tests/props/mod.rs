// SPDX-License-Identifier: Apache-2.0

//! Property suites: invariants that must hold for any input.
//!

mod comments;
mod equivalence;
mod exclusion;
mod ordering;
mod units;
