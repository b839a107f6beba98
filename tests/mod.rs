// SPDX-License-Identifier: Apache-2.0

//! End-to-end and property-based suites for the translator.
//!

// Common test harnesses and sampling utilities.
mod utils;

/// End-to-end scenarios: one stylesheet in, one asserted SLD tree out.
mod e2e;

/// Invariants the translation upholds for any input: mutual exclusion,
/// visual equivalence, ordering, cap boundedness, unit round-trips,
/// comment tags.
mod props;
