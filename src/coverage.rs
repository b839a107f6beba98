// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Domain-coverage subtraction...
//!
//! SLD rules are first-match-free: every rule whose selection matches gets
//! drawn. To keep the cascade's "most specific wins" outcome, each rule is
//! emitted w/ the domain already claimed by more specific rules carved out
//! of it. A domain is the pair (scale range, feature filter); the visual
//! footprint of a rule.
//!

use crate::{filter::Filter, range::ScaleRange};
use core::fmt;

/// The visual footprint of one emitted rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// Scales the rule is active at.
    pub range: ScaleRange,
    /// Features the rule selects.
    pub filter: Filter,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.range, self.filter)
    }
}

/// Accumulator of the union of all previously-emitted domains.
#[derive(Debug, Default)]
pub struct DomainCoverage {
    covered: Vec<Domain>,
}

impl DomainCoverage {
    /// Start w/ nothing covered.
    pub fn new() -> Self {
        DomainCoverage::default()
    }

    /// Subtract the accumulated coverage from `range x filter`, returning
    /// the visible residue as a list of disjoint sub-domains, then add the
    /// full input domain to the coverage.
    ///
    /// The input scale range is cut at every boundary the coverage knows
    /// about; inside one sub-interval the set of covering filters is
    /// constant, and the residue filter is the input filter minus their
    /// disjunction.
    pub fn subtract(&mut self, range: ScaleRange, filter: &Filter) -> Vec<Domain> {
        let boundaries: Vec<f64> = self
            .covered
            .iter()
            .flat_map(|d| [d.range.min, d.range.max])
            .collect();

        let mut out = vec![];
        for sub in range.split(&boundaries) {
            let covering: Vec<&Filter> = self
                .covered
                .iter()
                .filter(|d| !d.range.intersect(&sub).is_empty())
                .map(|d| &d.filter)
                .collect();

            // fully covered sub-intervals: a catch-all filter, or one
            // structurally equal to the input, leaves nothing visible...
            if covering
                .iter()
                .any(|c| matches!(c, Filter::Include) || *c == filter)
            {
                continue;
            }

            let visible = if covering.is_empty() {
                filter.clone()
            } else {
                let already = Filter::any(covering.into_iter().cloned());
                Filter::and(filter.clone(), Filter::not(already))
            };
            if !matches!(visible, Filter::Exclude) {
                out.push(Domain {
                    range: sub,
                    filter: visible,
                });
            }
        }

        self.covered.push(Domain {
            range,
            filter: filter.clone(),
        });
        out
    }
}
