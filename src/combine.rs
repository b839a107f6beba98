// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Power-set combiner...
//!
//! Cascading rules overlap; SLD rules cannot. For every subset of rules
//! that some feature could match *exactly*, this pass produces one merged
//! rule whose property bag is the specificity-weighted overlay of the
//! subset's bags. Enumeration streams by subset cardinality (singletons
//! first) and grows only satisfiable subsets, so the configured cap bounds
//! both output size and work even when `2^n` is astronomical.
//!

use crate::{
    feature::FeatureType,
    rule::CssRule,
    selector::Selector,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Combine a specificity-descending rule list into the merged rules of all
/// exactly-matchable subsets, capped at `max_combinations` produced rules.
///
/// A subset is a candidate when the conjunction of its selectors does not
/// simplify to `Reject`; it is produced when additionally some feature can
/// match it and nothing outside it (the conjunction w/ every excluded
/// rule's negated selector stays satisfiable). Singleton subsets are always
/// produced. Supersets of rejected subsets are never visited.
///
/// The returned list is in emission order: merged-selector specificity
/// descending, larger subsets first among ties.
pub fn combine(
    rules: &[CssRule],
    max_combinations: usize,
    ft: Option<&FeatureType>,
) -> Vec<CssRule> {
    let n = rules.len();
    let mut produced: Vec<(CssRule, usize)> = vec![];
    // satisfiable subsets of the current cardinality, as (member indexes,
    // simplified conjunction) pairs...
    let mut frontier: Vec<(Vec<usize>, Selector)> = vec![];
    let mut truncated = false;

    // cardinality 1: singletons bypass the exact-match test...
    for (i, r) in rules.iter().enumerate() {
        let sel = r.selector.simplify(ft);
        if matches!(sel, Selector::Reject) {
            debug!("rule #{i} can never match; dropped");
            continue;
        }
        if produced.len() >= max_combinations {
            truncated = true;
            break;
        }
        produced.push((merged_rule(rules, &[i], sel.clone()), 1));
        frontier.push((vec![i], sel));
    }

    // higher cardinalities, growing each satisfiable subset by one later
    // rule at a time...
    'grow: while !frontier.is_empty() && !truncated {
        let mut next: Vec<(Vec<usize>, Selector)> = vec![];
        for (subset, sel) in &frontier {
            let last = *subset.last().expect("frontier subsets are non-empty");
            for j in last + 1..n {
                let cand = Selector::and(sel.clone(), rules[j].selector.clone()).simplify(ft);
                if matches!(cand, Selector::Reject) {
                    continue;
                }
                let mut members = subset.clone();
                members.push(j);
                if exactly_matchable(rules, &members, &cand, ft) {
                    if produced.len() >= max_combinations {
                        truncated = true;
                        break 'grow;
                    }
                    let k = members.len();
                    produced.push((merged_rule(rules, &members, cand.clone()), k));
                }
                next.push((members, cand));
            }
        }
        frontier = next;
    }

    if truncated {
        warn!(
            "combination cap of {max_combinations} reached w/ {n} source rules; \
             remaining combinations discarded"
        );
    }
    debug!("{n} source rules -> {} combined", produced.len());

    // emission order: specificity descending, and at equal specificity the
    // larger subset first -- its property overlay is the one the cascade
    // would actually show, so it must claim the domain before any of its
    // sub-combinations do.
    produced.sort_by(|(ra, ka), (rb, kb)| {
        rb.specificity()
            .cmp(&ra.specificity())
            .then(kb.cmp(ka))
    });
    produced.into_iter().map(|(r, _)| r).collect()
}

// TRUE when some feature at some scale matches every rule in `members` and
// none of the others.
fn exactly_matchable(
    rules: &[CssRule],
    members: &[usize],
    sel: &Selector,
    ft: Option<&FeatureType>,
) -> bool {
    let mut s = sel.clone();
    for (j, r) in rules.iter().enumerate() {
        if members.contains(&j) {
            continue;
        }
        s = Selector::and(s, Selector::not(r.selector.clone()));
    }
    !matches!(s.simplify(ft), Selector::Reject)
}

// Overlay the subset's property bags, lowest precedence first so that
// higher specificity (and, at equal specificity, the later rule) wins
// key by key.
fn merged_rule(rules: &[CssRule], members: &[usize], sel: Selector) -> CssRule {
    let mut order = members.to_vec();
    order.sort_by_key(|i| rules[*i].specificity());

    let mut properties = BTreeMap::new();
    for i in order {
        for (k, v) in &rules[i].properties {
            properties.insert(k.clone(), v.clone());
        }
    }

    let comments: Vec<&str> = members
        .iter()
        .filter_map(|i| rules[*i].comment.as_deref())
        .collect();
    let comment = if comments.is_empty() {
        None
    } else {
        Some(comments.join("\n"))
    };

    CssRule {
        selector: sel,
        properties,
        comment,
    }
}
