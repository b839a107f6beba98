// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The translation pipeline...
//!
//! A parsed stylesheet runs through a fixed sequence of passes: split into
//! z bands, group per feature-type name, flatten OR'd scale ranges,
//! enumerate rule combinations, subtract already-covered domains, then
//! synthesize filters and symbolizers into the SLD tree. The input rule
//! list is never mutated; every pass builds fresh rules.
//!

use crate::{
    MyError, Stylesheet,
    combine::combine,
    config::config,
    coverage::DomainCoverage,
    extract,
    filter::Filter,
    range::ScaleRange,
    rule::CssRule,
    selector::{Selector, TypeName},
    sld::{FeatureTypeStyle, Rule, Style},
    synth,
};
use tracing::debug;

/// The stylesheet-to-SLD translator. Holds the one configuration knob: the
/// power-set combination cap, resolved from the environment
/// (`CSS2SLD_MAX_COMBINATIONS`) at construction unless overridden
/// explicitly.
#[derive(Debug, Clone)]
pub struct Translator {
    max_combinations: usize,
}

impl Default for Translator {
    fn default() -> Self {
        Translator::new()
    }
}

impl Translator {
    /// A translator w/ the environment-resolved combination cap.
    pub fn new() -> Self {
        Translator {
            max_combinations: config().max_combinations(),
        }
    }

    /// A translator w/ an explicit combination cap.
    pub fn with_max_combinations(max_combinations: usize) -> Self {
        Translator { max_combinations }
    }

    /// The effective combination cap.
    pub fn max_combinations(&self) -> usize {
        self.max_combinations
    }

    /// Translate a stylesheet into an SLD style tree.
    ///
    /// Feature-type styles come out z ascending then type-name insertion
    /// order; rules w/in one feature-type style are mutually exclusive and
    /// specificity descending.
    pub fn translate(&self, stylesheet: &Stylesheet) -> Result<Style, MyError> {
        let rules = stylesheet.rules();
        let mut style = Style::default();

        // z bands, ascending...
        let mut zs: Vec<i64> = vec![];
        for r in rules {
            for z in r.z_indexes() {
                if !zs.contains(&z) {
                    zs.push(z);
                }
            }
        }
        if zs.is_empty() {
            zs.push(0);
        }
        zs.sort_unstable();

        for z in zs {
            let band: Vec<CssRule> = rules
                .iter()
                .filter_map(|r| r.sub_rule_by_z_index(z))
                .collect();
            if !band.iter().any(|r| r.has_symbolizer_property()) {
                debug!("z band {z} draws nothing; skipped");
                continue;
            }

            for (tn, group) in type_name_groups(band) {
                if let Some(fts) = self.translate_group(tn, group)? {
                    style.feature_type_styles.push(fts);
                }
            }
        }
        Ok(style)
    }

    // One feature-type style out of one (band, type-name) group.
    fn translate_group(
        &self,
        tn: TypeName,
        group: Vec<CssRule>,
    ) -> Result<Option<FeatureTypeStyle>, MyError> {
        let ft = extract::guess_feature_type(&group);
        let mut sorted = flatten_scale_ranges(group);
        sorted.sort_by(|a, b| b.specificity().cmp(&a.specificity()));

        // combine() hands the merged rules back already in emission order
        // (specificity descending, larger subsets first among ties)...
        let combined = combine(&sorted, self.max_combinations, Some(&ft));
        debug!(
            "type-name {tn}: {} rules combined into {}",
            sorted.len(),
            combined.len()
        );

        let mut coverage = DomainCoverage::new();
        let mut out: Vec<Rule> = vec![];
        'emit: for rule in &combined {
            if !rule.has_symbolizer_property() {
                continue;
            }
            let symbolizers = synth::build_symbolizers(rule)?;
            if symbolizers.is_empty() {
                continue;
            }

            let range = extract::scale_range(&rule.selector).unwrap_or(ScaleRange::FULL);
            let filter = rule.selector.to_filter();
            if matches!(filter, Filter::Exclude) {
                continue;
            }

            let title = rule.title();
            let abstract_text = rule.abstract_text();
            for domain in coverage.subtract(range, &filter) {
                // the cap also bounds emitted rules: domain splitting must
                // not smuggle the output past it...
                if out.len() >= self.max_combinations {
                    debug!("emission cap reached; remaining rules discarded");
                    break 'emit;
                }
                out.push(Rule {
                    title: title.clone(),
                    abstract_text: abstract_text.clone(),
                    filter: domain.filter,
                    min_scale: (domain.range.min > 0.0).then_some(domain.range.min),
                    max_scale: domain.range.max.is_finite().then_some(domain.range.max),
                    symbolizers: symbolizers.clone(),
                });
            }
        }

        if out.is_empty() {
            return Ok(None);
        }
        Ok(Some(FeatureTypeStyle {
            feature_type_names: vec![tn],
            rules: out,
        }))
    }
}

// Group a band's rules per referenced type-name, injecting the name into
// each member's selector. When the band only ever references the wildcard
// a single group carries it verbatim; otherwise the wildcard is dropped
// from the name set so features are not drawn twice.
fn type_name_groups(band: Vec<CssRule>) -> Vec<(TypeName, Vec<CssRule>)> {
    let mut names: Vec<TypeName> = vec![];
    for r in &band {
        for t in extract::type_names(&r.selector) {
            if !names.contains(&t) {
                names.push(t);
            }
        }
    }

    if names.iter().all(|t| t.is_default()) {
        return vec![(TypeName::DEFAULT, band)];
    }

    names
        .into_iter()
        .filter(|t| !t.is_default())
        .map(|t| {
            let members: Vec<CssRule> = band
                .iter()
                .filter_map(|r| {
                    let sel =
                        Selector::and(Selector::TypeName(t.clone()), r.selector.clone())
                            .simplify(None);
                    if matches!(sel, Selector::Reject) {
                        return None;
                    }
                    Some(CssRule {
                        selector: sel,
                        properties: r.properties.clone(),
                        comment: r.comment.clone(),
                    })
                })
                .collect();
            (t, members)
        })
        .collect()
}

// Rewrite each rule whose selector is an OR into one sibling rule per
// scale-bearing branch plus one rule over the remaining branches. The SLD
// side cannot express a disjunction of scale ranges w/in one rule; when an
// OR mixes scale-bearing and plain branches this shifts selectivity
// slightly (a feature matching both a scale branch and a plain branch is
// drawn by each sibling), which is accepted behaviour.
fn flatten_scale_ranges(rules: Vec<CssRule>) -> Vec<CssRule> {
    let mut out = vec![];
    for r in rules {
        let Selector::Or(children) = &r.selector else {
            out.push(r);
            continue;
        };
        let (scale_bearing, plain): (Vec<Selector>, Vec<Selector>) = children
            .iter()
            .cloned()
            .partition(|c| extract::scale_range(c).is_some());
        if scale_bearing.is_empty() {
            out.push(r);
            continue;
        }

        for child in scale_bearing {
            out.push(CssRule {
                selector: child,
                properties: r.properties.clone(),
                comment: r.comment.clone(),
            });
        }
        if !plain.is_empty() {
            let selector = match plain.len() {
                1 => plain.into_iter().next().expect("one survivor"),
                _ => Selector::Or(plain),
            };
            out.push(CssRule {
                selector,
                properties: r.properties.clone(),
                comment: r.comment.clone(),
            });
        }
    }
    out
}

/// Translate w/ the environment-resolved default cap. Shorthand for
/// [`Translator::new().translate(...)`][Translator::translate].
pub fn translate(stylesheet: &Stylesheet) -> Result<Style, MyError> {
    Translator::new().translate(stylesheet)
}

/// Translate w/ an explicit combination cap.
pub fn translate_capped(stylesheet: &Stylesheet, max_combinations: usize) -> Result<Style, MyError> {
    Translator::with_max_combinations(max_combinations).translate(stylesheet)
}
