// SPDX-License-Identifier: Apache-2.0

//! Test harnesses and sampling utilities shared by the e2e and property
//! suites.
//!

#![allow(dead_code)]

use css2sld::prelude::*;
use rand::{Rng, RngExt};

/// The rules of a feature-type style matching one (feature, scale) pair.
pub(crate) fn matching_rules<'a>(
    fts: &'a FeatureTypeStyle,
    feature: &Feature,
    scale: f64,
) -> Vec<&'a Rule> {
    fts.rules
        .iter()
        .filter(|r| {
            r.min_scale.is_none_or(|m| scale >= m)
                && r.max_scale.is_none_or(|m| scale < m)
                && r.filter.evaluate(feature)
        })
        .collect()
}

/// Sample a random feature over the attribute vocabulary the test
/// stylesheets use.
pub(crate) fn random_feature(rng: &mut impl Rng) -> Feature {
    let classes = ["highway", "street", "track", "path"];
    let class = classes[rng.random_range(0..classes.len())];
    Feature::new(
        None,
        [
            ("pop", AttrValue::Num(rng.random_range(0.0..1_000_000.0))),
            ("class", AttrValue::Str(class.to_owned())),
            ("name", AttrValue::Str(format!("f{}", rng.random_range(0..100)))),
        ],
    )
}

/// Sample a random scale denominator, biased to straddle the boundaries
/// the test stylesheets use.
pub(crate) fn random_scale(rng: &mut impl Rng) -> f64 {
    rng.random_range(0.0..200_000.0)
}

/// First symbolizer of a rule, which must be a line, as its stroke.
pub(crate) fn first_stroke(rule: &Rule) -> &Stroke {
    match rule.symbolizers.first() {
        Some(Symbolizer::Line(line)) => &line.stroke,
        x => panic!("expected a line symbolizer, got {x:?}"),
    }
}

/// Stroke color literal of a rule's first line symbolizer.
pub(crate) fn stroke_color(rule: &Rule) -> String {
    match &first_stroke(rule).color {
        Some(Expr::Literal(x)) => x.to_owned(),
        x => panic!("expected a literal stroke color, got {x:?}"),
    }
}
