// SPDX-License-Identifier: Apache-2.0

//! Emission ordering.
//!
//! Given:
//!     * stylesheets spanning several z levels and specificity tiers.
//! Then:
//! * assert feature-type styles come out z ascending;
//! * assert rules w/in one feature-type style are non-increasing in
//!   selector specificity (more scale/attribute constraints first).
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_z_ascending_even_when_declared_descending() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(
        "* { stroke: white; z-index: 2 } \
         * { stroke: gray; z-index: 1 } \
         * { stroke: black; z-index: 0 }",
    )?;
    let style = translate(&sheet)?;

    let colors: Vec<_> = style
        .feature_type_styles
        .iter()
        .map(|fts| match &fts.rules[0].symbolizers[0] {
            Symbolizer::Line(line) => line.stroke.color.clone(),
            x => panic!("expected a line symbolizer, got {x:?}"),
        })
        .collect();
    assert_eq!(
        colors,
        vec![
            Some(Expr::Literal("black".into())),
            Some(Expr::Literal("gray".into())),
            Some(Expr::Literal("white".into())),
        ]
    );
    Ok(())
}

// constraint count of an emitted rule, coarsely: scale-bounded and
// filtered rules rank above the catch-all...
fn constraint_rank(rule: &Rule) -> usize {
    let scale = usize::from(rule.min_scale.is_some() || rule.max_scale.is_some());
    let filtered = usize::from(rule.filter != Filter::Include);
    scale + filtered
}

#[test]
#[traced_test]
fn test_specificity_non_increasing() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(
        "* { stroke: black } \
         [@scale < 10000] { stroke: red } \
         [pop > 1000] [@scale < 5000] { stroke: green }",
    )?;
    let style = translate(&sheet)?;
    let fts = &style.feature_type_styles[0];

    // the most constrained rule leads, the naked catch-all trails...
    assert!(fts.rules.len() >= 3);
    let first = &fts.rules[0];
    assert!(first.max_scale.is_some());
    assert!(first.filter != Filter::Include);

    let last = fts.rules.last().expect("at least one rule");
    assert!(last.min_scale.is_some() || last.filter == Filter::Include);

    let ranks: Vec<usize> = fts.rules.iter().map(constraint_rank).collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ranks, sorted, "rules are not specificity-ordered: {ranks:?}");
    Ok(())
}
