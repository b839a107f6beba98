// SPDX-License-Identifier: Apache-2.0

//! A single catch-all polygon rule.
//!
//! Given:
//!     * one rule `* { fill: #ff0000; fill-opacity: 0.5; }`.
//! Then:
//! * assert one feature-type style w/ the wildcard type-name;
//! * assert one rule w/ an INCLUDE filter and no scale limits;
//! * assert one polygon symbolizer w/ color `#ff0000` and opacity `0.5`.
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_single_polygon() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text("* { fill: #ff0000; fill-opacity: 0.5; }")?;
    let style = translate(&sheet)?;

    assert_eq!(style.feature_type_styles.len(), 1);
    let fts = &style.feature_type_styles[0];
    assert_eq!(fts.feature_type_names, vec![TypeName::DEFAULT]);

    assert_eq!(fts.rules.len(), 1);
    let rule = &fts.rules[0];
    assert_eq!(rule.filter, Filter::Include);
    assert!(rule.min_scale.is_none());
    assert!(rule.max_scale.is_none());

    assert_eq!(rule.symbolizers.len(), 1);
    let Symbolizer::Polygon(p) = &rule.symbolizers[0] else {
        panic!("expected a polygon symbolizer");
    };
    assert_eq!(p.fill.color, Some(Expr::Literal("#ff0000".into())));
    assert_eq!(p.fill.opacity, Some(Expr::Literal("0.5".into())));
    assert!(p.stroke.is_none());
    Ok(())
}
