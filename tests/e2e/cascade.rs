// SPDX-License-Identifier: Apache-2.0

//! Scale cascade subtraction.
//!
//! Given:
//!     * a catch-all stroke rule and a more specific rule below 1:10000.
//! Then:
//! * assert two mutually exclusive rules come out;
//! * assert the scale-bounded rule is emitted first (higher specificity)
//!   w/ the red stroke;
//! * assert the catch-all keeps only the scales at or above the boundary.
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_scale_cascade_subtraction() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(
        "* { stroke: black } [@scale < 10000] { stroke: red }",
    )?;
    let style = translate(&sheet)?;

    assert_eq!(style.feature_type_styles.len(), 1);
    let fts = &style.feature_type_styles[0];
    assert_eq!(fts.rules.len(), 2);

    let below = &fts.rules[0];
    assert!(below.min_scale.is_none());
    assert_eq!(below.max_scale, Some(10_000.0));
    assert_eq!(below.filter, Filter::Include);
    let Symbolizer::Line(line) = &below.symbolizers[0] else {
        panic!("expected a line symbolizer");
    };
    assert_eq!(line.stroke.color, Some(Expr::Literal("red".into())));

    let above = &fts.rules[1];
    assert_eq!(above.min_scale, Some(10_000.0));
    assert!(above.max_scale.is_none());
    let Symbolizer::Line(line) = &above.symbolizers[0] else {
        panic!("expected a line symbolizer");
    };
    assert_eq!(line.stroke.color, Some(Expr::Literal("black".into())));
    Ok(())
}

#[test]
#[traced_test]
fn test_cascade_inherits_sibling_properties() -> Result<(), Box<dyn Error>> {
    // the width declared on the catch-all must survive into the more
    // specific rule's output...
    let sheet = Stylesheet::try_from_text(
        "* { stroke: black; stroke-width: 3 } [@scale < 10000] { stroke: red }",
    )?;
    let style = translate(&sheet)?;
    let fts = &style.feature_type_styles[0];

    let below = &fts.rules[0];
    let Symbolizer::Line(line) = &below.symbolizers[0] else {
        panic!("expected a line symbolizer");
    };
    assert_eq!(line.stroke.color, Some(Expr::Literal("red".into())));
    assert_eq!(line.stroke.width, Some(Expr::Literal("3".into())));
    Ok(())
}
