// SPDX-License-Identifier: Apache-2.0

//! Z ordering across feature-type styles.
//!
//! Given:
//!     * two catch-all rules on z levels 0 and 1.
//! Then:
//! * assert two feature-type styles, z ascending;
//! * assert each carries its own stroke.
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

fn stroke_of(fts: &FeatureTypeStyle) -> &Stroke {
    match &fts.rules[0].symbolizers[0] {
        Symbolizer::Line(line) => &line.stroke,
        x => panic!("expected a line symbolizer, got {x:?}"),
    }
}

#[test]
#[traced_test]
fn test_z_order() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(
        "* { stroke: black; z-index: 0 } * { stroke: white; z-index: 1; stroke-width: 3 }",
    )?;
    let style = translate(&sheet)?;

    assert_eq!(style.feature_type_styles.len(), 2);

    let bottom = stroke_of(&style.feature_type_styles[0]);
    assert_eq!(bottom.color, Some(Expr::Literal("black".into())));

    let top = stroke_of(&style.feature_type_styles[1]);
    assert_eq!(top.color, Some(Expr::Literal("white".into())));
    assert_eq!(top.width, Some(Expr::Literal("3".into())));
    Ok(())
}

#[test]
#[traced_test]
fn test_multi_valued_z_splits_one_rule() -> Result<(), Box<dyn Error>> {
    // one rule painting two levels: casing below, fill line above...
    let sheet = Stylesheet::try_from_text(
        "* { stroke: #333333, #ffcc00; stroke-width: 7, 5; z-index: 0, 1 }",
    )?;
    let style = translate(&sheet)?;

    assert_eq!(style.feature_type_styles.len(), 2);
    let casing = stroke_of(&style.feature_type_styles[0]);
    assert_eq!(casing.color, Some(Expr::Literal("#333333".into())));
    assert_eq!(casing.width, Some(Expr::Literal("7".into())));
    let inner = stroke_of(&style.feature_type_styles[1]);
    assert_eq!(inner.color, Some(Expr::Literal("#ffcc00".into())));
    assert_eq!(inner.width, Some(Expr::Literal("5".into())));
    Ok(())
}
