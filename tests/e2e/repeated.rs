// SPDX-License-Identifier: Apache-2.0

//! Repeated symbolizers out of multi-valued properties.
//!
//! Given:
//!     * one rule `* { stroke: red, blue; stroke-width: 2, 6 }`.
//! Then:
//! * assert a single rule w/ two line symbolizers;
//! * assert the 1st is (red, 2px) and the 2nd (blue, 6px).
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_repeated_line_symbolizers() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text("* { stroke: red, blue; stroke-width: 2, 6 }")?;
    let style = translate(&sheet)?;

    let fts = &style.feature_type_styles[0];
    assert_eq!(fts.rules.len(), 1);
    let rule = &fts.rules[0];
    assert_eq!(rule.symbolizers.len(), 2);

    let Symbolizer::Line(first) = &rule.symbolizers[0] else {
        panic!("expected a line symbolizer");
    };
    assert_eq!(first.stroke.color, Some(Expr::Literal("red".into())));
    assert_eq!(first.stroke.width, Some(Expr::Literal("2".into())));

    let Symbolizer::Line(second) = &rule.symbolizers[1] else {
        panic!("expected a line symbolizer");
    };
    assert_eq!(second.stroke.color, Some(Expr::Literal("blue".into())));
    assert_eq!(second.stroke.width, Some(Expr::Literal("6".into())));
    Ok(())
}

#[test]
#[traced_test]
fn test_scalar_broadcast() -> Result<(), Box<dyn Error>> {
    // a single width spreads over both strokes...
    let sheet = Stylesheet::try_from_text("* { stroke: red, blue; stroke-width: 4 }")?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    assert_eq!(rule.symbolizers.len(), 2);
    for s in &rule.symbolizers {
        let Symbolizer::Line(line) = s else {
            panic!("expected a line symbolizer");
        };
        assert_eq!(line.stroke.width, Some(Expr::Literal("4".into())));
    }
    Ok(())
}

#[test]
#[traced_test]
fn test_indexed_pseudo_class_marks() -> Result<(), Box<dyn Error>> {
    // two marks, the 2nd one re-colored through its indexed pseudo-class...
    let src = r#"
        * { mark: symbol(circle), symbol(square); mark-size: 6, 10 }
        :nth-mark(2) { fill: #0000ff }
    "#;
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    assert_eq!(rule.symbolizers.len(), 2);
    let Symbolizer::Point(second) = &rule.symbolizers[1] else {
        panic!("expected a point symbolizer");
    };
    let GraphicKind::Mark(m) = &second.graphic.kind else {
        panic!("expected a mark");
    };
    assert_eq!(
        m.fill.as_ref().and_then(|f| f.color.clone()),
        Some(Expr::Literal("#0000ff".into()))
    );
    Ok(())
}
