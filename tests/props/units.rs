// SPDX-License-Identifier: Apache-2.0

//! Unit round-trips.
//!
//! Given:
//!     * properties whose default unit is pixels or degrees.
//! Then:
//! * assert a literal `Xu` (default unit spelled out) and a bare literal
//!   `X` compile to the same numeric literal expression;
//! * assert foreign units are preserved verbatim;
//! * assert percentages normalize into the `[0, 1]` range.
//!

use approx::assert_relative_eq;
use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

fn first_rule(src: &str) -> Result<Rule, Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;
    Ok(style.feature_type_styles[0].rules[0].clone())
}

#[test]
#[traced_test]
fn test_pixel_default_round_trip() -> Result<(), Box<dyn Error>> {
    let with_unit = first_rule("* { stroke: black; stroke-width: 3px }")?;
    let without = first_rule("* { stroke: black; stroke-width: 3 }")?;
    assert_eq!(with_unit, without);

    let Symbolizer::Line(line) = &with_unit.symbolizers[0] else {
        panic!("expected a line symbolizer");
    };
    assert_eq!(line.stroke.width, Some(Expr::Literal("3".into())));
    Ok(())
}

#[test]
#[traced_test]
fn test_degree_default_round_trip() -> Result<(), Box<dyn Error>> {
    let with_unit = first_rule("* { mark: symbol(circle); mark-rotation: 45deg }")?;
    let without = first_rule("* { mark: symbol(circle); mark-rotation: 45 }")?;
    assert_eq!(with_unit, without);
    Ok(())
}

#[test]
#[traced_test]
fn test_foreign_unit_preserved() -> Result<(), Box<dyn Error>> {
    // metres are not the default; the suffix must survive for the uom
    // machinery downstream...
    let rule = first_rule("* { stroke: black; stroke-width: 0.5m }")?;
    let Symbolizer::Line(line) = &rule.symbolizers[0] else {
        panic!("expected a line symbolizer");
    };
    assert_eq!(line.stroke.width, Some(Expr::Literal("0.5m".into())));
    Ok(())
}

#[test]
#[traced_test]
fn test_percentage_normalization() -> Result<(), Box<dyn Error>> {
    let rule = first_rule("* { fill: #808080; fill-opacity: 50% }")?;
    let Symbolizer::Polygon(p) = &rule.symbolizers[0] else {
        panic!("expected a polygon symbolizer");
    };
    let Some(Expr::Literal(opacity)) = &p.fill.opacity else {
        panic!("expected a literal opacity");
    };
    assert_relative_eq!(opacity.parse::<f64>()?, 0.5);
    Ok(())
}
