// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Line symbolizer synthesis.
//!

use super::{
    LINE_VENDOR, build_graphic, geometry, has_vendor_option, measure, repeat_count, root_at,
    scaled, vendor_options,
};
use crate::{
    MyError,
    property::PropertyName,
    rule::CssRule,
    sld::{LineSymbolizer, Stroke, Symbolizer},
};

// the stroke-side properties that drive line repetition...
pub(super) const STROKE_PROPS: &[PropertyName] = &[
    PropertyName::Stroke,
    PropertyName::StrokeOpacity,
    PropertyName::StrokeWidth,
    PropertyName::StrokeLineCap,
    PropertyName::StrokeLineJoin,
    PropertyName::StrokeDashArray,
    PropertyName::StrokeDashOffset,
];

/// Emit line symbolizers for a rule carrying `stroke`, unless the stroke
/// folds into the polygon symbolizer (a fill exists and no line-specific
/// vendor option keeps the stroke separate).
pub(super) fn build(rule: &CssRule) -> Result<Vec<Symbolizer>, MyError> {
    if rule.root_values(&PropertyName::Stroke).is_none() {
        return Ok(vec![]);
    }
    if rule.root_values(&PropertyName::Fill).is_some() && !has_vendor_option(rule, LINE_VENDOR) {
        return Ok(vec![]);
    }

    let n = repeat_count(rule, STROKE_PROPS);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(Symbolizer::Line(LineSymbolizer {
            geometry: geometry(rule, &PropertyName::StrokeGeometry),
            stroke: build_stroke(rule, i)?,
            options: vendor_options(rule, LINE_VENDOR),
        }));
    }
    Ok(out)
}

/// Assemble the i-th stroke of a rule. Shared w/ the polygon synthesizer,
/// which inlines the stroke when it owns it.
pub(super) fn build_stroke(rule: &CssRule, i: usize) -> Result<Stroke, MyError> {
    let mut stroke = Stroke::default();

    if let Some(v) = root_at(rule, &PropertyName::Stroke, i) {
        if v.as_function().is_some() {
            let g = build_graphic(rule, "stroke", v, i, false)?;
            let mode = root_at(rule, &PropertyName::StrokeRepeat, i)
                .and_then(|x| x.to_literal())
                .unwrap_or_else(|| "repeat".to_owned());
            match mode.as_str() {
                "repeat" => stroke.graphic_stroke = Some(g),
                "stipple" => stroke.graphic_fill = Some(g),
                x => {
                    return Err(MyError::value(
                        "stroke-repeat",
                        format!("expected repeat or stipple, got '{x}'"),
                    ));
                }
            }
        } else {
            stroke.color = Some(v.to_expression());
        }
    }

    stroke.opacity = scaled(rule, &PropertyName::StrokeOpacity, i);
    stroke.width = measure(rule, &PropertyName::StrokeWidth, i, "px");
    stroke.line_cap = root_at(rule, &PropertyName::StrokeLineCap, i).map(|v| v.to_expression());
    stroke.line_join = root_at(rule, &PropertyName::StrokeLineJoin, i).map(|v| v.to_expression());
    stroke.dash_array = root_at(rule, &PropertyName::StrokeDashArray, i)
        .map(|v| super::float_array(v, "stroke-dasharray"))
        .transpose()?;
    stroke.dash_offset = measure(rule, &PropertyName::StrokeDashOffset, i, "px");

    Ok(stroke)
}
