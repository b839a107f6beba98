// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Polygon symbolizer synthesis.
//!

use super::{
    LINE_VENDOR, POLYGON_VENDOR, build_graphic, geometry, has_vendor_option, line, repeat_count,
    root_at, scaled, vendor_options,
};
use crate::{
    MyError,
    property::PropertyName,
    rule::CssRule,
    sld::{Fill, PolygonSymbolizer, Symbolizer},
};

const FILL_PROPS: &[PropertyName] = &[PropertyName::Fill, PropertyName::FillOpacity];

/// Emit polygon symbolizers for a rule carrying `fill`. The stroke rides
/// along inside the polygon unless a line-specific vendor option claims it
/// for a separate line symbolizer.
pub(super) fn build(rule: &CssRule) -> Result<Vec<Symbolizer>, MyError> {
    if rule.root_values(&PropertyName::Fill).is_none() {
        return Ok(vec![]);
    }

    let owns_stroke = rule.root_values(&PropertyName::Stroke).is_some()
        && !has_vendor_option(rule, LINE_VENDOR);
    let n = if owns_stroke {
        repeat_count(rule, FILL_PROPS).max(repeat_count(rule, line::STROKE_PROPS))
    } else {
        repeat_count(rule, FILL_PROPS)
    };

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let Some(v) = root_at(rule, &PropertyName::Fill, i) else {
            continue;
        };
        let mut fill = Fill {
            opacity: scaled(rule, &PropertyName::FillOpacity, i),
            ..Default::default()
        };
        if v.as_function().is_some() {
            fill.graphic = Some(build_graphic(rule, "fill", v, i, false)?);
        } else {
            fill.color = Some(v.to_expression());
        }

        let stroke = if owns_stroke {
            Some(line::build_stroke(rule, i)?)
        } else {
            None
        };

        out.push(Symbolizer::Polygon(PolygonSymbolizer {
            geometry: geometry(rule, &PropertyName::FillGeometry),
            fill,
            stroke,
            options: vendor_options(rule, POLYGON_VENDOR),
        }));
    }
    Ok(out)
}
