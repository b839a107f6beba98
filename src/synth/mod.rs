// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Symbolizer synthesizers...
//!
//! Each merged rule is projected onto zero or more SLD symbolizers, one
//! synthesizer per kind, invoked in the fixed polygon / line / point /
//! text / raster order. The helpers here carry the shared mechanics:
//! repetition counting, scalar broadcast, unit defaults, vendor-option
//! tables and pseudo-class merging.
//!

mod graphic;
mod line;
mod point;
mod polygon;
mod raster;
mod text;

use crate::{
    MyError,
    filter::Expr,
    property::{PropertyName, PseudoClass},
    rule::CssRule,
    sld::{Symbolizer, VendorOptions},
    value::{self, Value},
};
use std::collections::BTreeMap;

pub(crate) use graphic::build_graphic;

/// Run the five synthesizers over one merged rule, in emission order.
pub(crate) fn build_symbolizers(rule: &CssRule) -> Result<Vec<Symbolizer>, MyError> {
    let mut out = vec![];
    out.extend(polygon::build(rule)?);
    out.extend(line::build(rule)?);
    out.extend(point::build(rule)?);
    out.extend(text::build(rule)?);
    out.extend(raster::build(rule)?);
    Ok(out)
}

// ===== repetition helpers ===================================================

// Maximum list length among the named ROOT properties; at least 1.
pub(super) fn repeat_count(rule: &CssRule, names: &[PropertyName]) -> usize {
    names
        .iter()
        .filter_map(|n| rule.root_values(n))
        .map(|v| v.len())
        .max()
        .unwrap_or(1)
        .max(1)
}

// The i-th value of a list, w/ scalar broadcast when the list is a
// singleton.
pub(super) fn value_at(values: &[Value], i: usize) -> Option<&Value> {
    match values.len() {
        0 => None,
        1 => Some(&values[0]),
        n if i < n => Some(&values[i]),
        _ => None,
    }
}

// The i-th value of a named ROOT property.
pub(super) fn root_at<'a>(rule: &'a CssRule, name: &PropertyName, i: usize) -> Option<&'a Value> {
    rule.root_values(name).and_then(|v| value_at(v, i))
}

// ===== unit + numeric projections ===========================================

// Dimensioned literal w/ a default unit: `12px` w/ default `px` becomes the
// plain literal `12`, any other suffix stays verbatim, expressions pass
// through untouched.
pub(super) fn measure(
    rule: &CssRule,
    name: &PropertyName,
    i: usize,
    unit: &str,
) -> Option<Expr> {
    root_at(rule, name, i).map(|v| match v {
        Value::Literal(x) => Expr::Literal(value::strip_unit(x, unit)),
        x => x.to_expression(),
    })
}

// Opacity-style projection: percentage literals normalize into `[0, 1]`.
pub(super) fn scaled(rule: &CssRule, name: &PropertyName, i: usize) -> Option<Expr> {
    root_at(rule, name, i).map(|v| match v {
        Value::Literal(x) => match value::parse_scaled(x) {
            Some(n) => Expr::Literal(trim_float(n)),
            None => Expr::Literal(x.to_owned()),
        },
        x => x.to_expression(),
    })
}

// Numeric list projection of one value (e.g. a dash array); percentages
// normalize, anything non-numeric is a shape error.
pub(super) fn float_array(value: &Value, property: &str) -> Result<Vec<f32>, MyError> {
    let mut out = vec![];
    for v in value.iter_multi() {
        let lit = v.to_literal();
        match lit.as_deref().and_then(value::parse_scaled) {
            Some(n) => out.push(n as f32),
            None => {
                return Err(MyError::value(
                    property,
                    format!("expected a number, got '{v}'"),
                ));
            }
        }
    }
    Ok(out)
}

// Exactly-two-numbers projection (anchors and displacements).
pub(super) fn double_pair(value: &Value, property: &str) -> Result<(f64, f64), MyError> {
    let items: Vec<&Value> = value.iter_multi().collect();
    if items.len() != 2 {
        return Err(MyError::value(
            property,
            format!("expected exactly two numbers, got '{value}'"),
        ));
    }
    let mut nums = [0.0f64; 2];
    for (slot, v) in nums.iter_mut().zip(&items) {
        match v.to_literal().as_deref().and_then(value::parse_scaled) {
            Some(n) => *slot = n,
            None => {
                return Err(MyError::value(
                    property,
                    format!("expected a number, got '{v}'"),
                ));
            }
        }
    }
    Ok((nums[0], nums[1]))
}

// Render a float w/o a trailing `.0` so unit round-trips stay textual.
pub(super) fn trim_float(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ===== pseudo-class merging =================================================

// Merge the property bags feeding the i-th (0-based) repetition of a named
// pseudo-class, later sources overriding earlier ones: `symbol`,
// `symbol:nth(i+1)`, `<pseudo>`, `<pseudo>:nth(i+1)`.
pub(super) fn indexed_pseudo_values(
    rule: &CssRule,
    pseudo: &str,
    i: usize,
) -> BTreeMap<PropertyName, Vec<Value>> {
    let nth = (i + 1) as u32;
    let sources = [
        PseudoClass::new("symbol"),
        PseudoClass::indexed("symbol", nth),
        PseudoClass::new(pseudo),
        PseudoClass::indexed(pseudo, nth),
    ];

    let mut out = BTreeMap::new();
    for source in sources {
        for ((pc, name), values) in &rule.properties {
            if *pc == source {
                out.insert(name.clone(), values.clone());
            }
        }
    }
    out
}

// ===== vendor options =======================================================

// cartographic key -> SLD option key tables, per symbolizer kind...
pub(super) const POLYGON_VENDOR: &[(&str, &str)] = &[
    ("-gt-graphic-margin", "graphic-margin"),
    ("-gt-fill-label-obstacle", "labelObstacle"),
    ("-gt-fill-random", "random"),
    ("-gt-fill-random-seed", "random-seed"),
    ("-gt-fill-random-tile-size", "random-tile-size"),
    ("-gt-fill-random-symbol-count", "random-symbol-count"),
    ("-gt-fill-random-space-around", "random-space-around"),
    ("-gt-fill-random-rotation", "random-rotation"),
];

pub(super) const LINE_VENDOR: &[(&str, &str)] = &[("-gt-stroke-label-obstacle", "labelObstacle")];

pub(super) const POINT_VENDOR: &[(&str, &str)] = &[("-gt-mark-label-obstacle", "labelObstacle")];

pub(super) const TEXT_VENDOR: &[(&str, &str)] = &[
    ("-gt-label-padding", "spaceAround"),
    ("-gt-label-group", "group"),
    ("-gt-label-max-displacement", "maxDisplacement"),
    ("-gt-label-min-group-distance", "minGroupDistance"),
    ("-gt-label-repeat", "repeat"),
    ("-gt-label-all-group", "allGroup"),
    ("-gt-label-remove-overlaps", "removeOverlaps"),
    ("-gt-label-allow-overruns", "allowOverrun"),
    ("-gt-label-follow-line", "followLine"),
    ("-gt-label-max-angle-delta", "maxAngleDelta"),
    ("-gt-label-auto-wrap", "autoWrap"),
    ("-gt-label-force-ltr", "forceLeftToRight"),
    ("-gt-label-conflict-resolution", "conflictResolution"),
    ("-gt-label-fit-goodness", "goodnessOfFit"),
    ("-gt-shield-resize", "graphic-resize"),
    ("-gt-shield-margin", "graphic-margin"),
];

// Project the rule's vendor declarations through one translation table.
pub(super) fn vendor_options(rule: &CssRule, table: &[(&str, &str)]) -> VendorOptions {
    let mut out = VendorOptions::new();
    for (css_key, sld_key) in table {
        let name = PropertyName::Vendor((*css_key).to_owned());
        if let Some(values) = rule.root_values(&name)
            && let Some(first) = values.first()
            && let Some(lit) = first.to_literal()
        {
            out.insert((*sld_key).to_owned(), lit);
        }
    }
    out
}

// TRUE when any key of a vendor table is declared on the rule.
pub(super) fn has_vendor_option(rule: &CssRule, table: &[(&str, &str)]) -> bool {
    table.iter().any(|(css_key, _)| {
        rule.root_values(&PropertyName::Vendor((*css_key).to_owned()))
            .is_some()
    })
}

// Alternate-geometry projection of a `*-geometry` property.
pub(super) fn geometry(rule: &CssRule, name: &PropertyName) -> Option<Expr> {
    root_at(rule, name, 0).map(|v| v.to_expression())
}
