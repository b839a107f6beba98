// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Text symbolizer synthesis.
//!

use super::{
    TEXT_VENDOR, build_graphic, double_pair, geometry, measure, root_at, scaled, vendor_options,
};
use crate::{
    MyError,
    filter::Expr,
    property::PropertyName,
    rule::CssRule,
    sld::{Fill, Font, Halo, LabelPlacement, Symbolizer, TextSymbolizer},
    value::{self, Value},
};

/// Emit the text symbolizer of a rule carrying `label`. Labels do not
/// repeat: a multi-valued `label` concatenates its parts instead.
pub(super) fn build(rule: &CssRule) -> Result<Vec<Symbolizer>, MyError> {
    let Some(label_values) = rule.root_values(&PropertyName::Label) else {
        return Ok(vec![]);
    };
    let label = match label_values {
        [] => return Ok(vec![]),
        [single] => single.to_expression(),
        many => Expr::Function(
            "Concatenate".into(),
            many.iter().map(|v| v.to_expression()).collect(),
        ),
    };

    let symbolizer = TextSymbolizer {
        geometry: geometry(rule, &PropertyName::LabelGeometry),
        label,
        font: build_font(rule),
        fill: build_font_fill(rule),
        placement: build_placement(rule)?,
        halo: build_halo(rule),
        graphic: root_at(rule, &PropertyName::Shield, 0)
            .map(|v| build_graphic(rule, "shield", v, 0, false))
            .transpose()?,
        priority: root_at(rule, &PropertyName::Vendor("-gt-label-priority".into()), 0)
            .map(|v| v.to_expression()),
        options: vendor_options(rule, TEXT_VENDOR),
    };
    Ok(vec![Symbolizer::Text(symbolizer)])
}

// A 1-element `label-offset` selects line placement w/ that perpendicular
// offset; a 2-element offset or any `label-anchor` selects point
// placement.
fn build_placement(rule: &CssRule) -> Result<Option<LabelPlacement>, MyError> {
    let anchor = root_at(rule, &PropertyName::LabelAnchor, 0)
        .map(|v| double_pair(v, "label-anchor"))
        .transpose()?;
    let offset = root_at(rule, &PropertyName::LabelOffset, 0);
    let rotation = measure(rule, &PropertyName::LabelRotation, 0, "deg");

    let displacement = match offset {
        Some(v) if v.repeat_len() == 2 => Some(double_pair(v, "label-offset")?),
        _ => None,
    };

    if anchor.is_some() || displacement.is_some() {
        return Ok(Some(LabelPlacement::Point {
            anchor,
            displacement,
            rotation,
        }));
    }
    if let Some(v) = offset {
        let offset = match v {
            Value::Literal(x) => Expr::Literal(value::strip_unit(x, "px")),
            x => x.to_expression(),
        };
        return Ok(Some(LabelPlacement::Line {
            offset: Some(offset),
        }));
    }
    if rotation.is_some() {
        return Ok(Some(LabelPlacement::Point {
            anchor: None,
            displacement: None,
            rotation,
        }));
    }
    Ok(None)
}

// The font block exists only when font-related properties beyond
// `font-fill` are present.
fn build_font(rule: &CssRule) -> Option<Font> {
    let family: Vec<Expr> = rule
        .root_values(&PropertyName::FontFamily)
        .map(|values| values.iter().map(|v| v.to_expression()).collect())
        .unwrap_or_default();
    let style = root_at(rule, &PropertyName::FontStyle, 0).map(|v| v.to_expression());
    let weight = root_at(rule, &PropertyName::FontWeight, 0).map(|v| v.to_expression());
    let size = measure(rule, &PropertyName::FontSize, 0, "px");

    if family.is_empty() && style.is_none() && weight.is_none() && size.is_none() {
        return None;
    }
    Some(Font {
        family,
        style,
        weight,
        size,
    })
}

fn build_font_fill(rule: &CssRule) -> Option<Fill> {
    root_at(rule, &PropertyName::FontFill, 0).map(|v| Fill {
        color: Some(v.to_expression()),
        ..Default::default()
    })
}

fn build_halo(rule: &CssRule) -> Option<Halo> {
    let color = root_at(rule, &PropertyName::HaloColor, 0).map(|v| v.to_expression());
    let opacity = scaled(rule, &PropertyName::HaloOpacity, 0);
    let radius = measure(rule, &PropertyName::HaloRadius, 0, "px");

    if color.is_none() && opacity.is_none() && radius.is_none() {
        return None;
    }
    let fill = if color.is_some() || opacity.is_some() {
        Some(Fill {
            color,
            opacity,
            graphic: None,
        })
    } else {
        None
    };
    Some(Halo { radius, fill })
}
