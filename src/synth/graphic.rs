// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Subgraphic building...
//!
//! `symbol(...)` and `url(...)` values turn into SLD graphics. The builder
//! is shared by every synthesizer that can carry a graphic (fill patterns,
//! stroke patterns, point marks, label shields); the carrying property's
//! base name keys the side-car properties (`<base>-size`, `<base>-rotation`,
//! `<base>-mime`) and the pseudo-class namespace feeding mark fill/stroke.
//!

use super::{float_array, indexed_pseudo_values, measure, root_at, scaled};
use crate::{
    MyError,
    filter::Expr,
    property::PropertyName,
    rule::CssRule,
    sld::{ExternalGraphic, Fill, Graphic, GraphicKind, Mark, Stroke},
    value::{self, Value},
};
use std::collections::BTreeMap;

/// Build a graphic out of a value that must be `symbol(...)` or `url(...)`.
/// `base` is the carrying property (`fill`, `stroke`, `mark`, `shield`);
/// `i` the 0-based repetition index. Only `mark` passes `with_opacity`.
pub(crate) fn build_graphic(
    rule: &CssRule,
    base: &str,
    value: &Value,
    i: usize,
    with_opacity: bool,
) -> Result<Graphic, MyError> {
    let Some((name, args)) = value.as_function() else {
        return Err(MyError::value(
            base,
            format!("expected symbol(...) or url(...), got '{value}'"),
        ));
    };

    let kind = match name {
        "symbol" => {
            let wkn = args.first().ok_or_else(|| {
                MyError::value(base, "symbol() takes a well-known name argument")
            })?;
            let bag = indexed_pseudo_values(rule, base, i);
            GraphicKind::Mark(Mark {
                name: wkn.to_expression(),
                fill: sub_fill(&bag).map(Box::new),
                stroke: sub_stroke(&bag).map(Box::new),
            })
        }
        "url" => {
            let location = args
                .first()
                .and_then(|x| x.to_literal())
                .ok_or_else(|| MyError::value(base, "url() takes a location argument"))?;
            let mime_key = PropertyName::parse(&format!("{base}-mime"));
            let mime = root_at(rule, &mime_key, i)
                .and_then(|x| x.to_literal())
                .unwrap_or_else(|| "image/jpeg".to_owned());
            GraphicKind::External(ExternalGraphic { location, mime })
        }
        x => {
            return Err(MyError::value(
                base,
                format!("expected symbol(...) or url(...), got '{x}(...)'"),
            ));
        }
    };

    let size = measure(rule, &PropertyName::parse(&format!("{base}-size")), i, "px");
    let rotation = measure(
        rule,
        &PropertyName::parse(&format!("{base}-rotation")),
        i,
        "deg",
    );
    let opacity = if with_opacity {
        scaled(rule, &PropertyName::parse(&format!("{base}-opacity")), i)
    } else {
        None
    };

    Ok(Graphic {
        kind,
        size,
        rotation,
        opacity,
    })
}

// ===== mark fill + stroke from a merged pseudo-class bag ====================

type Bag = BTreeMap<PropertyName, Vec<Value>>;

fn bag_expr(bag: &Bag, name: &PropertyName) -> Option<Expr> {
    bag.get(name)
        .and_then(|v| v.first())
        .map(|v| v.to_expression())
}

fn bag_scaled(bag: &Bag, name: &PropertyName) -> Option<Expr> {
    bag.get(name).and_then(|v| v.first()).map(|v| match v {
        Value::Literal(x) => match value::parse_scaled(x) {
            Some(n) => Expr::Literal(super::trim_float(n)),
            None => Expr::Literal(x.to_owned()),
        },
        x => x.to_expression(),
    })
}

fn bag_measure(bag: &Bag, name: &PropertyName, unit: &str) -> Option<Expr> {
    bag.get(name).and_then(|v| v.first()).map(|v| match v {
        Value::Literal(x) => Expr::Literal(value::strip_unit(x, unit)),
        x => x.to_expression(),
    })
}

fn sub_fill(bag: &Bag) -> Option<Fill> {
    bag.contains_key(&PropertyName::Fill).then(|| Fill {
        color: bag_expr(bag, &PropertyName::Fill),
        opacity: bag_scaled(bag, &PropertyName::FillOpacity),
        graphic: None,
    })
}

fn sub_stroke(bag: &Bag) -> Option<Stroke> {
    if !bag.contains_key(&PropertyName::Stroke) {
        return None;
    }
    let dash_array = bag
        .get(&PropertyName::StrokeDashArray)
        .and_then(|v| v.first())
        .and_then(|v| float_array(v, "stroke-dasharray").ok());
    Some(Stroke {
        color: bag_expr(bag, &PropertyName::Stroke),
        opacity: bag_scaled(bag, &PropertyName::StrokeOpacity),
        width: bag_measure(bag, &PropertyName::StrokeWidth, "px"),
        line_cap: bag_expr(bag, &PropertyName::StrokeLineCap),
        line_join: bag_expr(bag, &PropertyName::StrokeLineJoin),
        dash_array,
        dash_offset: bag_measure(bag, &PropertyName::StrokeDashOffset, "px"),
        graphic_fill: None,
        graphic_stroke: None,
    })
}
