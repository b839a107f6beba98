// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Point symbolizer synthesis.
//!

use super::{POINT_VENDOR, build_graphic, geometry, repeat_count, root_at, vendor_options};
use crate::{
    MyError,
    property::PropertyName,
    rule::CssRule,
    sld::{PointSymbolizer, Symbolizer},
};

const MARK_PROPS: &[PropertyName] = &[
    PropertyName::Mark,
    PropertyName::MarkSize,
    PropertyName::MarkRotation,
    PropertyName::MarkOpacity,
];

/// Emit one point symbolizer per `mark` repetition.
pub(super) fn build(rule: &CssRule) -> Result<Vec<Symbolizer>, MyError> {
    if rule.root_values(&PropertyName::Mark).is_none() {
        return Ok(vec![]);
    }

    let n = repeat_count(rule, MARK_PROPS);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let Some(v) = root_at(rule, &PropertyName::Mark, i) else {
            continue;
        };
        // size, rotation and opacity ride on the graphic itself...
        let graphic = build_graphic(rule, "mark", v, i, true)?;
        out.push(Symbolizer::Point(PointSymbolizer {
            geometry: geometry(rule, &PropertyName::MarkGeometry),
            graphic,
            options: vendor_options(rule, POINT_VENDOR),
        }));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        filter::Expr,
        sld::GraphicKind,
        value::Value,
    };

    fn symbol(name: &str) -> Value {
        Value::Function("symbol".into(), vec![Value::literal(name)])
    }

    #[test]
    fn test_repeated_marks() {
        let mut rule = CssRule::default();
        rule.set_root(
            PropertyName::Mark,
            vec![symbol("circle"), symbol("square")],
        );
        rule.set_root(
            PropertyName::MarkSize,
            vec![Value::literal("6"), Value::literal("10")],
        );

        let out = build(&rule).expect("two point symbolizers");
        assert_eq!(out.len(), 2);
        let Symbolizer::Point(second) = &out[1] else {
            panic!("not a point")
        };
        assert_eq!(second.graphic.size, Some(Expr::Literal("10".into())));
        match &second.graphic.kind {
            GraphicKind::Mark(m) => assert_eq!(m.name, Expr::Literal("square".into())),
            x => panic!("expected a mark, got {x:?}"),
        }
    }

    #[test]
    fn test_mark_opacity_and_rotation() {
        let mut rule = CssRule::default();
        rule.set_root(PropertyName::Mark, vec![symbol("triangle")]);
        rule.set_root(PropertyName::MarkOpacity, vec![Value::literal("50%")]);
        rule.set_root(PropertyName::MarkRotation, vec![Value::literal("45deg")]);

        let out = build(&rule).expect("one point symbolizer");
        let Symbolizer::Point(p) = &out[0] else {
            panic!("not a point")
        };
        assert_eq!(p.graphic.opacity, Some(Expr::Literal("0.5".into())));
        assert_eq!(p.graphic.rotation, Some(Expr::Literal("45".into())));
    }

    #[test]
    fn test_mark_must_be_a_graphic() {
        let mut rule = CssRule::default();
        rule.set_root(PropertyName::Mark, vec![Value::literal("circle")]);
        assert!(build(&rule).is_err());
    }
}
