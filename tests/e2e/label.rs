// SPDX-License-Identifier: Apache-2.0

//! Labelling w/ concatenated expressions and point placement.
//!
//! Given:
//!     * one rule labelling features w/ `[name] ' (' [pop] ')'` pieces and
//!       a centered `label-anchor`.
//! Then:
//! * assert a text symbolizer whose label is
//!   `Concatenate([name], ' (', [pop], ')')`;
//! * assert point placement w/ anchor `(0.5, 0.5)`.
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_label_concatenation_and_anchor() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(
        "* { label: [name], ' (', [pop], ')'; label-anchor: 0.5 0.5 }",
    )?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    assert_eq!(rule.symbolizers.len(), 1);
    let Symbolizer::Text(t) = &rule.symbolizers[0] else {
        panic!("expected a text symbolizer");
    };

    match &t.label {
        Expr::Function(name, args) => {
            assert_eq!(name, "Concatenate");
            assert_eq!(
                *args,
                vec![
                    Expr::property("name"),
                    Expr::Literal(" (".into()),
                    Expr::property("pop"),
                    Expr::Literal(")".into()),
                ]
            );
        }
        x => panic!("expected a Concatenate call, got {x:?}"),
    }

    match &t.placement {
        Some(LabelPlacement::Point { anchor, .. }) => assert_eq!(*anchor, Some((0.5, 0.5))),
        x => panic!("expected point placement, got {x:?}"),
    }
    Ok(())
}

#[test]
#[traced_test]
fn test_shield_and_halo() -> Result<(), Box<dyn Error>> {
    let src = r#"
        * {
            label: [name];
            shield: url(shield.png);
            shield-mime: 'image/png';
            halo-color: #ffffff;
            halo-radius: 2px;
            font-family: 'Arial';
            font-size: 12px;
        }
    "#;
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    let Symbolizer::Text(t) = &rule.symbolizers[0] else {
        panic!("expected a text symbolizer");
    };

    let shield = t.graphic.as_ref().expect("a shield graphic");
    match &shield.kind {
        GraphicKind::External(x) => {
            assert_eq!(x.location, "shield.png");
            assert_eq!(x.mime, "image/png");
        }
        x => panic!("expected an external graphic, got {x:?}"),
    }

    let halo = t.halo.as_ref().expect("a halo");
    assert_eq!(halo.radius, Some(Expr::Literal("2".into())));

    let font = t.font.as_ref().expect("a font block");
    assert_eq!(font.size, Some(Expr::Literal("12".into())));
    Ok(())
}
