// SPDX-License-Identifier: Apache-2.0

//! Raster treatment w/ automatic channels and a color map.
//!
//! Given:
//!     * one rule w/ `raster-channels: auto` and a 2-entry ramp color map.
//! Then:
//! * assert a raster symbolizer w/ no explicit channel selection;
//! * assert a ramp color map w/ both entries in declaration order.
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_auto_channels_ramp() -> Result<(), Box<dyn Error>> {
    let src = "* { raster-channels: auto; \
               raster-color-map: color-map-entry(#000000, 0) color-map-entry(#ffffff, 100); \
               raster-color-map-type: ramp }";
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    assert_eq!(rule.symbolizers.len(), 1);
    let Symbolizer::Raster(r) = &rule.symbolizers[0] else {
        panic!("expected a raster symbolizer");
    };

    assert!(r.channels.is_none());
    let cm = r.color_map.as_ref().expect("a color map");
    assert_eq!(cm.kind, ColorMapKind::Ramp);
    assert_eq!(cm.entries.len(), 2);
    assert_eq!(cm.entries[0].color, Expr::Literal("#000000".into()));
    assert_eq!(cm.entries[0].quantity, Expr::Literal("0".into()));
    assert_eq!(cm.entries[1].color, Expr::Literal("#ffffff".into()));
    assert_eq!(cm.entries[1].quantity, Expr::Literal("100".into()));
    Ok(())
}

#[test]
#[traced_test]
fn test_gray_channel_with_enhancement() -> Result<(), Box<dyn Error>> {
    let src = "* { raster-channels: 1; raster-contrast-enhancement: histogram; \
               raster-gamma: 1.5 }";
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    let Symbolizer::Raster(r) = &rule.symbolizers[0] else {
        panic!("expected a raster symbolizer");
    };
    match r.channels.as_ref() {
        Some(ChannelSelection::Gray(ch)) => {
            assert_eq!(ch.name, "1");
            let ce = ch.contrast.as_ref().expect("an enhancement");
            assert_eq!(ce.method, ContrastMethod::Histogram);
            assert_eq!(ce.gamma, Some(1.5));
        }
        x => panic!("expected a gray channel, got {x:?}"),
    }
    Ok(())
}

#[test]
#[traced_test]
fn test_invalid_channel_count_fails_translation() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text("* { raster-channels: 1 2 }")?;
    let err = translate(&sheet).unwrap_err();
    assert!(err.to_string().contains("raster-channels"));
    Ok(())
}
