// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Raster symbolizer synthesis.
//!

use super::{root_at, scaled};
use crate::{
    MyError,
    property::PropertyName,
    rule::CssRule,
    sld::{
        Channel, ChannelSelection, ColorMap, ColorMapEntry, ColorMapKind, ContrastEnhancement,
        ContrastMethod, RasterSymbolizer, Symbolizer,
    },
};

/// Emit the raster symbolizer of a rule carrying `raster-channels`.
///
/// `raster-channels: auto` leaves the channel selection unset and applies
/// contrast enhancement at the symbolizer level; otherwise one name binds a
/// grayscale channel and three bind RGB. Two names, or more than three,
/// are a shape error.
pub(super) fn build(rule: &CssRule) -> Result<Vec<Symbolizer>, MyError> {
    let Some(channel_value) = root_at(rule, &PropertyName::RasterChannels, 0) else {
        return Ok(vec![]);
    };
    let names: Vec<String> = channel_value
        .iter_multi()
        .map(|v| {
            v.to_literal().ok_or_else(|| {
                MyError::value("raster-channels", format!("expected a channel name, got '{v}'"))
            })
        })
        .collect::<Result<_, _>>()?;

    let methods = contrast_methods(rule)?;
    let gammas = gamma_array(rule)?;

    let mut symbolizer = RasterSymbolizer {
        opacity: scaled(rule, &PropertyName::RasterOpacity, 0),
        ..Default::default()
    };

    if names.len() == 1 && names[0] == "auto" {
        symbolizer.contrast = contrast_at(&methods, &gammas, 0);
    } else {
        symbolizer.channels = Some(match names.as_slice() {
            [gray] => ChannelSelection::Gray(channel(gray, &methods, &gammas, 0)),
            [r, g, b] => ChannelSelection::Rgb(
                channel(r, &methods, &gammas, 0),
                channel(g, &methods, &gammas, 1),
                channel(b, &methods, &gammas, 2),
            ),
            x => {
                return Err(MyError::value(
                    "raster-channels",
                    format!("expected 1 or 3 channel names, got {}", x.len()),
                ));
            }
        });
    }

    symbolizer.color_map = build_color_map(rule)?;
    Ok(vec![Symbolizer::Raster(symbolizer)])
}

fn channel(name: &str, methods: &[ContrastMethod], gammas: &[f64], i: usize) -> Channel {
    Channel {
        name: name.to_owned(),
        contrast: contrast_at(methods, gammas, i),
    }
}

// Broadcast read of the enhancement arrays: index i when the array is long
// enough, index 0 otherwise.
fn contrast_at(
    methods: &[ContrastMethod],
    gammas: &[f64],
    i: usize,
) -> Option<ContrastEnhancement> {
    let method = broadcast(methods, i);
    let gamma = broadcast(gammas, i);
    if method.is_none() && gamma.is_none() {
        return None;
    }
    Some(ContrastEnhancement {
        method: method.unwrap_or_default(),
        gamma,
    })
}

fn broadcast<T: Copy>(xs: &[T], i: usize) -> Option<T> {
    match xs.len() {
        0 => None,
        n if i < n => Some(xs[i]),
        _ => Some(xs[0]),
    }
}

fn contrast_methods(rule: &CssRule) -> Result<Vec<ContrastMethod>, MyError> {
    let Some(v) = root_at(rule, &PropertyName::RasterContrastEnhancement, 0) else {
        return Ok(vec![]);
    };
    v.iter_multi()
        .map(|x| match x.to_literal().as_deref() {
            Some("none") => Ok(ContrastMethod::None),
            Some("histogram") => Ok(ContrastMethod::Histogram),
            Some("normalize") => Ok(ContrastMethod::Normalize),
            _ => Err(MyError::value(
                "raster-contrast-enhancement",
                format!("expected none, histogram or normalize, got '{x}'"),
            )),
        })
        .collect()
}

fn gamma_array(rule: &CssRule) -> Result<Vec<f64>, MyError> {
    let Some(v) = root_at(rule, &PropertyName::RasterGamma, 0) else {
        return Ok(vec![]);
    };
    v.iter_multi()
        .map(|x| {
            x.to_literal()
                .and_then(|lit| lit.parse::<f64>().ok())
                .ok_or_else(|| {
                    MyError::value("raster-gamma", format!("expected a number, got '{x}'"))
                })
        })
        .collect()
}

fn build_color_map(rule: &CssRule) -> Result<Option<ColorMap>, MyError> {
    let Some(v) = root_at(rule, &PropertyName::RasterColorMap, 0) else {
        return Ok(None);
    };

    let mut entries = vec![];
    for item in v.iter_multi() {
        let Some(("color-map-entry", args)) = item.as_function() else {
            return Err(MyError::value(
                "raster-color-map",
                format!("expected color-map-entry(...), got '{item}'"),
            ));
        };
        let [color, quantity, rest @ ..] = args else {
            return Err(MyError::value(
                "raster-color-map",
                format!("color-map-entry needs a color and a quantity, got '{item}'"),
            ));
        };
        let opacity = match rest {
            [] => None,
            [o] => Some(o.to_expression()),
            _ => {
                return Err(MyError::value(
                    "raster-color-map",
                    format!("color-map-entry takes 2 or 3 arguments, got '{item}'"),
                ));
            }
        };
        entries.push(ColorMapEntry {
            color: color.to_expression(),
            quantity: quantity.to_expression(),
            opacity,
        });
    }

    let kind = match root_at(rule, &PropertyName::RasterColorMapType, 0) {
        None => ColorMapKind::Ramp,
        Some(v) => match v.to_literal().as_deref() {
            Some("ramp") => ColorMapKind::Ramp,
            Some("intervals") => ColorMapKind::Intervals,
            Some("values") => ColorMapKind::Values,
            _ => {
                return Err(MyError::value(
                    "raster-color-map-type",
                    format!("expected ramp, intervals or values, got '{v}'"),
                ));
            }
        },
    };

    Ok(Some(ColorMap { kind, entries }))
}
