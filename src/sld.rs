// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! The SLD 1.0 output model...
//!
//! A typed rendition of the Styled Layer Descriptor / Symbology Encoding
//! tree the translator produces. XML serialization is out of scope here;
//! the tree is `serde`-serializable instead, and [`Style::to_json`] gives
//! an inspectable rendition for debugging and tests.
//!

use crate::{MyError, filter::Expr, filter::Filter, selector::TypeName};
use serde::Serialize;
use std::collections::BTreeMap;

/// Vendor-option bag of one symbolizer.
pub type VendorOptions = BTreeMap<String, String>;

/// A complete style: one feature-type style per (z band, type-name) pair,
/// z ascending then type-name insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    /// Style name, when the embedder assigns one.
    pub name: Option<String>,
    /// The feature-type styles, in emission order.
    pub feature_type_styles: Vec<FeatureTypeStyle>,
}

impl Style {
    /// JSON rendition of the tree, for debugging and snapshot assertions.
    pub fn to_json(&self) -> Result<String, MyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of rules across all feature-type styles.
    pub fn rule_count(&self) -> usize {
        self.feature_type_styles.iter().map(|x| x.rules.len()).sum()
    }
}

/// A group of mutually exclusive rules bound to one feature type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureTypeStyle {
    /// Feature-type names this style applies to.
    pub feature_type_names: Vec<TypeName>,
    /// Rules, specificity descending.
    pub rules: Vec<Rule>,
}

/// One selection + action pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rule {
    /// Title mined from `@title` comment tags.
    pub title: Option<String>,
    /// Abstract mined from `@abstract` comment tags.
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// The feature filter.
    pub filter: Filter,
    /// Minimum (inclusive) scale denominator, when constrained below.
    pub min_scale: Option<f64>,
    /// Maximum (exclusive) scale denominator, when constrained above.
    pub max_scale: Option<f64>,
    /// Symbolizers, in polygon / line / point / text / raster order.
    pub symbolizers: Vec<Symbolizer>,
}

/// The five symbolizer kinds of the target model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Symbolizer {
    /// Area fill + optional outline.
    Polygon(PolygonSymbolizer),
    /// Stroked line work.
    Line(LineSymbolizer),
    /// Point graphic.
    Point(PointSymbolizer),
    /// Feature labelling.
    Text(TextSymbolizer),
    /// Raster channel + color-map treatment.
    Raster(RasterSymbolizer),
}

/// Solid or graphic area fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fill {
    /// Fill color.
    pub color: Option<Expr>,
    /// Fill opacity in `[0, 1]`.
    pub opacity: Option<Expr>,
    /// A graphic fill, when the fill value is `symbol(...)`/`url(...)`.
    pub graphic: Option<Graphic>,
}

/// Line stroking parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stroke {
    /// Stroke color.
    pub color: Option<Expr>,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: Option<Expr>,
    /// Stroke width, pixels.
    pub width: Option<Expr>,
    /// Line cap: `butt`, `round` or `square`.
    pub line_cap: Option<Expr>,
    /// Line join: `miter`, `round` or `bevel`.
    pub line_join: Option<Expr>,
    /// Dash pattern lengths, pixels.
    pub dash_array: Option<Vec<f32>>,
    /// Offset into the dash pattern.
    pub dash_offset: Option<Expr>,
    /// Graphic tiled along the line when `stroke-repeat` is `stipple`.
    pub graphic_fill: Option<Graphic>,
    /// Graphic repeated along the line when `stroke-repeat` is `repeat`.
    pub graphic_stroke: Option<Graphic>,
}

/// A mark or external graphic w/ its presentation knobs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graphic {
    /// What gets drawn.
    pub kind: GraphicKind,
    /// Size, pixels.
    pub size: Option<Expr>,
    /// Rotation, degrees.
    pub rotation: Option<Expr>,
    /// Opacity in `[0, 1]`; only `mark` exposes it.
    pub opacity: Option<Expr>,
}

/// The drawable part of a [`Graphic`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GraphicKind {
    /// A well-known mark, possibly filled and stroked.
    Mark(Mark),
    /// An external image.
    External(ExternalGraphic),
}

/// A well-known mark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    /// Well-known name; e.g. `circle`, `square`, `triangle`...
    pub name: Expr,
    /// Mark fill.
    pub fill: Option<Box<Fill>>,
    /// Mark outline.
    pub stroke: Option<Box<Stroke>>,
}

/// An external image reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalGraphic {
    /// Image location.
    pub location: String,
    /// Mime type; `image/jpeg` unless a `*-mime` property says otherwise.
    pub mime: String,
}

/// Area symbolizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolygonSymbolizer {
    /// Alternate geometry attribute.
    pub geometry: Option<Expr>,
    /// The fill.
    pub fill: Fill,
    /// Outline, unless routed to a separate line symbolizer.
    pub stroke: Option<Stroke>,
    /// Vendor options.
    pub options: VendorOptions,
}

/// Line symbolizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineSymbolizer {
    /// Alternate geometry attribute.
    pub geometry: Option<Expr>,
    /// The stroke.
    pub stroke: Stroke,
    /// Vendor options.
    pub options: VendorOptions,
}

/// Point symbolizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSymbolizer {
    /// Alternate geometry attribute.
    pub geometry: Option<Expr>,
    /// The graphic to draw.
    pub graphic: Graphic,
    /// Vendor options.
    pub options: VendorOptions,
}

/// Text symbolizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSymbolizer {
    /// Alternate geometry attribute.
    pub geometry: Option<Expr>,
    /// The label expression.
    pub label: Expr,
    /// Font block; absent when only `font-fill` was given.
    pub font: Option<Font>,
    /// Text color.
    pub fill: Option<Fill>,
    /// Point or line placement.
    pub placement: Option<LabelPlacement>,
    /// Halo block.
    pub halo: Option<Halo>,
    /// Shield graphic behind the label.
    pub graphic: Option<Graphic>,
    /// Label priority.
    pub priority: Option<Expr>,
    /// Vendor options.
    pub options: VendorOptions,
}

/// Font block of a text symbolizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    /// Family names, most preferred first.
    pub family: Vec<Expr>,
    /// `normal`, `italic` or `oblique`.
    pub style: Option<Expr>,
    /// `normal` or `bold`.
    pub weight: Option<Expr>,
    /// Size, pixels.
    pub size: Option<Expr>,
}

/// Where a label goes relative to its feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LabelPlacement {
    /// Anchored point placement.
    Point {
        /// Anchor point, each coordinate in `[0, 1]`.
        anchor: Option<(f64, f64)>,
        /// Pixel displacement.
        displacement: Option<(f64, f64)>,
        /// Rotation, degrees.
        rotation: Option<Expr>,
    },
    /// Along-the-line placement.
    Line {
        /// Perpendicular offset, pixels.
        offset: Option<Expr>,
    },
}

/// Halo block of a text symbolizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Halo {
    /// Halo radius, pixels.
    pub radius: Option<Expr>,
    /// Halo fill.
    pub fill: Option<Fill>,
}

/// Raster symbolizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RasterSymbolizer {
    /// Overall opacity in `[0, 1]`.
    pub opacity: Option<Expr>,
    /// Explicit channel binding; unset for `raster-channels: auto`.
    pub channels: Option<ChannelSelection>,
    /// Symbolizer-level contrast enhancement (the `auto` case).
    pub contrast: Option<ContrastEnhancement>,
    /// Color map.
    pub color_map: Option<ColorMap>,
    /// Vendor options.
    pub options: VendorOptions,
}

/// Channel binding of a raster symbolizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChannelSelection {
    /// One grayscale channel.
    Gray(Channel),
    /// Red, green and blue channels.
    Rgb(Channel, Channel, Channel),
}

/// One bound source channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Channel {
    /// Source channel name.
    pub name: String,
    /// Per-channel contrast enhancement.
    pub contrast: Option<ContrastEnhancement>,
}

/// Contrast-enhancement block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContrastEnhancement {
    /// Enhancement method.
    pub method: ContrastMethod,
    /// Gamma correction.
    pub gamma: Option<f64>,
}

/// Contrast-enhancement method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ContrastMethod {
    /// No enhancement.
    #[default]
    None,
    /// Histogram equalization.
    Histogram,
    /// Min-max normalization.
    Normalize,
}

/// Color-map block of a raster symbolizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMap {
    /// Interpolation mode.
    pub kind: ColorMapKind,
    /// Entries, in declaration order.
    pub entries: Vec<ColorMapEntry>,
}

/// Color-map interpolation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorMapKind {
    /// Linear interpolation between entries.
    Ramp,
    /// Constant color between entries.
    Intervals,
    /// Exact-value matches only.
    Values,
}

/// One `color-map-entry(color, quantity[, opacity])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMapEntry {
    /// Entry color.
    pub color: Expr,
    /// Entry quantity threshold.
    pub quantity: Expr,
    /// Entry opacity, when given.
    pub opacity: Option<Expr>,
}
