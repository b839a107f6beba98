// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Cartographic property names and pseudo-classes.
//!
//! Recognized property names form a closed enumeration so a typo'd key is
//! visible at the type level; vendor extensions (`-gt-...`) and genuinely
//! unknown keys are carried through dedicated fallback variants instead of
//! a stringly-typed map.
//!

use core::fmt;

// Define the closed enumeration + both directions of the name mapping in
// one go.  Keeps the 3 lists (variants, parse, print) from drifting apart.
macro_rules! properties {
    ( $( $variant:ident => $name:literal ),+ $(,)? ) => {
        /// A recognized cartographic property name, or one of the two
        /// fallback forms.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum PropertyName {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
            /// A `-gt-...` vendor extension key.
            Vendor(String),
            /// An unrecognized key, carried verbatim.
            Other(String),
        }

        impl PropertyName {
            /// Map a declaration key to its property name.
            pub fn parse(s: &str) -> Self {
                match s {
                    $( $name => PropertyName::$variant, )+
                    x if x.starts_with("-gt-") => PropertyName::Vendor(x.to_owned()),
                    x => PropertyName::Other(x.to_owned()),
                }
            }

            /// The declaration key this name prints as.
            pub fn as_str(&self) -> &str {
                match self {
                    $( PropertyName::$variant => $name, )+
                    PropertyName::Vendor(x) => x,
                    PropertyName::Other(x) => x,
                }
            }
        }
    };
}

properties! {
    Fill => "fill",
    FillOpacity => "fill-opacity",
    FillGeometry => "fill-geometry",
    FillSize => "fill-size",
    FillRotation => "fill-rotation",
    FillMime => "fill-mime",
    Stroke => "stroke",
    StrokeOpacity => "stroke-opacity",
    StrokeWidth => "stroke-width",
    StrokeLineCap => "stroke-linecap",
    StrokeLineJoin => "stroke-linejoin",
    StrokeDashArray => "stroke-dasharray",
    StrokeDashOffset => "stroke-dashoffset",
    StrokeGeometry => "stroke-geometry",
    StrokeRepeat => "stroke-repeat",
    StrokeSize => "stroke-size",
    StrokeRotation => "stroke-rotation",
    StrokeMime => "stroke-mime",
    Mark => "mark",
    MarkSize => "mark-size",
    MarkRotation => "mark-rotation",
    MarkOpacity => "mark-opacity",
    MarkGeometry => "mark-geometry",
    MarkMime => "mark-mime",
    Label => "label",
    LabelOffset => "label-offset",
    LabelAnchor => "label-anchor",
    LabelRotation => "label-rotation",
    LabelGeometry => "label-geometry",
    FontFamily => "font-family",
    FontStyle => "font-style",
    FontWeight => "font-weight",
    FontSize => "font-size",
    FontFill => "font-fill",
    HaloColor => "halo-color",
    HaloRadius => "halo-radius",
    HaloOpacity => "halo-opacity",
    Shield => "shield",
    ShieldMime => "shield-mime",
    ShieldSize => "shield-size",
    ShieldRotation => "shield-rotation",
    RasterChannels => "raster-channels",
    RasterContrastEnhancement => "raster-contrast-enhancement",
    RasterGamma => "raster-gamma",
    RasterColorMap => "raster-color-map",
    RasterColorMapType => "raster-color-map-type",
    RasterOpacity => "raster-opacity",
    ZIndex => "z-index",
}

impl PropertyName {
    /// Return TRUE when, at the ROOT pseudo-class, this property makes the
    /// enclosing rule produce a symbolizer.
    pub fn symbolizer_trigger(&self) -> bool {
        matches!(
            self,
            PropertyName::Fill
                | PropertyName::Stroke
                | PropertyName::Mark
                | PropertyName::Label
                | PropertyName::RasterChannels
        )
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, optionally-indexed sub-namespace w/in a rule for grouping
/// properties; e.g. `:nth-symbol(2)` for the 2nd repeated symbolizer.
/// Indexes are 1-based. `root` is the default container for top-level
/// declarations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PseudoClass {
    name: String,
    index: Option<u32>,
}

impl PseudoClass {
    /// The default container for top-level declarations.
    pub fn root() -> Self {
        PseudoClass {
            name: "root".into(),
            index: None,
        }
    }

    /// An un-indexed pseudo-class; e.g. `:mark`.
    pub fn new(name: impl Into<String>) -> Self {
        PseudoClass {
            name: name.into(),
            index: None,
        }
    }

    /// An indexed pseudo-class; e.g. `:nth-mark(2)`. `index` is 1-based.
    pub fn indexed(name: impl Into<String>, index: u32) -> Self {
        PseudoClass {
            name: name.into(),
            index: Some(index),
        }
    }

    /// Pseudo-class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based index, when present.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// Return TRUE if this is the ROOT container.
    pub fn is_root(&self) -> bool {
        self.name == "root" && self.index.is_none()
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(i) => write!(f, ":nth-{}({})", self.name, i),
            None => write!(f, ":{}", self.name),
        }
    }
}
