// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Cartographic CSS to OGC SLD/SE translator.
//!
//! The next paragraphs explain in more details the elements of this project
//! as well as the rationale behind some of the decisions that shaped its
//! components.
//!
//! # Stylesheets
//!
//! The input side of this project is a cartographic stylesheet: a cascading
//! style sheet dialect whose selectors describe map features (attribute
//! predicates, feature-type names, scale ranges, z levels) and whose
//! properties describe drawing instructions (fills, strokes, marks, labels,
//! raster treatments). It is represented by the [`Stylesheet`] type, an
//! ordered list of [`CssRule`]s.
//!
//! Parsing user-provided input is done by invoking
//! [`Stylesheet::try_from_text()`] as shown in the following example:
//! ```rust
//! use css2sld::prelude::*;
//! use std::error::Error;
//!
//! # fn test() -> Result<(), Box<dyn Error>> {
//! let sheet = Stylesheet::try_from_text(r#"
//!     /* @title Populated places */
//!     [pop > 100000] { mark: symbol(circle); mark-size: 8px; }
//! "#)?;
//! // ...
//! #    Ok(())
//! # }
//! ```
//! An `Ok` result implies a syntactically correct parsed stylesheet!
//! Stylesheets can also be assembled programmatically; every pass of the
//! translator works off the parsed form and never looks at source text.
//!
//! # Translation
//!
//! A cascading rule set and a Styled Layer Descriptor disagree on one
//! fundamental point: CSS rules overlap and cascade, SLD rules are
//! mutually exclusive selection + action pairs. The [`Translator`] closes
//! that gap w/ a pipeline of passes over the immutable input rules:
//!
//! 1. split rules into z bands ([`CssRule::z_indexes()`]),
//! 2. group each band per referenced feature-type name,
//! 3. rewrite OR'd scale ranges into sibling rules,
//! 4. enumerate the rule subsets a feature could match exactly, merging
//!    property bags by specificity (the power-set combiner, bounded by the
//!    [combination cap][Translator::max_combinations]),
//! 5. subtract the domain already claimed by more specific rules so at any
//!    (scale, feature) pair at most one emitted rule matches,
//! 6. compile filters and synthesize polygon / line / point / text /
//!    raster symbolizers into the output [`Style`] tree.
//!
//! ```rust
//! use css2sld::prelude::*;
//! use std::error::Error;
//!
//! # fn test() -> Result<(), Box<dyn Error>> {
//! let sheet = Stylesheet::try_from_text("* { fill: #ff0000; fill-opacity: 0.5; }")?;
//! let style = translate(&sheet)?;
//! assert_eq!(style.feature_type_styles.len(), 1);
//! #    Ok(())
//! # }
//! ```
//!
//! The output [`Style`] tree follows the SLD 1.0 model and is ready to be
//! fed to an XML serializer; serialization itself is not this project's
//! business, although [`Style::to_json()`] renders an inspectable JSON
//! rendition that tests and humans both find handy.
//!
//! # Selectors as an algebra
//!
//! Everything interesting in the translation rests on treating selectors
//! as a boolean algebra w/ `Accept` and `Reject` terminals --see
//! [`Selector`]. Whether two rules can apply to the same feature, whether
//! a rule combination is worth emitting, and what part of a rule's domain
//! is still visible after more specific rules had their turn, are all the
//! same question: does a conjunction simplify to `Reject`?
//!
//! # Configuration
//!
//! A single knob: the power-set combination cap, default 10000. It can be
//! set process-wide through the `CSS2SLD_MAX_COMBINATIONS` environment
//! variable (read once, at the first [`Translator::new()`]), or per
//! translator via [`Translator::with_max_combinations()`]. When the cap
//! is hit the translator does not fail; it truncates deterministically and
//! raises a `tracing` warning.
//!
//! # Third-party crates
//!
//! This project relies on few 3<sup>rd</sup> party crates. Here are the
//! most important ones...
//!
//! 1. PEG
//!    * [`peg`](https://crates.io/crates/peg): Provides a Rust macro that
//!      builds a recursive descent parser from a concise definition of a
//!      grammar.
//!
//! 2. Errors + diagnostics:
//!    * [thiserror][1]: for the library error enumeration.
//!    * [tracing][2]: for structured pass-level diagnostics.
//!
//! 3. Serialization:
//!    * [serde][3] + [serde_json][4]: for the JSON rendition of the output
//!      tree.
//!
//! 4. Configuration:
//!    * [dotenvy][5]: for resolving the combination cap from the process
//!      environment.
//!
//! [1]: https://crates.io/crates/thiserror
//! [2]: https://crates.io/crates/tracing
//! [3]: https://crates.io/crates/serde
//! [4]: https://crates.io/crates/serde_json
//! [5]: https://crates.io/crates/dotenvy
//!

mod combine;
mod config;
mod coverage;
mod error;
mod extract;
mod feature;
mod filter;
mod op;
mod property;
mod range;
mod rule;
mod selector;
mod sld;
mod synth;
mod text;
mod translate;
mod value;

pub use config::DEFAULT_MAX_COMBINATIONS;
pub use coverage::{Domain, DomainCoverage};
pub use error::MyError;
pub use feature::{AttrType, FeatureType};
pub use filter::{AttrValue, Expr, Feature, Filter};
pub use op::Op;
pub use property::{PropertyName, PseudoClass};
pub use range::ScaleRange;
pub use rule::{CssRule, PropertyKey};
pub use selector::{Selector, Specificity, TypeName};
pub use sld::*;
pub use translate::{Translator, translate, translate_capped};
pub use value::Value;

pub mod prelude;

use core::fmt;

/// An ordered cartographic rule list; the translator's input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: Vec<CssRule>,
}

impl Stylesheet {
    /// Assemble from already-built rules.
    pub fn new(rules: Vec<CssRule>) -> Self {
        Stylesheet { rules }
    }

    /// Try to construct from a text-encoded string.
    pub fn try_from_text(s: &str) -> Result<Self, MyError> {
        let rules = text::css::stylesheet(s).map_err(MyError::Text)?;
        Ok(Stylesheet { rules })
    }

    /// Try to construct from a file.
    pub fn try_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, MyError> {
        let src = std::fs::read_to_string(path)?;
        Self::try_from_text(&src)
    }

    /// The rules, in source order.
    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Return TRUE when there are no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in &self.rules {
            writeln!(f, "{r}")?;
        }
        Ok(())
    }
}
