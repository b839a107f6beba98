// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Minimal feature-type descriptors...
//!
//! The translator never talks to a real catalog; it only needs a coarse
//! attribute typing to simplify numeric data predicates (and to report what
//! a stylesheet implicitly assumes about its data). The
//! [guesser][crate::extract::guess_feature_type] builds these from the
//! stylesheet itself.
//!

use core::fmt;
use std::collections::BTreeMap;

/// Coarse attribute type, inferred from how an attribute is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    /// Compared against quoted strings, or used in `LIKE` patterns.
    Str,
    /// Compared against numeric literals or ranges.
    Num,
    /// Referenced by a `*-geometry` property.
    Geom,
}

/// A minimal feature-type descriptor: a name and a coarse attribute map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureType {
    name: Option<String>,
    attributes: BTreeMap<String, AttrType>,
}

impl FeatureType {
    /// Create an anonymous descriptor.
    pub fn new() -> Self {
        FeatureType::default()
    }

    /// Create a named descriptor.
    pub fn named(name: impl Into<String>) -> Self {
        FeatureType {
            name: Some(name.into()),
            attributes: BTreeMap::new(),
        }
    }

    /// Type-name, when known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Record an attribute observation. A conflicting observation widens to
    /// `Str` (the reading that never invalidates a predicate).
    pub fn observe(&mut self, attr: &str, t: AttrType) {
        self.attributes
            .entry(attr.to_owned())
            .and_modify(|old| {
                if *old != t {
                    *old = AttrType::Str;
                }
            })
            .or_insert(t);
    }

    /// Coarse type of a named attribute, when observed.
    pub fn attr_type(&self, attr: &str) -> Option<AttrType> {
        self.attributes.get(attr).copied()
    }

    /// Iterate the attribute map in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, AttrType)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of observed attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Return TRUE when nothing has been observed.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attrs: Vec<_> = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}:{v:?}"))
            .collect();
        write!(
            f,
            "{}({})",
            self.name.as_deref().unwrap_or("<anon>"),
            attrs.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicts_widen() {
        let mut ft = FeatureType::new();
        ft.observe("pop", AttrType::Num);
        assert_eq!(ft.attr_type("pop"), Some(AttrType::Num));
        ft.observe("pop", AttrType::Str);
        assert_eq!(ft.attr_type("pop"), Some(AttrType::Str));
    }
}
