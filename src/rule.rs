// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Cartographic rules...
//!

use crate::{
    property::{PropertyName, PseudoClass},
    selector::{Selector, Specificity},
    value::Value,
};
use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

/// Key of one property bag entry: the pseudo-class it lives in and the
/// property name.
pub type PropertyKey = (PseudoClass, PropertyName);

/// One rule of a cartographic stylesheet: a selector, a property bag per
/// pseudo-class, and the comment that preceded it in source (mined for
/// `@title` / `@abstract` tags at emission time).
///
/// A property maps to a *list* of values: the i-th symbolizer repetition
/// takes the i-th value, w/ scalar broadcast when a property has a single
/// value but a sibling has many.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CssRule {
    /// The rule's selector.
    pub selector: Selector,
    /// Property bags, keyed by `(pseudo-class, property-name)`.
    pub properties: BTreeMap<PropertyKey, Vec<Value>>,
    /// Source comment, when one preceded the rule.
    pub comment: Option<String>,
}

impl CssRule {
    /// Assemble a rule.
    pub fn new(
        selector: Selector,
        properties: BTreeMap<PropertyKey, Vec<Value>>,
        comment: Option<String>,
    ) -> Self {
        CssRule {
            selector,
            properties,
            comment,
        }
    }

    /// Insert one declaration into the ROOT pseudo-class.
    pub fn set_root(&mut self, name: PropertyName, values: Vec<Value>) {
        self.properties.insert((PseudoClass::root(), name), values);
    }

    /// Values of a property in a given pseudo-class, when declared.
    pub fn values(&self, pseudo: &PseudoClass, name: &PropertyName) -> Option<&[Value]> {
        self.properties
            .get(&(pseudo.clone(), name.clone()))
            .map(|v| v.as_slice())
    }

    /// Values of a ROOT property, when declared.
    pub fn root_values(&self, name: &PropertyName) -> Option<&[Value]> {
        self.values(&PseudoClass::root(), name)
    }

    /// Return TRUE when the ROOT pseudo-class carries at least one of the
    /// reserved visual properties (`fill`, `stroke`, `mark`, `label`,
    /// `raster-channels`) and the rule therefore produces symbolizers.
    pub fn has_symbolizer_property(&self) -> bool {
        self.properties
            .keys()
            .any(|(pc, name)| pc.is_root() && name.symbolizer_trigger())
    }

    /// The explicit z-indexes this rule addresses, in declaration order.
    /// Empty means the rule carries no z constraint and contributes to
    /// every band.
    pub fn z_indexes(&self) -> Vec<i64> {
        let mut out: Vec<i64> = vec![];
        collect_z(&self.selector, &mut out);
        if let Some(values) = self.root_values(&PropertyName::ZIndex) {
            for v in values {
                if let Some(lit) = v.to_literal()
                    && let Ok(n) = lit.trim().parse::<i64>()
                    && !out.contains(&n)
                {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Restrict this rule to one z band. A rule w/o explicit z applies
    /// verbatim; otherwise the band must be one the rule addresses, and
    /// multi-valued properties collapse to the value at the band's
    /// position (single values broadcast). `None` when nothing of the rule
    /// survives in that band.
    pub fn sub_rule_by_z_index(&self, z: i64) -> Option<CssRule> {
        let zs = self.z_indexes();
        if zs.is_empty() {
            return Some(self.clone());
        }
        let position = zs.iter().position(|x| *x == z)?;

        let mut properties = BTreeMap::new();
        for ((pc, name), values) in &self.properties {
            if *name == PropertyName::ZIndex {
                continue;
            }
            let picked = match values.len() {
                0 => continue,
                1 => values.clone(),
                n if position < n => vec![values[position].clone()],
                _ => continue,
            };
            properties.insert((pc.clone(), name.clone()), picked);
        }
        if properties.is_empty() {
            return None;
        }

        Some(CssRule {
            selector: strip_z(&self.selector).simplify(None),
            properties,
            comment: self.comment.clone(),
        })
    }

    /// Rule specificity: the selector score plus one pseudo-class count
    /// per distinct non-ROOT pseudo-class used by the property bags.
    pub fn specificity(&self) -> Specificity {
        let pseudos: BTreeSet<&PseudoClass> = self
            .properties
            .keys()
            .map(|(pc, _)| pc)
            .filter(|pc| !pc.is_root())
            .collect();
        self.selector.specificity() + Specificity(0, 0, 0, 0, pseudos.len() as u32)
    }

    /// `@title` tag values mined from the comment, comma-joined.
    pub fn title(&self) -> Option<String> {
        self.comment
            .as_deref()
            .and_then(|c| scan_tag(c, "@title", ", "))
    }

    /// `@abstract` tag values mined from the comment, newline-joined.
    pub fn abstract_text(&self) -> Option<String> {
        self.comment
            .as_deref()
            .and_then(|c| scan_tag(c, "@abstract", "\n"))
    }
}

// collect z-index selector atoms in tree order...
fn collect_z(s: &Selector, out: &mut Vec<i64>) {
    match s {
        Selector::ZIndex(n) => {
            if !out.contains(n) {
                out.push(*n);
            }
        }
        Selector::And(xs) | Selector::Or(xs) => {
            for x in xs {
                collect_z(x, out);
            }
        }
        Selector::Not(x) => collect_z(x, out),
        _ => {}
    }
}

// replace z-index atoms by Accept; the band machinery re-keys them.
fn strip_z(s: &Selector) -> Selector {
    match s {
        Selector::ZIndex(_) => Selector::Accept,
        Selector::And(xs) => Selector::And(xs.iter().map(strip_z).collect()),
        Selector::Or(xs) => Selector::Or(xs.iter().map(strip_z).collect()),
        Selector::Not(x) => Selector::not(strip_z(x)),
        x => x.clone(),
    }
}

// Scan a comment line by line for `<tag><sep?><text>` occurrences; trimmed
// texts are joined w/ `join`. The optional separator after the tag is a
// colon.
fn scan_tag(comment: &str, tag: &str, join: &str) -> Option<String> {
    let mut found: Vec<String> = vec![];
    for line in comment.lines() {
        let Some(at) = line.find(tag) else { continue };
        let mut rest = line[at + tag.len()..].trim_start();
        if let Some(x) = rest.strip_prefix(':') {
            rest = x.trim_start();
        }
        let rest = rest.trim_end();
        if !rest.is_empty() {
            found.push(rest.to_owned());
        }
    }
    if found.is_empty() {
        None
    } else {
        Some(found.join(join))
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for ((pc, name), values) in &self.properties {
            let items: Vec<_> = values.iter().map(|v| v.to_string()).collect();
            if pc.is_root() {
                writeln!(f, "  {name}: {};", items.join(", "))?;
            } else {
                writeln!(f, "  {pc} {name}: {};", items.join(", "))?;
            }
        }
        write!(f, "}}")
    }
}
