// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Cartographic property values...
//!
//! A declaration's right-hand side is kept close to its textual form until
//! a synthesizer projects it onto the SLD model. Two projections exist:
//! [`to_literal`][Value::to_literal] for the textual reading and
//! [`to_expression`][Value::to_expression] for the OGC reading.
//!

use crate::filter::Expr;
use core::fmt;

/// A parsed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Textual token: number, color, identifier, dimensioned quantity like
    /// `12px`, `30deg`, `50%`...
    Literal(String),
    /// Named constructor, notably `symbol(...)`, `url(...)` and
    /// `color-map-entry(color, quantity[, opacity])`.
    Function(String, Vec<Value>),
    /// Comma- or space-separated list used for repeated symbolizers, dash
    /// arrays, color maps and concatenated labels.
    Multi(Vec<Value>),
    /// An OGC expression already promoted from literal form; e.g. an
    /// attribute reference written as `[name]` in the stylesheet.
    Expr(Expr),
}

impl Value {
    /// Shorthand for a literal value.
    pub fn literal(x: impl Into<String>) -> Self {
        Value::Literal(x.into())
    }

    /// The textual form, when this value has one.
    pub fn to_literal(&self) -> Option<String> {
        match self {
            Value::Literal(x) => Some(x.to_owned()),
            Value::Expr(Expr::Literal(x)) => Some(x.to_owned()),
            Value::Multi(xs) => {
                let parts: Option<Vec<_>> = xs.iter().map(|x| x.to_literal()).collect();
                parts.map(|p| p.join(" "))
            }
            _ => None,
        }
    }

    /// The OGC reading: literals wrap as literal expressions, a multi-value
    /// concatenates its parts (the `label` semantics), functions map onto
    /// OGC function calls.
    pub fn to_expression(&self) -> Expr {
        match self {
            Value::Literal(x) => Expr::Literal(x.to_owned()),
            Value::Expr(x) => x.to_owned(),
            Value::Function(name, args) => Expr::Function(
                name.to_owned(),
                args.iter().map(|x| x.to_expression()).collect(),
            ),
            Value::Multi(xs) => match xs.len() {
                1 => xs[0].to_expression(),
                _ => Expr::Function(
                    "Concatenate".into(),
                    xs.iter().map(|x| x.to_expression()).collect(),
                ),
            },
        }
    }

    /// Function name + arguments, when this value is a function call.
    pub fn as_function(&self) -> Option<(&str, &[Value])> {
        match self {
            Value::Function(name, args) => Some((name, args)),
            _ => None,
        }
    }

    /// Repetition arity: a multi-value repeats once per item, everything
    /// else exactly once.
    pub fn repeat_len(&self) -> usize {
        match self {
            Value::Multi(xs) => xs.len(),
            _ => 1,
        }
    }

    /// The i-th repetition. A non-multi value broadcasts to every index;
    /// a multi-value shorter than `i + 1` broadcasts its sole item when it
    /// has exactly one, and yields `None` otherwise.
    pub fn item(&self, i: usize) -> Option<&Value> {
        match self {
            Value::Multi(xs) => match xs.len() {
                0 => None,
                1 => Some(&xs[0]),
                n if i < n => Some(&xs[i]),
                _ => None,
            },
            x => Some(x),
        }
    }

    /// View as a repetition slice: the items of a multi-value, or the value
    /// itself as a 1-element window.
    pub fn iter_multi(&self) -> impl Iterator<Item = &Value> {
        match self {
            Value::Multi(xs) => xs.iter(),
            x => std::slice::from_ref(x).iter(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Literal(x) => write!(f, "{x}"),
            Value::Function(name, args) => {
                let params: Vec<_> = args.iter().map(|x| x.to_string()).collect();
                write!(f, "{}({})", name, params.join(", "))
            }
            Value::Multi(xs) => {
                let items: Vec<_> = xs.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", items.join(", "))
            }
            Value::Expr(x) => write!(f, "{x}"),
        }
    }
}

/// Strip a default-unit suffix off a dimensioned literal. `12px` w/ default
/// `px` gives back `12`; any other suffix is preserved verbatim so the SLD
/// layer can carry its uom through.
pub(crate) fn strip_unit(token: &str, unit: &str) -> String {
    match token.strip_suffix(unit) {
        Some(prefix) if prefix.parse::<f64>().is_ok() => prefix.to_owned(),
        _ => token.to_owned(),
    }
}

/// Numeric reading of a literal, normalizing `%` tokens to the `[0, 1]`
/// range.
pub(crate) fn parse_scaled(token: &str) -> Option<f64> {
    match token.strip_suffix('%') {
        Some(prefix) => prefix.parse::<f64>().ok().map(|x| x / 100.0),
        None => token.parse::<f64>().ok(),
    }
}
