// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! OGC filter + expression model targeted by the translator.
//!
//! The stylesheet side of the house talks in [`Selector`][crate::Selector]s;
//! the SLD side talks in [`Filter`]s. This module is the meeting point: a
//! small, typed rendition of the OGC Filter Encoding constructs the
//! translator actually emits, together w/ just enough evaluation machinery
//! to let tests assert the mutual-exclusion and visual-equivalence
//! properties against concrete features.
//!

use crate::op::Op;
use core::fmt;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// An OGC expression; the value-producing half of the filter model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A textual literal (number, color, plain string).
    Literal(String),
    /// A feature attribute reference.
    Property(String),
    /// A named function call; e.g. `Concatenate(a, b, c)`.
    Function(String, Vec<Expr>),
}

impl Expr {
    /// Wrap a literal token.
    pub fn literal(x: impl Into<String>) -> Self {
        Expr::Literal(x.into())
    }

    /// Wrap an attribute reference.
    pub fn property(x: impl Into<String>) -> Self {
        Expr::Property(x.into())
    }

    /// Evaluate against a [`Feature`], yielding `None` when an attribute
    /// the expression references is absent.
    pub fn evaluate(&self, feature: &Feature) -> Option<AttrValue> {
        match self {
            Expr::Literal(x) => Some(AttrValue::from_literal(x)),
            Expr::Property(x) => match feature.attrs.get(x) {
                Some(v) => Some(v.clone()),
                None => {
                    debug!("No attribute named '{x}' in feature");
                    None
                }
            },
            Expr::Function(name, args) => match name.as_str() {
                "Concatenate" => {
                    let mut out = String::new();
                    for a in args {
                        match a.evaluate(feature)? {
                            AttrValue::Str(s) => out.push_str(&s),
                            AttrValue::Num(n) => out.push_str(&n.to_string()),
                            AttrValue::Bool(b) => out.push_str(if b { "true" } else { "false" }),
                            AttrValue::Null => return None,
                        }
                    }
                    Some(AttrValue::Str(out))
                }
                _ => None,
            },
        }
    }

    // literal payload, if this is one...
    pub(crate) fn as_literal(&self) -> Option<&str> {
        match self {
            Expr::Literal(x) => Some(x),
            _ => None,
        }
    }

    // numeric literal payload, if this is one...
    pub(crate) fn as_number(&self) -> Option<f64> {
        self.as_literal().and_then(|x| x.parse::<f64>().ok())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(x) => {
                if x.parse::<f64>().is_ok() {
                    write!(f, "{x}")
                } else {
                    write!(f, "'{x}'")
                }
            }
            Expr::Property(x) => write!(f, "\"{x}\""),
            Expr::Function(name, args) => {
                let params: Vec<_> = args.iter().map(|x| x.to_string()).collect();
                write!(f, "{}({})", name, params.join(", "))
            }
        }
    }
}

/// An OGC filter; the boolean half of the model. `Include` and `Exclude`
/// are the two constant filters of the Filter Encoding standard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Filter {
    /// Matches every feature.
    Include,
    /// Matches no feature.
    Exclude,
    /// Conjunction of 2 or more filters.
    And(Vec<Filter>),
    /// Disjunction of 2 or more filters.
    Or(Vec<Filter>),
    /// Negation.
    Not(Box<Filter>),
    /// Binary comparison, including `LIKE`.
    Cmp(Op, Expr, Expr),
    /// Closed-interval test over numerics.
    Between {
        /// Tested expression.
        value: Expr,
        /// Lower limit, inclusive.
        lo: Expr,
        /// Upper limit, inclusive.
        hi: Expr,
    },
    /// Feature-id membership.
    Id(BTreeSet<String>),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Include
    }
}

impl Filter {
    /// Conjoin two filters, short-circuiting the constants and flattening
    /// nested conjunctions.
    pub fn and(a: Filter, b: Filter) -> Filter {
        match (a, b) {
            (Filter::Exclude, _) | (_, Filter::Exclude) => Filter::Exclude,
            (Filter::Include, x) | (x, Filter::Include) => x,
            (Filter::And(mut xs), Filter::And(ys)) => {
                xs.extend(ys);
                Filter::And(xs)
            }
            (Filter::And(mut xs), y) => {
                xs.push(y);
                Filter::And(xs)
            }
            (x, Filter::And(mut ys)) => {
                ys.insert(0, x);
                Filter::And(ys)
            }
            (x, y) => Filter::And(vec![x, y]),
        }
    }

    /// Disjoin two filters, short-circuiting the constants and flattening
    /// nested disjunctions.
    pub fn or(a: Filter, b: Filter) -> Filter {
        match (a, b) {
            (Filter::Include, _) | (_, Filter::Include) => Filter::Include,
            (Filter::Exclude, x) | (x, Filter::Exclude) => x,
            (Filter::Or(mut xs), Filter::Or(ys)) => {
                xs.extend(ys);
                Filter::Or(xs)
            }
            (Filter::Or(mut xs), y) => {
                xs.push(y);
                Filter::Or(xs)
            }
            (x, Filter::Or(mut ys)) => {
                ys.insert(0, x);
                Filter::Or(ys)
            }
            (x, y) => Filter::Or(vec![x, y]),
        }
    }

    /// Negate a filter, collapsing double negation and the constants.
    pub fn not(x: Filter) -> Filter {
        match x {
            Filter::Include => Filter::Exclude,
            Filter::Exclude => Filter::Include,
            Filter::Not(inner) => *inner,
            other => Filter::Not(Box::new(other)),
        }
    }

    /// Disjoin a whole list; an empty list yields `Exclude` (the identity
    /// of OR).
    pub fn any(xs: impl IntoIterator<Item = Filter>) -> Filter {
        xs.into_iter().fold(Filter::Exclude, Filter::or)
    }

    /// Conjoin a whole list; an empty list yields `Include` (the identity
    /// of AND).
    pub fn all(xs: impl IntoIterator<Item = Filter>) -> Filter {
        xs.into_iter().fold(Filter::Include, Filter::and)
    }

    /// Evaluate against a [`Feature`]. An absent attribute makes the
    /// enclosing comparison FALSE, never an error; type-mismatched
    /// comparisons are FALSE as well.
    pub fn evaluate(&self, feature: &Feature) -> bool {
        match self {
            Filter::Include => true,
            Filter::Exclude => false,
            Filter::And(xs) => xs.iter().all(|x| x.evaluate(feature)),
            Filter::Or(xs) => xs.iter().any(|x| x.evaluate(feature)),
            Filter::Not(x) => !x.evaluate(feature),
            Filter::Cmp(op, a, b) => {
                let (za, zb) = match (a.evaluate(feature), b.evaluate(feature)) {
                    (Some(x), Some(y)) => (x, y),
                    _ => return false,
                };
                match op {
                    Op::Eq => za.loose_eq(&zb),
                    Op::Neq => !za.loose_eq(&zb),
                    Op::Lt => za.loose_cmp(&zb).is_some_and(|o| o.is_lt()),
                    Op::Gt => za.loose_cmp(&zb).is_some_and(|o| o.is_gt()),
                    Op::Lte => za.loose_cmp(&zb).is_some_and(|o| o.is_le()),
                    Op::Gte => za.loose_cmp(&zb).is_some_and(|o| o.is_ge()),
                    Op::IsLike => match (&za, &zb) {
                        (AttrValue::Str(s), AttrValue::Str(p)) => like(s, p),
                        _ => false,
                    },
                    Op::IsBetween => false,
                }
            }
            Filter::Between { value, lo, hi } => {
                let v = value.evaluate(feature).and_then(|x| x.as_num());
                let a = lo.evaluate(feature).and_then(|x| x.as_num());
                let b = hi.evaluate(feature).and_then(|x| x.as_num());
                match (v, a, b) {
                    (Some(v), Some(a), Some(b)) => {
                        let range = if a <= b { a..=b } else { b..=a };
                        range.contains(&v)
                    }
                    _ => false,
                }
            }
            Filter::Id(set) => match &feature.id {
                Some(id) => set.contains(id),
                None => false,
            },
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Include => write!(f, "INCLUDE"),
            Filter::Exclude => write!(f, "EXCLUDE"),
            Filter::And(xs) => {
                let items: Vec<_> = xs.iter().map(|x| format!("({x})")).collect();
                write!(f, "{}", items.join(" AND "))
            }
            Filter::Or(xs) => {
                let items: Vec<_> = xs.iter().map(|x| format!("({x})")).collect();
                write!(f, "{}", items.join(" OR "))
            }
            Filter::Not(x) => write!(f, "NOT ({x})"),
            Filter::Cmp(op, a, b) => write!(f, "{a} {op} {b}"),
            Filter::Between { value, lo, hi } => write!(f, "{value} BETWEEN {lo} AND {hi}"),
            Filter::Id(set) => {
                let items: Vec<_> = set.iter().map(|x| format!("'{x}'")).collect();
                write!(f, "IN ({})", items.join(", "))
            }
        }
    }
}

// SQL LIKE w/ '%' (any run) and '_' (any single char) wildcards...
fn like(input: &str, pattern: &str) -> bool {
    fn go(s: &[char], p: &[char]) -> bool {
        match p.split_first() {
            None => s.is_empty(),
            Some((&'%', rest)) => (0..=s.len()).any(|k| go(&s[k..], rest)),
            Some((&'_', rest)) => !s.is_empty() && go(&s[1..], rest),
            Some((c, rest)) => s.first() == Some(c) && go(&s[1..], rest),
        }
    }
    let s: Vec<char> = input.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    go(&s, &p)
}

/// Concrete value of a feature attribute, as seen by the test-support
/// evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Unknown or undefined.
    Null,
    /// A boolean.
    Bool(bool),
    /// A numeric value.
    Num(f64),
    /// A character string.
    Str(String),
}

impl AttrValue {
    // a literal token is a number when it parses as one, a string otherwise.
    fn from_literal(x: &str) -> Self {
        match x.parse::<f64>() {
            Ok(n) => AttrValue::Num(n),
            Err(_) => AttrValue::Str(x.to_owned()),
        }
    }

    fn as_num(&self) -> Option<f64> {
        match self {
            AttrValue::Num(x) => Some(*x),
            AttrValue::Str(x) => x.parse::<f64>().ok(),
            _ => None,
        }
    }

    // equality across the Num/Str divide goes numeric when both sides
    // parse as numbers...
    fn loose_eq(&self, other: &Self) -> bool {
        match (self.as_num(), other.as_num()) {
            (Some(a), Some(b)) => a == b,
            _ => match (self, other) {
                (AttrValue::Str(a), AttrValue::Str(b)) => a == b,
                (AttrValue::Bool(a), AttrValue::Bool(b)) => a == b,
                _ => false,
            },
        }
    }

    fn loose_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self.as_num(), other.as_num()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => match (self, other) {
                (AttrValue::Str(a), AttrValue::Str(b)) => Some(a.cmp(b)),
                _ => None,
            },
        }
    }
}

/// A feature sample: an optional id plus a flat attribute map. Just enough
/// for filter evaluation; this is NOT a GIS feature model.
#[derive(Debug, Clone, Default)]
pub struct Feature {
    /// Feature id, when the data source assigns one.
    pub id: Option<String>,
    /// Attribute name to value map.
    pub attrs: HashMap<String, AttrValue>,
}

impl Feature {
    /// Build from an id and a list of attribute pairs.
    pub fn new<const N: usize>(id: Option<&str>, attrs: [(&str, AttrValue); N]) -> Self {
        Feature {
            id: id.map(str::to_owned),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        }
    }
}
