// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Selector extractors: type-names, scale ranges, feature-type guessing.
//!

use crate::{
    feature::{AttrType, FeatureType},
    filter::{Expr, Filter},
    op::Op,
    property::PropertyName,
    range::ScaleRange,
    rule::CssRule,
    selector::{Selector, TypeName},
    value::Value,
};

/// The type-names a selector references, in tree order. A selector that
/// references none contributes the wildcard.
pub fn type_names(s: &Selector) -> Vec<TypeName> {
    let mut out = vec![];
    walk_type_names(s, &mut out);
    if out.is_empty() {
        out.push(TypeName::DEFAULT);
    }
    out
}

fn walk_type_names(s: &Selector, out: &mut Vec<TypeName>) {
    match s {
        Selector::TypeName(t) => {
            if !out.contains(t) {
                out.push(t.clone());
            }
        }
        Selector::And(xs) | Selector::Or(xs) => {
            for x in xs {
                walk_type_names(x, out);
            }
        }
        Selector::Not(x) => walk_type_names(x, out),
        _ => {}
    }
}

/// The single scale range a selector admits, or `None` when it imposes no
/// scale constraint. Conjunctions intersect their children's ranges;
/// a disjunction never contributes one (the flattener rewrites
/// OR-of-scale-ranges into sibling rules before anything relies on this).
pub fn scale_range(s: &Selector) -> Option<ScaleRange> {
    match s {
        Selector::ScaleRange(r) => Some(*r),
        Selector::And(xs) => xs
            .iter()
            .filter_map(scale_range)
            .reduce(|a, b| a.intersect(&b)),
        _ => None,
    }
}

/// Infer a minimal feature-type descriptor from the attributes a rule set
/// references: comparison operands type the attribute coarsely, `LIKE`
/// forces string, `*-geometry` properties mark geometries, and bare
/// attribute references in property expressions default to string.
pub fn guess_feature_type(rules: &[CssRule]) -> FeatureType {
    let mut ft = FeatureType::new();
    for r in rules {
        walk_predicates(&r.selector, &mut ft);
        for ((_, name), values) in &r.properties {
            let geometry = matches!(
                name,
                PropertyName::FillGeometry
                    | PropertyName::StrokeGeometry
                    | PropertyName::MarkGeometry
                    | PropertyName::LabelGeometry
            );
            for v in values {
                observe_value(v, geometry, &mut ft);
            }
        }
    }
    ft
}

fn walk_predicates(s: &Selector, ft: &mut FeatureType) {
    match s {
        Selector::Data(p) => observe_filter(p, ft),
        Selector::And(xs) | Selector::Or(xs) => {
            for x in xs {
                walk_predicates(x, ft);
            }
        }
        Selector::Not(x) => walk_predicates(x, ft),
        _ => {}
    }
}

fn observe_filter(p: &Filter, ft: &mut FeatureType) {
    match p {
        Filter::And(xs) | Filter::Or(xs) => {
            for x in xs {
                observe_filter(x, ft);
            }
        }
        Filter::Not(x) => observe_filter(x, ft),
        Filter::Cmp(op, a, b) => {
            let t = if matches!(op, Op::IsLike) {
                AttrType::Str
            } else {
                match (a.as_number(), b.as_number()) {
                    (Some(_), _) | (_, Some(_)) => AttrType::Num,
                    _ => AttrType::Str,
                }
            };
            observe_expr(a, t, ft);
            observe_expr(b, t, ft);
        }
        Filter::Between { value, lo, hi } => {
            observe_expr(value, AttrType::Num, ft);
            observe_expr(lo, AttrType::Num, ft);
            observe_expr(hi, AttrType::Num, ft);
        }
        _ => {}
    }
}

fn observe_expr(e: &Expr, t: AttrType, ft: &mut FeatureType) {
    match e {
        Expr::Property(name) => ft.observe(name, t),
        Expr::Function(_, args) => {
            for a in args {
                observe_expr(a, t, ft);
            }
        }
        Expr::Literal(_) => {}
    }
}

fn observe_value(v: &Value, geometry: bool, ft: &mut FeatureType) {
    match v {
        Value::Expr(e) => {
            let t = if geometry { AttrType::Geom } else { AttrType::Str };
            observe_expr(e, t, ft);
        }
        Value::Function(_, args) | Value::Multi(args) => {
            for a in args {
                observe_value(a, geometry, ft);
            }
        }
        Value::Literal(_) => {}
    }
}
