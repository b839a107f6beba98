// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Selector model + algebra...
//!
//! Selectors form a boolean algebra w/ `Accept` and `Reject` as the two
//! terminals (the identities of AND and OR respectively). The combiner and
//! the coverage subtractor lean hard on [`simplify`][Selector::simplify]:
//! two selectors are _disjoint_ exactly when their conjunction simplifies
//! to `Reject`, and an unsatisfiable rule combination is one whose
//! conjoined selector does.
//!
//! Following the PEG-parser precedent of keeping the variant enum small and
//! the behaviour on it, tree walks here are explicit `match` recursion, not
//! visitor objects.
//!

use crate::{
    feature::{AttrType, FeatureType},
    filter::{Expr, Filter},
    op::Op,
    range::ScaleRange,
};
use core::fmt;
use std::collections::BTreeSet;
use std::ops::Add;

/// A feature-type name constraint. The `DEFAULT` value is the wildcard
/// matching any type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TypeName(Option<String>);

impl TypeName {
    /// The wildcard type-name.
    pub const DEFAULT: TypeName = TypeName(None);

    /// A concrete type-name; e.g. `topp:states`.
    pub fn new(name: impl Into<String>) -> Self {
        TypeName(Some(name.into()))
    }

    /// The concrete name, or `None` for the wildcard.
    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Return TRUE if this is the wildcard.
    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(x) => write!(f, "{x}"),
            None => write!(f, "*"),
        }
    }
}

/// Selector variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Matches everything; identity of AND.
    Accept,
    /// Matches nothing; identity of OR.
    Reject,
    /// Feature-type constraint.
    TypeName(TypeName),
    /// Feature-id membership.
    Id(BTreeSet<String>),
    /// Scale-denominator constraint.
    ScaleRange(ScaleRange),
    /// Z-index pseudo-class.
    ZIndex(i64),
    /// Arbitrary feature-attribute predicate.
    Data(Filter),
    /// Conjunction.
    And(Vec<Selector>),
    /// Disjunction.
    Or(Vec<Selector>),
    /// Negation.
    Not(Box<Selector>),
}

impl Default for Selector {
    fn default() -> Self {
        Selector::Accept
    }
}

/// Lexicographic selector-complexity score: counts of type-names, ids,
/// data atoms, scale-ranges and pseudo-classes, compared left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32, pub u32, pub u32);

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, o: Specificity) -> Specificity {
        Specificity(
            self.0 + o.0,
            self.1 + o.1,
            self.2 + o.2,
            self.3 + o.3,
            self.4 + o.4,
        )
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{},{},{},{})",
            self.0, self.1, self.2, self.3, self.4
        )
    }
}

impl Selector {
    /// Shorthand for a single-id selector.
    pub fn id(x: impl Into<String>) -> Self {
        Selector::Id(BTreeSet::from([x.into()]))
    }

    /// Shorthand for a concrete type-name selector.
    pub fn type_name(x: impl Into<String>) -> Self {
        Selector::TypeName(TypeName::new(x))
    }

    /// Conjoin two selectors, short-circuiting the terminals and
    /// flattening nested conjunctions. No deeper simplification happens
    /// here; call [`simplify`][Selector::simplify] for that.
    pub fn and(a: Selector, b: Selector) -> Selector {
        match (a, b) {
            (Selector::Reject, _) | (_, Selector::Reject) => Selector::Reject,
            (Selector::Accept, x) | (x, Selector::Accept) => x,
            (Selector::And(mut xs), Selector::And(ys)) => {
                xs.extend(ys);
                Selector::And(xs)
            }
            (Selector::And(mut xs), y) => {
                xs.push(y);
                Selector::And(xs)
            }
            (x, Selector::And(mut ys)) => {
                ys.insert(0, x);
                Selector::And(ys)
            }
            (x, y) => Selector::And(vec![x, y]),
        }
    }

    /// Disjoin two selectors, short-circuiting the terminals and
    /// flattening nested disjunctions.
    pub fn or(a: Selector, b: Selector) -> Selector {
        match (a, b) {
            (Selector::Accept, _) | (_, Selector::Accept) => Selector::Accept,
            (Selector::Reject, x) | (x, Selector::Reject) => x,
            (Selector::Or(mut xs), Selector::Or(ys)) => {
                xs.extend(ys);
                Selector::Or(xs)
            }
            (Selector::Or(mut xs), y) => {
                xs.push(y);
                Selector::Or(xs)
            }
            (x, Selector::Or(mut ys)) => {
                ys.insert(0, x);
                Selector::Or(ys)
            }
            (x, y) => Selector::Or(vec![x, y]),
        }
    }

    /// Negate a selector.
    pub fn not(x: Selector) -> Selector {
        match x {
            Selector::Accept => Selector::Reject,
            Selector::Reject => Selector::Accept,
            // the wildcard admits every type; its complement nothing...
            Selector::TypeName(t) if t.is_default() => Selector::Reject,
            Selector::Not(inner) => *inner,
            other => Selector::Not(Box::new(other)),
        }
    }

    /// Return TRUE when the conjunction of the two selectors admits no
    /// feature at any scale.
    pub fn disjoint(a: &Selector, b: &Selector, ft: Option<&FeatureType>) -> bool {
        matches!(
            Selector::and(a.clone(), b.clone()).simplify(ft),
            Selector::Reject
        )
    }

    /// Selector-complexity score.
    pub fn specificity(&self) -> Specificity {
        match self {
            Selector::Accept | Selector::Reject => Specificity::default(),
            Selector::TypeName(t) if t.is_default() => Specificity::default(),
            Selector::TypeName(_) => Specificity(1, 0, 0, 0, 0),
            Selector::Id(set) => Specificity(0, set.len() as u32, 0, 0, 0),
            Selector::Data(_) => Specificity(0, 0, 1, 0, 0),
            Selector::ScaleRange(_) => Specificity(0, 0, 0, 1, 0),
            Selector::ZIndex(_) => Specificity(0, 0, 0, 0, 1),
            Selector::And(xs) | Selector::Or(xs) => xs
                .iter()
                .map(|x| x.specificity())
                .fold(Specificity::default(), Specificity::add),
            Selector::Not(x) => x.specificity(),
        }
    }

    /// Compile the feature-predicate residue of this (simplified) selector
    /// into an OGC filter. Type-name atoms strip to `INCLUDE` (the
    /// feature-type-style grouping already accounts for them), and so do
    /// scale and z atoms (carried by the rule's scale limits and the band
    /// split respectively).
    pub fn to_filter(&self) -> Filter {
        match self {
            Selector::Accept => Filter::Include,
            Selector::Reject => Filter::Exclude,
            Selector::TypeName(_) | Selector::ScaleRange(_) | Selector::ZIndex(_) => {
                Filter::Include
            }
            Selector::Id(set) => Filter::Id(set.clone()),
            Selector::Data(p) => p.clone(),
            Selector::And(xs) => Filter::all(xs.iter().map(|x| x.to_filter())),
            Selector::Or(xs) => Filter::any(xs.iter().map(|x| x.to_filter())),
            // negated non-feature atoms have no filter-space footprint
            // either; negating their INCLUDE would wrongly exclude...
            Selector::Not(x) => match &**x {
                Selector::TypeName(_) | Selector::ScaleRange(_) | Selector::ZIndex(_) => {
                    Filter::Include
                }
                y => Filter::not(y.to_filter()),
            },
        }
    }

    /// Normalize this selector: flatten nested same-kind nodes, fold the
    /// terminals through, intersect scale ranges, resolve type-name
    /// conflicts, push negation down over AND/OR and complement negated
    /// scale ranges, detect structural `X AND NOT X` contradictions, and
    /// simplify numeric data predicates against `ft` when one is attached.
    pub fn simplify(&self, ft: Option<&FeatureType>) -> Selector {
        match self {
            Selector::Accept
            | Selector::Reject
            | Selector::TypeName(_)
            | Selector::Id(_)
            | Selector::ZIndex(_) => self.clone(),

            Selector::ScaleRange(r) => {
                if r.is_empty() {
                    Selector::Reject
                } else if r.is_full() {
                    Selector::Accept
                } else {
                    self.clone()
                }
            }

            Selector::Data(p) => match p {
                Filter::Include => Selector::Accept,
                Filter::Exclude => Selector::Reject,
                _ => self.clone(),
            },

            Selector::Not(x) => match x.simplify(ft) {
                Selector::Accept => Selector::Reject,
                Selector::Reject => Selector::Accept,
                Selector::Not(y) => *y,
                // the complement of [a, b) is [0, a) OR [b, inf)...
                Selector::ScaleRange(r) => {
                    let below = ScaleRange::below(r.min);
                    let above = ScaleRange::above(r.max);
                    let mut parts = vec![];
                    if !below.is_empty() {
                        parts.push(Selector::ScaleRange(below));
                    }
                    if !above.is_empty() {
                        parts.push(Selector::ScaleRange(above));
                    }
                    match parts.len() {
                        0 => Selector::Reject,
                        1 => parts.pop().unwrap_or(Selector::Reject),
                        _ => Selector::Or(parts),
                    }
                }
                // De Morgan, then resimplify the expansion...
                Selector::And(xs) => {
                    let inverted = xs.into_iter().fold(Selector::Reject, |acc, x| {
                        Selector::or(acc, Selector::not(x))
                    });
                    inverted.simplify(ft)
                }
                Selector::Or(xs) => {
                    let inverted = xs.into_iter().fold(Selector::Accept, |acc, x| {
                        Selector::and(acc, Selector::not(x))
                    });
                    inverted.simplify(ft)
                }
                y => Selector::Not(Box::new(y)),
            },

            Selector::Or(xs) => {
                let mut out: Vec<Selector> = vec![];
                for x in xs {
                    match x.simplify(ft) {
                        Selector::Accept => return Selector::Accept,
                        Selector::Reject => {}
                        Selector::Or(ys) => out.extend(ys),
                        y => {
                            if !out.contains(&y) {
                                out.push(y)
                            }
                        }
                    }
                }
                match out.len() {
                    0 => Selector::Reject,
                    1 => out.pop().unwrap_or(Selector::Reject),
                    _ => Selector::Or(out),
                }
            }

            Selector::And(xs) => simplify_and(xs, ft),
        }
    }
}

// The AND case carries nearly all of the algebra, so it gets its own
// function.
fn simplify_and(xs: &[Selector], ft: Option<&FeatureType>) -> Selector {
    // simplify + flatten children first...
    let mut flat: Vec<Selector> = vec![];
    for x in xs {
        match x.simplify(ft) {
            Selector::Reject => return Selector::Reject,
            Selector::Accept => {}
            Selector::And(ys) => flat.extend(ys),
            y => flat.push(y),
        }
    }

    // resolve type-name constraints: two distinct concrete names cannot
    // both hold; the wildcard yields to anything concrete...
    let mut type_name: Option<TypeName> = None;
    // intersect scale ranges...
    let mut range: Option<ScaleRange> = None;
    // intersect id sets...
    let mut ids: Option<BTreeSet<String>> = None;
    // a single z-index at most...
    let mut z: Option<i64> = None;
    let mut rest: Vec<Selector> = vec![];

    for x in flat {
        match x {
            Selector::TypeName(t) => match &type_name {
                None => type_name = Some(t),
                Some(old) if old.is_default() => type_name = Some(t),
                Some(old) if t.is_default() || *old == t => {}
                Some(_) => return Selector::Reject,
            },
            Selector::ScaleRange(r) => {
                let merged = match range {
                    None => r,
                    Some(prev) => prev.intersect(&r),
                };
                if merged.is_empty() {
                    return Selector::Reject;
                }
                range = Some(merged);
            }
            Selector::Id(set) => {
                let merged: BTreeSet<String> = match ids {
                    None => set,
                    Some(prev) => prev.intersection(&set).cloned().collect(),
                };
                if merged.is_empty() {
                    return Selector::Reject;
                }
                ids = Some(merged);
            }
            Selector::ZIndex(n) => match z {
                None => z = Some(n),
                Some(prev) if prev == n => {}
                Some(_) => return Selector::Reject,
            },
            y => {
                if !rest.contains(&y) {
                    rest.push(y)
                }
            }
        }
    }

    // structural contradiction: X AND NOT X. Type-names live in their own
    // slot, so their negations are checked against it...
    for a in &rest {
        if let Selector::Not(inner) = a {
            if rest.contains(inner) {
                return Selector::Reject;
            }
            if let Selector::TypeName(t) = &**inner
                && type_name.as_ref() == Some(t)
            {
                return Selector::Reject;
            }
        }
    }

    // numeric-range contradiction across data predicates, when a feature
    // type tells us the attribute is numeric...
    if let Some(ft) = ft
        && data_ranges_empty(&rest, ft)
    {
        return Selector::Reject;
    }

    let mut out: Vec<Selector> = vec![];
    if let Some(t) = type_name {
        if !t.is_default() {
            out.push(Selector::TypeName(t));
        }
    }
    if let Some(r) = range
        && !r.is_full()
    {
        out.push(Selector::ScaleRange(r));
    }
    if let Some(set) = ids {
        out.push(Selector::Id(set));
    }
    if let Some(n) = z {
        out.push(Selector::ZIndex(n));
    }

    // distributing a lone OR child over its siblings lets the per-branch
    // conflicts above fire; keep it bounded to small disjunctions.
    let or_pos = rest
        .iter()
        .position(|x| matches!(x, Selector::Or(branches) if branches.len() <= 8));
    if rest.iter().filter(|x| matches!(x, Selector::Or(_))).count() == 1
        && let Some(pos) = or_pos
    {
        let Selector::Or(branches) = rest.remove(pos) else {
            unreachable!()
        };
        let siblings = Selector::And([out, rest].concat());
        let distributed = branches.into_iter().fold(Selector::Reject, |acc, b| {
            Selector::or(acc, Selector::and(b, siblings.clone()))
        });
        return distributed.simplify(ft);
    }

    out.extend(rest);
    match out.len() {
        0 => Selector::Accept,
        1 => out.pop().unwrap_or(Selector::Accept),
        _ => Selector::And(out),
    }
}

// Open/closed-bounded interval over one numeric attribute.
#[derive(Clone, Copy)]
struct NumInterval {
    lo: f64,
    lo_incl: bool,
    hi: f64,
    hi_incl: bool,
}

impl NumInterval {
    const ALL: NumInterval = NumInterval {
        lo: f64::NEG_INFINITY,
        lo_incl: false,
        hi: f64::INFINITY,
        hi_incl: false,
    };

    fn is_empty(&self) -> bool {
        self.lo > self.hi || (self.lo == self.hi && !(self.lo_incl && self.hi_incl))
    }

    fn clamp_lo(&mut self, v: f64, incl: bool) {
        if v > self.lo || (v == self.lo && self.lo_incl && !incl) {
            self.lo = v;
            self.lo_incl = incl;
        }
    }

    fn clamp_hi(&mut self, v: f64, incl: bool) {
        if v < self.hi || (v == self.hi && self.hi_incl && !incl) {
            self.hi = v;
            self.hi_incl = incl;
        }
    }

    fn apply(&mut self, op: Op, v: f64) {
        match op {
            Op::Eq => {
                self.clamp_lo(v, true);
                self.clamp_hi(v, true);
            }
            Op::Lt => self.clamp_hi(v, false),
            Op::Lte => self.clamp_hi(v, true),
            Op::Gt => self.clamp_lo(v, false),
            Op::Gte => self.clamp_lo(v, true),
            _ => {}
        }
    }
}

// Walk the data atoms of a conjunction and intersect the numeric intervals
// each attribute is constrained to. TRUE when some attribute ends up w/ an
// empty interval, i.e. the conjunction cannot match.
fn data_ranges_empty(conjuncts: &[Selector], ft: &FeatureType) -> bool {
    let mut intervals: Vec<(String, NumInterval)> = vec![];
    let mut narrow = |attr: &str, op: Op, v: f64| {
        let entry = match intervals.iter_mut().find(|(a, _)| a == attr) {
            Some((_, i)) => i,
            None => {
                intervals.push((attr.to_owned(), NumInterval::ALL));
                &mut intervals.last_mut().expect("just pushed").1
            }
        };
        entry.apply(op, v);
    };

    for sel in conjuncts {
        let Selector::Data(p) = sel else { continue };
        // a data atom is either a single comparison or a conjunction of
        // them; anything richer is left alone...
        let atoms: Vec<&Filter> = match p {
            Filter::And(xs) => xs.iter().collect(),
            x => vec![x],
        };
        for atom in atoms {
            match atom {
                Filter::Cmp(op, Expr::Property(a), b) if op.ranged() => {
                    if ft.attr_type(a) == Some(AttrType::Num)
                        && let Some(v) = b.as_number()
                    {
                        narrow(a, *op, v);
                    }
                }
                Filter::Cmp(op, a, Expr::Property(b)) if op.ranged() => {
                    if ft.attr_type(b) == Some(AttrType::Num)
                        && let Some(v) = a.as_number()
                    {
                        narrow(b, op.flip(), v);
                    }
                }
                Filter::Between { value: Expr::Property(a), lo, hi } => {
                    if ft.attr_type(a) == Some(AttrType::Num)
                        && let (Some(l), Some(h)) = (lo.as_number(), hi.as_number())
                    {
                        narrow(a, Op::Gte, l);
                        narrow(a, Op::Lte, h);
                    }
                }
                _ => {}
            }
        }
    }

    intervals.iter().any(|(_, i)| i.is_empty())
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Accept => write!(f, "*"),
            Selector::Reject => write!(f, "!*"),
            Selector::TypeName(t) => write!(f, "{t}"),
            Selector::Id(set) => {
                let items: Vec<_> = set.iter().map(|x| format!("#{x}")).collect();
                write!(f, "{}", items.join(", "))
            }
            Selector::ScaleRange(r) => write!(f, "[@scale in {r}]"),
            Selector::ZIndex(n) => write!(f, "[z = {n}]"),
            Selector::Data(p) => write!(f, "[{p}]"),
            Selector::And(xs) => {
                let items: Vec<_> = xs.iter().map(|x| format!("({x})")).collect();
                write!(f, "{}", items.join(" "))
            }
            Selector::Or(xs) => {
                let items: Vec<_> = xs.iter().map(|x| format!("({x})")).collect();
                write!(f, "{}", items.join(", "))
            }
            Selector::Not(x) => write!(f, "not({x})"),
        }
    }
}
