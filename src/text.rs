// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! PEG parser rules and actions for the cartographic CSS dialect.
//!
//! Being a PEG parser means the following limits/constraints/directives
//! should be observed when writing and ordering rules...
//!
//! * When writing a parser with choices, put the longest or most specific
//!   choice first, and the shortest or most general choice last.
//! * There is no backtracking across a successful sub-rule: once a choice
//!   consumed characters they will never come back; the next rule only
//!   runs on what is left.
//!

use crate::{
    filter::{Expr, Filter},
    op::Op,
    property::{PropertyName, PseudoClass},
    range::ScaleRange,
    rule::CssRule,
    selector::Selector,
    value::Value,
};
use std::collections::BTreeMap;

// A selector position holds either a proper selector atom or a
// pseudo-class prefix routing the rule's declarations.
enum SelAtom {
    Sel(Selector),
    Pseudo(PseudoClass),
}

peg::parser! {
    pub grammar css() for str {
        // howto handle case-insensitive tokens.  see
        // https://github.com/kevinmehall/rust-peg/issues/216
        rule i(literal: &'static str)
        = input:$([_]*<{literal.len()}>)
        {? if input.eq_ignore_ascii_case(literal) { Ok(()) } else { Err(literal) } }

        // ===== whitespace ===================================================
        rule _ = quiet! { [' ' | '\t' | '\n' | '\r']* }

        // value separator; crossing newlines keeps multi-line values (long
        // color maps) intact
        rule sp() = quiet! { [' ' | '\t' | '\n' | '\r']+ }

        // ===== stylesheet ===================================================

        /// A whole stylesheet: rules w/ their leading comments.
        pub rule stylesheet() -> Vec<CssRule>
        = rules:rule_def()* _ ![_] { rules }

        rule rule_def() -> CssRule
        = _ comments:(c:comment() _ { c })* group:selector_group() _
          "{" declarations:declaration()* _ "}"
        {
            let (selector, pseudo) = group;
            let pseudo = pseudo.unwrap_or_else(PseudoClass::root);
            let mut properties = BTreeMap::new();
            for (name, values) in declarations {
                properties.insert((pseudo.clone(), PropertyName::parse(&name)), values);
            }
            let comment = if comments.is_empty() {
                None
            } else {
                Some(comments.join("\n"))
            };
            CssRule::new(selector, properties, comment)
        }

        rule comment() -> String
        = "/*" c:$((!"*/" [_])*) "*/" { c.to_string() }

        // ===== selectors ====================================================

        // comma is OR; juxtaposition is AND; a pseudo-class prefix routes
        // the declarations into that bag instead of ROOT...
        rule selector_group() -> (Selector, Option<PseudoClass>)
        = alternatives:(single_selector() ++ (_ "," _)) {
            let pseudo = alternatives.iter().find_map(|(_, p)| p.clone());
            let selector = alternatives
                .into_iter()
                .fold(Selector::Reject, |acc, (s, _)| Selector::or(acc, s));
            (selector, pseudo)
        }

        rule single_selector() -> (Selector, Option<PseudoClass>)
        = atoms:(selector_atom() ++ _) {
            let mut selector = Selector::Accept;
            let mut pseudo = None;
            for atom in atoms {
                match atom {
                    SelAtom::Sel(s) => selector = Selector::and(selector, s),
                    SelAtom::Pseudo(p) => pseudo = Some(p),
                }
            }
            (selector, pseudo)
        }

        rule selector_atom() -> SelAtom
        = "*"                       { SelAtom::Sel(Selector::Accept) }
        / "#" id:identifier()       { SelAtom::Sel(Selector::id(id)) }
        / p:pseudo_class()          { SelAtom::Pseudo(p) }
        / "[" _ p:predicate() _ "]" { SelAtom::Sel(p) }
        / tn:type_name()            { SelAtom::Sel(Selector::type_name(tn)) }

        rule pseudo_class() -> PseudoClass
        = ":nth-" name:identifier() "(" _ n:$(['0'..='9']+) _ ")"
          {? n.parse::<u32>().map(|x| PseudoClass::indexed(name, x)).or(Err("index")) }
        / ":" name:identifier() { PseudoClass::new(name) }

        rule type_name() -> String
        = tn:$(identifier() (":" identifier())?) { tn.to_string() }

        rule identifier() -> String
        = x:$(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '.' | '-']*)
          { x.to_string() }

        // ===== predicates ===================================================

        rule predicate() -> Selector
        = scale_predicate()
        / f:filter_expression() { Selector::Data(f) }

        // scale predicates compile straight to semi-open ranges; `<` and
        // `<=` both close the top end, `>` and `>=` both open the bottom
        rule scale_predicate() -> Selector
        = ("@scale" / "@sd") _ op:$("<=" / ">=" / "<" / ">") _ n:number() {
            match op {
                "<" | "<=" => Selector::ScaleRange(ScaleRange::below(n)),
                _ => Selector::ScaleRange(ScaleRange::above(n)),
            }
        }

        rule filter_expression() -> Filter
        = x:filter_term() rest:(_ i("OR") _ y:filter_term() { y })* {
            rest.into_iter().fold(x, Filter::or)
        }

        rule filter_term() -> Filter
        = x:filter_factor() rest:(_ i("AND") _ y:filter_factor() { y })* {
            rest.into_iter().fold(x, Filter::and)
        }

        rule filter_factor() -> Filter
        = i("NOT") _ x:filter_factor()          { Filter::not(x) }
        / "(" _ x:filter_expression() _ ")"     { x }
        / comparison()

        rule comparison() -> Filter
        = value:operand() _ i("BETWEEN") _ lo:operand() _ i("AND") _ hi:operand()
          { Filter::Between { value, lo, hi } }
        / a:operand() _ i("LIKE") _ b:operand() { Filter::Cmp(Op::IsLike, a, b) }
        / a:operand() _ op:comparison_op() _ b:operand() { Filter::Cmp(op, a, b) }

        rule comparison_op() -> Op
        = "<>" { Op::Neq }
        / "<=" { Op::Lte }
        / ">=" { Op::Gte }
        / "<"  { Op::Lt }
        / ">"  { Op::Gt }
        / "="  { Op::Eq }

        rule operand() -> Expr
        = s:quoted()            { Expr::Literal(s) }
        / n:$(numeric_token())  { Expr::Literal(n.to_string()) }
        / a:attribute_name()    { Expr::Property(a) }

        rule attribute_name() -> String
        = x:$(['a'..='z' | 'A'..='Z' | '_']
              ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '.' | ':']*)
          { x.to_string() }

        rule number() -> f64
        = n:$(numeric_token()) {? n.parse::<f64>().or(Err("number")) }

        rule numeric_token()
        = "-"? ['0'..='9']+ ("." ['0'..='9']+)?

        // ===== declarations =================================================

        rule declaration() -> (String, Vec<Value>)
        = _ name:$(['a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_']+) _ ":" _
          values:value_list() _ (";" / &"}")
          { (name.to_string(), values) }

        // the comma layer is the repetition list; spaces inside one item
        // nest into a multi-value...
        rule value_list() -> Vec<Value>
        = items:(value_item() ++ (_ "," _)) { items }

        rule value_item() -> Value
        = parts:(single_value() ++ sp()) {
            match parts.len() {
                1 => parts.into_iter().next().expect("one part"),
                _ => Value::Multi(parts),
            }
        }

        rule single_value() -> Value
        = url_value()
        / function_value()
        / s:quoted()            { Value::Literal(s) }
        / "[" a:$((!"]" [_])+) "]" { Value::Expr(Expr::Property(a.trim().to_string())) }
        / t:$(value_token()+)   { Value::Literal(t.to_string()) }

        // url() swallows everything up to the closing paren verbatim...
        rule url_value() -> Value
        = "url" _ "(" _ loc:$((!")" [_])*) ")" {
            Value::Function("url".into(), vec![Value::Literal(loc.trim().trim_matches('\'').to_string())])
        }

        rule function_value() -> Value
        = name:$(['a'..='z' | 'A'..='Z' | '-' | '_']+) "(" _
          args:(value_item() ** (_ "," _)) _ ")"
          { Value::Function(name.to_string(), args) }

        rule quoted() -> String
        = "'" s:$((!"'" [_])*) "'" { s.to_string() }

        rule value_token()
        = [^ ' ' | '\t' | '\n' | '\r' | ',' | ';' | '{' | '}' | '(' | ')' | '[' | ']']
    }
}
