// SPDX-License-Identifier: Apache-2.0

//! Comment tag mining.
//!
//! Given:
//!     * rules preceded by comments carrying `@title` / `@abstract` tags.
//! Then:
//! * assert multiple `@title` lines concatenate w/ `", "`;
//! * assert multiple `@abstract` lines concatenate w/ `"\n"`;
//! * assert a tag-less comment sets neither.
//!

use css2sld::prelude::*;
use std::error::Error;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_title_and_abstract() -> Result<(), Box<dyn Error>> {
    let src = r#"
        /* @title Roads
         * @title Highways
         * @abstract Primary network
         * @abstract Secondary network
         */
        * { stroke: black }
    "#;
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    assert_eq!(rule.title.as_deref(), Some("Roads, Highways"));
    assert_eq!(
        rule.abstract_text.as_deref(),
        Some("Primary network\nSecondary network")
    );
    Ok(())
}

#[test]
#[traced_test]
fn test_colon_separator_is_optional() -> Result<(), Box<dyn Error>> {
    let src = "/* @title: Lakes */ * { fill: #0000ff }";
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    assert_eq!(rule.title.as_deref(), Some("Lakes"));
    assert!(rule.abstract_text.is_none());
    Ok(())
}

#[test]
#[traced_test]
fn test_untagged_comment_sets_nothing() -> Result<(), Box<dyn Error>> {
    let src = "/* just an ordinary remark */ * { fill: gray }";
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let rule = &style.feature_type_styles[0].rules[0];
    assert!(rule.title.is_none());
    assert!(rule.abstract_text.is_none());
    Ok(())
}

#[test]
#[traced_test]
fn test_combined_rules_join_comments() -> Result<(), Box<dyn Error>> {
    // the overlap of two commented rules carries both titles...
    let src = r#"
        /* @title Base */
        * { stroke: black }
        /* @title Detail */
        [@scale < 10000] { stroke: red }
    "#;
    let sheet = Stylesheet::try_from_text(src)?;
    let style = translate(&sheet)?;

    let first = &style.feature_type_styles[0].rules[0];
    assert_eq!(first.title.as_deref(), Some("Detail, Base"));
    Ok(())
}
