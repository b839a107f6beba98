// SPDX-License-Identifier: Apache-2.0

//! Mutual exclusion + cap boundedness.
//!
//! Given:
//!     * stylesheets w/ heavily overlapping rules (attribute predicates,
//!       scale ranges, catch-alls).
//! When:
//!     Random features and scale denominators are sampled against the
//!     translated style.
//! Then:
//! * assert that at most one rule of any feature-type style matches any
//!   (feature, scale) pair;
//! * assert the emitted rule count never exceeds the combination cap.
//!

use crate::utils::{matching_rules, random_feature, random_scale};
use css2sld::prelude::*;
use rand::{RngExt, SeedableRng, rngs::StdRng};
use std::error::Error;
use tracing_test::traced_test;

const OVERLAPPING: &str = r#"
    * { stroke: black }
    [@scale < 10000] { stroke: red }
    [@scale < 50000] { stroke-width: 2 }
    [pop > 100000] { stroke: blue; stroke-width: 4 }
    [pop > 500000] [@scale < 100000] { stroke: green }
    [class = 'highway'] { stroke: orange }
"#;

#[test]
#[traced_test]
fn test_mutual_exclusion() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(OVERLAPPING)?;
    let style = translate(&sheet)?;
    assert_eq!(style.feature_type_styles.len(), 1);
    let fts = &style.feature_type_styles[0];

    let mut rng = StdRng::seed_from_u64(20250801);
    for _ in 0..2_000 {
        let feature = random_feature(&mut rng);
        let scale = random_scale(&mut rng);
        let matches = matching_rules(fts, &feature, scale);
        assert!(
            matches.len() <= 1,
            "{} rules match pop={:?} class={:?} at 1:{scale}",
            matches.len(),
            feature.attrs.get("pop"),
            feature.attrs.get("class"),
        );
    }
    Ok(())
}

#[test]
#[traced_test]
fn test_total_coverage_is_preserved() -> Result<(), Box<dyn Error>> {
    // a catch-all is in the set, so some rule must fire for every sample...
    let sheet = Stylesheet::try_from_text(OVERLAPPING)?;
    let style = translate(&sheet)?;
    let fts = &style.feature_type_styles[0];

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let feature = random_feature(&mut rng);
        let scale = random_scale(&mut rng);
        assert_eq!(matching_rules(fts, &feature, scale).len(), 1);
    }
    Ok(())
}

#[test]
#[traced_test]
fn test_cap_bounds_emitted_rules() -> Result<(), Box<dyn Error>> {
    // 8 overlapping scale rules blow up combinatorially; the cap holds...
    let mut src = String::from("* { stroke: black }\n");
    for i in 1..=8 {
        src.push_str(&format!(
            "[@scale < {}] {{ stroke: red; stroke-width: {i} }}\n",
            i * 10_000
        ));
    }
    let sheet = Stylesheet::try_from_text(&src)?;

    for cap in [1, 5, 9, 50] {
        let style = translate_capped(&sheet, cap)?;
        for fts in &style.feature_type_styles {
            assert!(
                fts.rules.len() <= cap,
                "cap {cap} exceeded: {} rules",
                fts.rules.len()
            );
        }
    }
    Ok(())
}

#[test]
#[traced_test]
fn test_exclusion_holds_under_truncation() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(OVERLAPPING)?;
    let style = translate_capped(&sheet, 4)?;
    let fts = &style.feature_type_styles[0];

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let feature = random_feature(&mut rng);
        let scale = rng.random_range(0.0..200_000.0);
        assert!(matching_rules(fts, &feature, scale).len() <= 1);
    }
    Ok(())
}
