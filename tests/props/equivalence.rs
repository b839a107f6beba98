// SPDX-License-Identifier: Apache-2.0

//! Visual equivalence.
//!
//! Given:
//!     * a stylesheet of overlapping stroke rules.
//! When:
//!     Random (feature, scale) pairs are evaluated both ways: through the
//!     cascade semantics of the source rules (most specific declaration
//!     wins) and through the translated, mutually exclusive SLD rules.
//! Then:
//! * assert the stroke color and width the SLD draws equal the ones the
//!   cascade would have produced.
//!

use crate::utils::{first_stroke, matching_rules, random_feature, random_scale};
use css2sld::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::error::Error;
use tracing_test::traced_test;

const SHEET: &str = r#"
    * { stroke: black; stroke-width: 1 }
    [pop > 100000] { stroke: blue }
    [@scale < 10000] { stroke-width: 3 }
    [pop > 100000] [@scale < 10000] { stroke: navy; stroke-width: 5 }
"#;

// the cascade outcome, computed directly from the source semantics:
// matching rules overlay their declarations, higher specificity last...
fn cascade_stroke(pop: f64, scale: f64) -> (&'static str, &'static str) {
    let big = pop > 100_000.0;
    let close = scale < 10_000.0;
    match (big, close) {
        (true, true) => ("navy", "5"),
        (true, false) => ("blue", "1"),
        (false, true) => ("black", "3"),
        (false, false) => ("black", "1"),
    }
}

#[test]
#[traced_test]
fn test_visual_equivalence() -> Result<(), Box<dyn Error>> {
    let sheet = Stylesheet::try_from_text(SHEET)?;
    let style = translate(&sheet)?;
    let fts = &style.feature_type_styles[0];

    let mut rng = StdRng::seed_from_u64(987);
    for _ in 0..1_000 {
        let feature = random_feature(&mut rng);
        let scale = random_scale(&mut rng);
        let Some(AttrValue::Num(pop)) = feature.attrs.get("pop").cloned() else {
            panic!("sampled feature lost its pop attribute");
        };

        let matches = matching_rules(fts, &feature, scale);
        assert_eq!(matches.len(), 1, "pop={pop} at 1:{scale}");
        let stroke = first_stroke(matches[0]);

        let (color, width) = cascade_stroke(pop, scale);
        assert_eq!(
            stroke.color,
            Some(Expr::Literal(color.into())),
            "color mismatch for pop={pop} at 1:{scale}"
        );
        assert_eq!(
            stroke.width,
            Some(Expr::Literal(width.into())),
            "width mismatch for pop={pop} at 1:{scale}"
        );
    }
    Ok(())
}
