//! Headline numbers shown above a generated recipe.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{Drink, RecipeResult, DEFAULT_DOSE_GRAMS, DEFAULT_TIME_SECONDS};

/// Grams of espresso per fluid ounce used for the yield estimate.
pub const GRAMS_PER_OZ: f64 = 30.0;

static DOSE_IN_BEAN_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*g").expect("valid regex"));

static SECONDS_IN_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:s|sec|seconds)").expect("valid regex"));

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeOverview {
    pub dose_grams: f64,
    pub yield_grams: f64,
    pub time_seconds: f64,
    pub ratio: f64,
    pub shot_label: String,
}

impl RecipeOverview {
    pub fn from_recipe(recipe: &RecipeResult, drink: &Drink, bean_type: &str) -> Self {
        let dose = dose_from_bean_type(bean_type).unwrap_or(DEFAULT_DOSE_GRAMS);
        let espresso_oz = recipe.espresso_oz().or(drink.espresso_oz).unwrap_or(0.0);
        let yield_grams = if espresso_oz > 0.0 {
            espresso_oz * GRAMS_PER_OZ
        } else {
            dose * 2.0
        };
        let time_seconds = time_from_steps(recipe.step_texts()).unwrap_or(DEFAULT_TIME_SECONDS);

        Self {
            dose_grams: dose,
            yield_grams,
            time_seconds,
            ratio: yield_grams / dose,
            shot_label: shot_label(recipe.shot_type()),
        }
    }
}

/// "House blend (14g basket)" -> 14.
pub fn dose_from_bean_type(bean_type: &str) -> Option<f64> {
    DOSE_IN_BEAN_TYPE
        .captures(bean_type)
        .and_then(|c| c[1].parse().ok())
        .filter(|d: &f64| *d > 0.0)
}

/// First "<n>s" / "<n> sec" / "<n> seconds" mentioned in any step.
pub fn time_from_steps<'a>(steps: impl IntoIterator<Item = &'a str>) -> Option<f64> {
    steps
        .into_iter()
        .find_map(|step| SECONDS_IN_STEP.captures(step))
        .and_then(|c| c[1].parse().ok())
}

fn shot_label(shot_type: Option<&str>) -> String {
    let label = shot_type.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("Double");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
