//! Dial-in guidance: fixed threshold rules that turn a shot's ratio and time
//! into adjustment advice.
//!
//! All comparisons are strict, so the band edges (ratio 1.8 / 2.2, time 25 /
//! 30 s) count as on target.

use serde::Serialize;

use crate::{BrewParameters, DialInSession};

pub const TARGET_RATIO: f64 = 2.0;
pub const RATIO_TOLERANCE: f64 = 0.2;
pub const TARGET_TIME_MIN: f64 = 25.0;
pub const TARGET_TIME_MAX: f64 = 30.0;

fn ratio_high() -> f64 {
    TARGET_RATIO + RATIO_TOLERANCE
}

fn ratio_low() -> f64 {
    TARGET_RATIO - RATIO_TOLERANCE
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrindDirection {
    Finer,
    Coarser,
    Hold,
}

impl GrindDirection {
    /// Line used in the guidance list.
    pub fn advice(&self) -> &'static str {
        match self {
            GrindDirection::Finer => "Grind finer to slow the flow and increase extraction.",
            GrindDirection::Coarser => {
                "Grind coarser to speed up the flow and reduce over-extraction."
            }
            GrindDirection::Hold => "Grind looks close; keep the same grind setting.",
        }
    }

    /// One-line "next adjustment" directive.
    pub fn directive(&self) -> &'static str {
        match self {
            GrindDirection::Finer => "Next adjustment: Grind finer slightly.",
            GrindDirection::Coarser => "Next adjustment: Grind coarser slightly.",
            GrindDirection::Hold => {
                "Next adjustment: Keep settings and adjust yield ±1–2 g if needed."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DoseYieldAdvice {
    RaiseYieldOrLowerDose,
    LowerYieldOrRaiseDose,
    ExtendTime,
    ShortenTime,
    Balanced,
}

impl DoseYieldAdvice {
    pub fn message(&self) -> &'static str {
        match self {
            DoseYieldAdvice::RaiseYieldOrLowerDose => {
                "Increase yield slightly or reduce dose to reach the target ratio."
            }
            DoseYieldAdvice::LowerYieldOrRaiseDose => {
                "Reduce yield slightly or increase dose to pull closer to 1:2."
            }
            DoseYieldAdvice::ExtendTime => {
                "If flavor is sharp, extend time by grinding finer or slightly increasing dose."
            }
            DoseYieldAdvice::ShortenTime => {
                "If flavor is bitter, shorten time by grinding coarser or slightly reducing dose."
            }
            DoseYieldAdvice::Balanced => {
                "Dose and yield are balanced; adjust in small steps if taste needs a tweak."
            }
        }
    }
}

/// Fast or thin shots go finer before slow or heavy shots go coarser.
pub fn grind_direction(ratio: f64, time: f64) -> GrindDirection {
    if time < TARGET_TIME_MIN || ratio > ratio_high() {
        GrindDirection::Finer
    } else if time > TARGET_TIME_MAX || ratio < ratio_low() {
        GrindDirection::Coarser
    } else {
        GrindDirection::Hold
    }
}

/// Ratio problems outrank time problems here, unlike [`grind_direction`].
pub fn dose_yield_advice(ratio: f64, time: f64) -> DoseYieldAdvice {
    if ratio < ratio_low() {
        DoseYieldAdvice::RaiseYieldOrLowerDose
    } else if ratio > ratio_high() {
        DoseYieldAdvice::LowerYieldOrRaiseDose
    } else if time < TARGET_TIME_MIN {
        DoseYieldAdvice::ExtendTime
    } else if time > TARGET_TIME_MAX {
        DoseYieldAdvice::ShortenTime
    } else {
        DoseYieldAdvice::Balanced
    }
}

// Same thresholds as grind_direction today, kept separate so the two can be
// tuned independently.
pub fn next_adjustment(ratio: f64, time: f64) -> GrindDirection {
    if time < TARGET_TIME_MIN || ratio > ratio_high() {
        return GrindDirection::Finer;
    }
    if time > TARGET_TIME_MAX || ratio < ratio_low() {
        return GrindDirection::Coarser;
    }
    GrindDirection::Hold
}

/// Output of one guidance request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub ratio: f64,
    /// Always four lines: grind, dose/yield, ratio target, time target.
    pub guidance: Vec<String>,
    pub next_adjustment: String,
}

pub fn build_guidance(params: &BrewParameters) -> Guidance {
    let ratio = params.ratio();
    let time = params.time_seconds;

    let guidance = vec![
        grind_direction(ratio, time).advice().to_string(),
        dose_yield_advice(ratio, time).message().to_string(),
        format!("Target ratio: 1:{:.1} (current {:.2}).", TARGET_RATIO, ratio),
        format!(
            "Target time: {}-{}s (current {}s).",
            TARGET_TIME_MIN, TARGET_TIME_MAX, time
        ),
    ];

    Guidance {
        ratio,
        guidance,
        next_adjustment: next_adjustment(ratio, time).directive().to_string(),
    }
}

/// Plain-text summary of a dial-in session for pasting elsewhere.
pub fn share_summary(session: &DialInSession) -> String {
    let brew = &session.brew;
    let ratio = brew.ratio();
    [
        "Espresso Dial-In Summary".to_string(),
        format!("Machine: {}", session.machine),
        format!("Basket: {:.1} g", session.basket_grams),
        format!("Dose: {:.1} g", brew.dose_grams),
        format!("Yield: {:.1} g", brew.yield_grams),
        format!("Time: {} s", brew.time_seconds),
        format!("Roast: {}", session.roast),
        format!("Grinder: {}", session.grinder),
        format!("Ratio: 1:{:.2}", ratio),
        format!(
            "Guidance: {}",
            next_adjustment(ratio, brew.time_seconds).directive()
        ),
    ]
    .join("\n")
}
