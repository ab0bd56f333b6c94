//! BMI engine: formula, classification, ideal range and suggestion.
//!
//! Everything here is pure. Callers validate that weight and height are
//! strictly positive before calling in (see `calculator`).

use crate::{Assessment, BmiCategory, IdealRange, LossThreshold, Suggestion};

/// Lower bound of the Normal category
pub const NORMAL_MIN: f64 = 18.5;
/// Lower bound of the Overweight category
pub const OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound of the Obese category
pub const OBESE_MIN: f64 = 30.0;
/// Upper BMI used for the top of the ideal weight band
pub const IDEAL_MAX_BMI: f64 = 24.9;

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `weight / height²`, rounded to 2 decimals
pub fn compute_bmi(weight: f64, height: f64) -> f64 {
    round2(weight / (height * height))
}

/// Map a BMI value to its category
pub fn category_of(bmi: f64) -> BmiCategory {
    if bmi < NORMAL_MIN {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_MIN {
        BmiCategory::Normal
    } else if bmi < OBESE_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Normal-weight band for a height, each bound rounded to 2 decimals
pub fn ideal_weight_range(height: f64) -> IdealRange {
    let (min, max) = normal_bounds(height);
    IdealRange {
        min: round2(min),
        max: round2(max),
    }
}

// Suggestions are computed from the unrounded bounds and rounded once.
fn normal_bounds(height: f64) -> (f64, f64) {
    let squared = height * height;
    (NORMAL_MIN * squared, IDEAL_MAX_BMI * squared)
}

/// Weight-change advice for a reading
///
/// - below 18.5: gain up to the bottom of the normal band
/// - at or above the loss threshold: lose down to the top of the band
/// - Overweight but below an Obese threshold: monitor
/// - otherwise: maintain
pub fn suggest_change(
    weight: f64,
    height: f64,
    bmi: f64,
    threshold: LossThreshold,
) -> Suggestion {
    let (min, max) = normal_bounds(height);

    if bmi < NORMAL_MIN {
        Suggestion::Gain {
            kg: round2(min - weight),
        }
    } else if bmi >= threshold.bmi() {
        Suggestion::Lose {
            kg: round2(weight - max),
        }
    } else if bmi >= OVERWEIGHT_MIN {
        Suggestion::Monitor { max_kg: round2(max) }
    } else {
        Suggestion::Maintain
    }
}

/// Run the full engine for one pair of validated measurements
pub fn assess(weight: f64, height: f64, threshold: LossThreshold) -> Assessment {
    let bmi = compute_bmi(weight, height);
    let category = category_of(bmi);
    let suggestion = suggest_change(weight, height, bmi, threshold);

    tracing::debug!(bmi, ?category, "Assessed measurements");

    Assessment {
        weight,
        height,
        bmi,
        category,
        ideal_range: ideal_weight_range(height),
        suggestion,
    }
}
