//! BMI computation and classification.
//!
//! Both functions are pure and stateless: the engine never retains anything
//! between calls. Classification walks an ordered table of upper bounds
//! instead of cascading comparisons, so the band edges live in one place.

use crate::{BmiCategory, Error, Result};

/// Ordered classification table: the first band whose upper bound exceeds
/// the value wins. Bounds are exclusive at the top, so 18.5 is Normal and
/// 25.0 is Overweight. Values at or above the last bound are Obese.
const CATEGORY_BANDS: &[(f64, BmiCategory)] = &[
    (18.5, BmiCategory::Underweight),
    (25.0, BmiCategory::Normal),
    (30.0, BmiCategory::Overweight),
];

/// Compute a BMI value from weight in kilograms and height in centimeters
///
/// Returns the BMI rounded to two decimal places, ties to the even digit.
/// Zero, negative, and non-finite inputs are rejected: a BMI computed from
/// them would be meaningless (or a division by zero), and no record should
/// ever hold one.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(Error::InvalidInput(format!(
            "weight must be a positive number of kilograms, got {}",
            weight_kg
        )));
    }
    if !(height_cm.is_finite() && height_cm > 0.0) {
        return Err(Error::InvalidInput(format!(
            "height must be a positive number of centimeters, got {}",
            height_cm
        )));
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Ok(round_to_two_decimals(bmi))
}

/// Classify a BMI value into one of the four bands
///
/// Bands are half-open: inclusive of their lower bound, exclusive of their
/// upper bound.
pub fn classify(bmi: f64) -> BmiCategory {
    for (upper_bound, category) in CATEGORY_BANDS {
        if bmi < *upper_bound {
            return *category;
        }
    }
    BmiCategory::Obese
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
