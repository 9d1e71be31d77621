//! BMI tool
//!
//! Validates user-supplied weight/height and classifies the result.

use serde::Serialize;

use crate::models::{classify, BmiCategory};

use super::{TrackerError, TrackerResult};

/// Response for calculate_bmi
#[derive(Debug, Serialize)]
pub struct BmiResponse {
    /// Unrounded BMI value; rounding is up to the presentation layer
    pub bmi: f64,
    pub category: String,
    pub advice: &'static str,
}

/// Advice line shown alongside the category
fn advice_for(category: BmiCategory) -> &'static str {
    match category {
        BmiCategory::Underweight => {
            "You are underweight. Consider consulting a dietitian to ensure balanced nutrition."
        }
        BmiCategory::Normal => "You have a normal weight. Keep maintaining a healthy lifestyle!",
        BmiCategory::Overweight => "You are overweight. Regular exercise and portion control can help.",
        BmiCategory::Obese => {
            "You are obese. A healthcare provider can guide you toward healthy weight loss."
        }
    }
}

/// Validate inputs and classify. Weight is in kilograms, height in
/// centimeters; both must be positive.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> TrackerResult<BmiResponse> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(TrackerError::InvalidInput(
            "weight must be a positive number of kilograms".to_string(),
        ));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(TrackerError::InvalidInput(
            "height must be a positive number of centimeters".to_string(),
        ));
    }

    let result = classify(weight_kg, height_cm);
    Ok(BmiResponse {
        bmi: result.value,
        category: result.category.display_name().to_string(),
        advice: advice_for(result.category),
    })
}
