//! BMI classification
//!
//! Pure computation of body-mass-index and its health category.

use serde::{Deserialize, Serialize};

/// BMI health category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// A computed BMI value with its category
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BmiResult {
    /// weight_kg / height_m^2, unrounded
    pub value: f64,
    pub category: BmiCategory,
}

/// Classify a weight/height pair into a BMI value and health category.
///
/// Bands are half-open: each cutoff (18.5, 25.0, 30.0) belongs to the band
/// above it, so 25.0 is Overweight and 30.0 is Obese.
///
/// Callers must reject non-positive or non-finite inputs before calling;
/// this function assumes its preconditions hold.
pub fn classify(weight_kg: f64, height_cm: f64) -> BmiResult {
    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);

    let category = if value < 18.5 {
        BmiCategory::Underweight
    } else if value < 25.0 {
        BmiCategory::Normal
    } else if value < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };

    BmiResult { value, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underweight() {
        let result = classify(53.0, 170.0);
        assert!((result.value - 18.34).abs() < 0.01);
        assert_eq!(result.category, BmiCategory::Underweight);
    }

    #[test]
    fn test_normal() {
        let result = classify(60.0, 170.0);
        assert!((result.value - 20.76).abs() < 0.01);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_overweight() {
        let result = classify(75.0, 170.0);
        assert!((result.value - 25.95).abs() < 0.01);
        assert_eq!(result.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_obese() {
        let result = classify(90.0, 170.0);
        assert!((result.value - 31.14).abs() < 0.01);
        assert_eq!(result.category, BmiCategory::Obese);
    }

    #[test]
    fn test_cutoffs_belong_to_upper_band() {
        // 18.5 exactly: 18.5 kg/m^2 at 1 m height
        assert_eq!(classify(18.5, 100.0).category, BmiCategory::Normal);
        // 25.0 exactly
        assert_eq!(classify(25.0, 100.0).category, BmiCategory::Overweight);
        // 30.0 exactly
        assert_eq!(classify(30.0, 100.0).category, BmiCategory::Obese);
    }

    #[test]
    fn test_just_below_cutoffs() {
        assert_eq!(classify(18.49, 100.0).category, BmiCategory::Underweight);
        assert_eq!(classify(24.99, 100.0).category, BmiCategory::Normal);
        assert_eq!(classify(29.99, 100.0).category, BmiCategory::Overweight);
    }

    #[test]
    fn test_same_inputs_same_result() {
        let a = classify(72.5, 181.0);
        let b = classify(72.5, 181.0);
        assert_eq!(a.value, b.value);
        assert_eq!(a.category, b.category);
    }
}
