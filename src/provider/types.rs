//! Provider response types
//!
//! The provider controls the response shape and does not guarantee which
//! keys are present, so every nutrient field deserializes leniently:
//! missing, non-numeric, non-finite, or negative values become 0.0. Absence
//! is data, not a fault — one malformed ingredient must not abort the meal.

use serde::{Deserialize, Deserializer};

use crate::models::Nutrition;

/// Top-level lookup response
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionResponse {
    #[serde(default)]
    pub items: Vec<IngredientRecord>,
}

/// One ingredient record as returned by the provider.
///
/// Field names match the provider's keys. The free API tier substitutes
/// strings for premium-only numeric fields; those normalize to 0.0 like any
/// other unusable value.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub protein_g: f64,
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub fat_total_g: f64,
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub carbohydrates_total_g: f64,
}

impl IngredientRecord {
    /// The normalized nutrient tuple for this ingredient
    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein_g,
            carbs: self.carbohydrates_total_g,
            fat: self.fat_total_g,
        }
    }
}

/// Accept any JSON value; yield it as a finite non-negative f64 or 0.0
fn lenient_non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let record: IngredientRecord =
            serde_json::from_value(json!({"name": "egg", "calories": 78.0})).unwrap();

        assert_eq!(record.calories, 78.0);
        assert_eq!(record.protein_g, 0.0);
        assert_eq!(record.fat_total_g, 0.0);
        assert_eq!(record.carbohydrates_total_g, 0.0);
    }

    #[test]
    fn test_non_numeric_fields_default_to_zero() {
        // the free API tier returns strings for premium-only fields
        let record: IngredientRecord = serde_json::from_value(json!({
            "name": "rice",
            "calories": "Only available for premium subscribers.",
            "carbohydrates_total_g": 44.1
        }))
        .unwrap();

        assert_eq!(record.calories, 0.0);
        assert_eq!(record.carbohydrates_total_g, 44.1);
    }

    #[test]
    fn test_negative_values_default_to_zero() {
        let record: IngredientRecord =
            serde_json::from_value(json!({"name": "bad", "fat_total_g": -3.0})).unwrap();

        assert_eq!(record.fat_total_g, 0.0);
    }

    #[test]
    fn test_empty_response_deserializes() {
        let response: NutritionResponse = serde_json::from_value(json!({"items": []})).unwrap();
        assert!(response.items.is_empty());

        let response: NutritionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_nutrition_maps_provider_keys() {
        let record: IngredientRecord = serde_json::from_value(json!({
            "name": "chicken breast",
            "calories": 165.0,
            "protein_g": 31.0,
            "fat_total_g": 3.6,
            "carbohydrates_total_g": 0.0
        }))
        .unwrap();

        let nutrition = record.nutrition();
        assert_eq!(nutrition.calories, 165.0);
        assert_eq!(nutrition.protein, 31.0);
        assert_eq!(nutrition.fat, 3.6);
        assert_eq!(nutrition.carbs, 0.0);
    }
}
