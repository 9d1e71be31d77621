//! Shared nutrition data structure
//!
//! Used across ingredient records, meal entries, and day totals.

use serde::{Deserialize, Serialize};

/// Nutritional information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,      // grams
    pub carbs: f64,        // grams
    pub fat: f64,          // grams
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_field_wise() {
        let a = Nutrition { calories: 100.0, protein: 5.0, carbs: 0.0, fat: 1.0 };
        let b = Nutrition { calories: 200.0, protein: 0.0, carbs: 20.0, fat: 10.0 };
        let sum = a + b;
        assert_eq!(sum.calories, 300.0);
        assert_eq!(sum.protein, 5.0);
        assert_eq!(sum.carbs, 20.0);
        assert_eq!(sum.fat, 11.0);
    }

    #[test]
    fn test_sum_over_empty_iterator_is_zero() {
        let total: Nutrition = std::iter::empty::<Nutrition>().sum();
        assert_eq!(total, Nutrition::zero());
    }
}
