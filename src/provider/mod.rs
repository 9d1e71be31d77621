//! Nutrition lookup provider
//!
//! CalorieNinjas API client and response normalization.

pub mod client;
pub mod types;

pub use client::{NutritionProvider, ProviderError};
pub use types::{IngredientRecord, NutritionResponse};
