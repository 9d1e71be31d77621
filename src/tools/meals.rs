//! Meal analysis and history tools
//!
//! Turns a free-text meal description into a logged entry with aggregated
//! nutrition totals, and exposes the history views built on it.

use serde::Serialize;

use crate::db::Database;
use crate::models::{CalorieGoal, MealEntry, MealEntryCreate, Nutrition};
use crate::provider::{IngredientRecord, NutritionProvider};

use super::goals::{progress_against, GoalProgress};
use super::{parse_day, TrackerError, TrackerResult};

/// Per-ingredient breakdown line in an analysis response
#[derive(Debug, Serialize)]
pub struct IngredientBreakdown {
    pub name: String,
    pub nutrition: Nutrition,
}

/// Response for analyze_meal
#[derive(Debug, Serialize)]
pub struct AnalyzeMealResponse {
    pub id: i64,
    pub description: String,
    pub logged_at: String,
    pub items: Vec<IngredientBreakdown>,
    pub total: Nutrition,
    /// This meal's progress against the active goal, when one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_progress: Option<GoalProgress>,
}

/// Meal summary for history listings
#[derive(Debug, Serialize)]
pub struct MealSummary {
    pub id: i64,
    pub logged_at: String,
    pub description: String,
    pub nutrition: Nutrition,
}

impl From<MealEntry> for MealSummary {
    fn from(entry: MealEntry) -> Self {
        Self {
            id: entry.id,
            logged_at: entry.created_at,
            description: entry.description,
            nutrition: entry.nutrition,
        }
    }
}

/// Response for get_meal_history
#[derive(Debug, Serialize)]
pub struct MealHistoryResponse {
    pub meals: Vec<MealSummary>,
    pub total: usize,
}

/// Response for get_day_summary
#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub date: String,
    pub meal_count: usize,
    pub meals: Vec<MealSummary>,
    pub nutrition_total: Nutrition,
}

/// Response for clear_meal_history
#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub removed: usize,
}

/// Analyze a meal description: look up ingredients, aggregate, and log.
pub async fn analyze_meal(
    db: &Database,
    provider: &NutritionProvider,
    description: &str,
) -> TrackerResult<AnalyzeMealResponse> {
    let description = description.trim();
    if description.is_empty() {
        return Err(TrackerError::InvalidInput(
            "meal description must not be empty".to_string(),
        ));
    }

    let items = provider.lookup(description).await?;
    record_meal(db, description, &items)
}

/// Aggregate already-fetched ingredient records into one logged meal entry.
///
/// An empty record list is the provider saying "nothing matched"; nothing
/// is appended and the caller decides how to warn the user.
pub fn record_meal(
    db: &Database,
    description: &str,
    items: &[IngredientRecord],
) -> TrackerResult<AnalyzeMealResponse> {
    if items.is_empty() {
        return Err(TrackerError::EmptyResult);
    }

    let total: Nutrition = items.iter().map(IngredientRecord::nutrition).sum();

    let conn = db.get_conn()?;
    let entry = MealEntry::create(
        &conn,
        &MealEntryCreate {
            description: description.to_string(),
            nutrition: total,
            logged_at: None,
        },
    )?;

    let goal_progress = CalorieGoal::get(&conn)?
        .map(|goal| progress_against(&goal, entry.nutrition.calories));

    tracing::info!(id = entry.id, calories = entry.nutrition.calories, "meal logged");

    Ok(AnalyzeMealResponse {
        id: entry.id,
        logged_at: entry.created_at,
        description: entry.description,
        items: items
            .iter()
            .map(|i| IngredientBreakdown {
                name: i.name.clone(),
                nutrition: i.nutrition(),
            })
            .collect(),
        total: entry.nutrition,
        goal_progress,
    })
}

/// Full meal history, oldest first
pub fn meal_history(db: &Database) -> TrackerResult<MealHistoryResponse> {
    let conn = db.get_conn()?;
    let meals: Vec<MealSummary> = MealEntry::list_all(&conn)?
        .into_iter()
        .map(MealSummary::from)
        .collect();

    let total = meals.len();
    Ok(MealHistoryResponse { meals, total })
}

/// Meals and nutrition totals for one calendar day (local time)
pub fn day_summary(db: &Database, date: &str) -> TrackerResult<DaySummaryResponse> {
    let date = parse_day(date)?.format("%Y-%m-%d").to_string();

    let conn = db.get_conn()?;
    let meals: Vec<MealSummary> = MealEntry::list_for_day(&conn, &date)?
        .into_iter()
        .map(MealSummary::from)
        .collect();

    let nutrition_total: Nutrition = meals.iter().map(|m| m.nutrition.clone()).sum();

    Ok(DaySummaryResponse {
        date,
        meal_count: meals.len(),
        meals,
        nutrition_total,
    })
}

/// Discard the entire meal history atomically
pub fn clear_history(db: &Database) -> TrackerResult<ClearHistoryResponse> {
    let conn = db.get_conn()?;
    let removed = MealEntry::clear(&conn)?;
    tracing::info!(removed, "meal history cleared");
    Ok(ClearHistoryResponse { removed })
}

/// Render the full meal history as CSV text
pub fn export_history_csv(db: &Database) -> TrackerResult<String> {
    let conn = db.get_conn()?;
    let entries = MealEntry::list_all(&conn)?;

    let mut csv = String::from("date,meal,calories,protein,fat,carbs\n");
    for entry in entries {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_field(&entry.created_at),
            csv_field(&entry.description),
            entry.nutrition.calories,
            entry.nutrition.protein,
            entry.nutrition.fat,
            entry.nutrition.carbs,
        ));
    }

    Ok(csv)
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use serde_json::json;

    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    fn records(value: serde_json::Value) -> Vec<IngredientRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_record_meal_sums_fields_independently() {
        let db = test_db("meals_totals");

        let items = records(json!([
            {"name": "egg", "calories": 100.0, "protein_g": 5.0},
            {"name": "toast", "calories": 200.0, "fat_total_g": 10.0, "carbohydrates_total_g": 20.0}
        ]));

        let response = record_meal(&db, "eggs and toast", &items).unwrap();
        assert_eq!(response.total.calories, 300.0);
        assert_eq!(response.total.protein, 5.0);
        assert_eq!(response.total.fat, 10.0);
        assert_eq!(response.total.carbs, 20.0);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.description, "eggs and toast");

        let history = meal_history(&db).unwrap();
        assert_eq!(history.total, 1);
        assert_eq!(history.meals[0].nutrition.calories, 300.0);
    }

    #[test]
    fn test_record_meal_empty_result_leaves_history_unchanged() {
        let db = test_db("meals_empty");

        let result = record_meal(&db, "gibberish nobody can parse", &[]);
        assert!(matches!(result, Err(TrackerError::EmptyResult)));

        assert_eq!(meal_history(&db).unwrap().total, 0);
    }

    #[test]
    fn test_record_meal_attaches_progress_when_goal_set() {
        let db = test_db("meals_goal_progress");
        db.with_conn(|conn| CalorieGoal::set(conn, 2000.0).map(|_| ())).unwrap();

        let items = records(json!([{"name": "burger", "calories": 500.0}]));
        let response = record_meal(&db, "a burger", &items).unwrap();

        let progress = response.goal_progress.unwrap();
        assert_eq!(progress.ratio, 0.25);

        // without a goal the field is simply absent
        let db = test_db("meals_no_goal_progress");
        let response = record_meal(&db, "a burger", &items).unwrap();
        assert!(response.goal_progress.is_none());
    }

    #[test]
    fn test_clear_history_removes_everything() {
        let db = test_db("meals_clear");

        let items = records(json!([{"name": "egg", "calories": 78.0}]));
        record_meal(&db, "one egg", &items).unwrap();
        record_meal(&db, "another egg", &items).unwrap();

        let cleared = clear_history(&db).unwrap();
        assert_eq!(cleared.removed, 2);
        assert_eq!(meal_history(&db).unwrap().total, 0);
    }

    #[test]
    fn test_day_summary_rejects_bad_date() {
        let db = test_db("meals_bad_date");
        assert!(matches!(
            day_summary(&db, "03/02/2025"),
            Err(TrackerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_export_csv_quotes_descriptions() {
        let db = test_db("meals_csv");

        let items = records(json!([{"name": "egg", "calories": 78.0}]));
        record_meal(&db, "eggs, toast and \"butter\"", &items).unwrap();

        let csv = export_history_csv(&db).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "date,meal,calories,protein,fat,carbs");
        let row = lines.next().unwrap();
        assert!(row.contains("\"eggs, toast and \"\"butter\"\"\""));
        assert!(row.ends_with(",78,0,0,0"));
    }
}
