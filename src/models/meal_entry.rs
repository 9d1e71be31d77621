//! Meal Entry model
//!
//! One analyzed meal with its aggregated nutrition totals. Entries are
//! append-only: they are never updated, and the only deletion path is
//! clearing the whole history.

use chrono::Local;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::Nutrition;

/// Timestamp format used for meal log rows (local wall-clock time)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A logged meal with aggregated nutrition totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: i64,
    /// Verbatim user input describing the meal
    pub description: String,
    pub nutrition: Nutrition,
    /// Local time, "YYYY-MM-DD HH:MM:SS"
    pub created_at: String,
}

/// Data for creating a meal entry
#[derive(Debug, Clone)]
pub struct MealEntryCreate {
    pub description: String,
    pub nutrition: Nutrition,
    /// Timestamp override; defaults to the current local time
    pub logged_at: Option<String>,
}

impl MealEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            description: row.get("description")?,
            nutrition: Nutrition {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Append a new meal entry to the log
    pub fn create(conn: &Connection, data: &MealEntryCreate) -> DbResult<Self> {
        let created_at = data
            .logged_at
            .clone()
            .unwrap_or_else(|| Local::now().format(TIMESTAMP_FORMAT).to_string());

        conn.execute(
            r#"
            INSERT INTO meal_logs (description, calories, protein, carbs, fat, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                data.description,
                data.nutrition.calories,
                data.nutrition.protein,
                data.nutrition.carbs,
                data.nutrition.fat,
                created_at,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a meal entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meal_logs WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Full chronological view, oldest first
    pub fn list_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meal_logs ORDER BY id")?;

        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Entries whose calendar date (local time) equals `date` ("YYYY-MM-DD"),
    /// ignoring time-of-day
    pub fn list_for_day(conn: &Connection, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM meal_logs WHERE date(created_at) = ?1 ORDER BY id")?;

        let entries = stmt
            .query_map([date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Discard the entire history. Returns the number of removed entries.
    pub fn clear(conn: &Connection) -> DbResult<usize> {
        let rows = conn.execute("DELETE FROM meal_logs", [])?;
        Ok(rows)
    }
}

/// Total nutrition consumed on a day, summed over that day's entries
pub fn day_nutrition_total(conn: &Connection, date: &str) -> DbResult<Nutrition> {
    let entries = MealEntry::list_for_day(conn, date)?;

    let total: Nutrition = entries
        .iter()
        .map(|e| e.nutrition.clone())
        .sum();

    Ok(total)
}
