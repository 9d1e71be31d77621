//! Calorie goal model
//!
//! Stores the active daily calorie target (single-row table).

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// The active daily calorie goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieGoal {
    /// Target in kcal/day
    pub target: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl CalorieGoal {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            target: row.get("target")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the active goal, if one has been set
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM calorie_goal WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(goal) => Ok(Some(goal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or replace the goal (upsert). A new target overwrites the old one.
    pub fn set(conn: &Connection, target: f64) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO calorie_goal (id, target)
            VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET
                target = excluded.target,
                updated_at = datetime('now')
            "#,
            params![target],
        )?;

        Self::get(conn)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, Database};

    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_absent_until_first_set() {
        let db = test_db("goal_absent");
        let conn = db.get_conn().unwrap();

        assert!(CalorieGoal::get(&conn).unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_never_merges() {
        let db = test_db("goal_replace");
        let conn = db.get_conn().unwrap();

        CalorieGoal::set(&conn, 2000.0).unwrap();
        CalorieGoal::set(&conn, 1800.0).unwrap();

        let goal = CalorieGoal::get(&conn).unwrap().unwrap();
        assert_eq!(goal.target, 1800.0);
    }

    #[test]
    fn test_set_is_idempotent_for_same_target() {
        let db = test_db("goal_idempotent");
        let conn = db.get_conn().unwrap();

        CalorieGoal::set(&conn, 2000.0).unwrap();
        CalorieGoal::set(&conn, 2000.0).unwrap();

        let goal = CalorieGoal::get(&conn).unwrap().unwrap();
        assert_eq!(goal.target, 2000.0);
    }
}
