//! Versioned schema migrations
//!
//! Applied versions are recorded in `schema_migrations`; `run_migrations`
//! brings any database, new or old, up to the current version.

use rusqlite::Connection;

use super::connection::DbResult;

/// Bring the database up to the latest schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    if get_schema_version(conn)? < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Highest applied migration version, 0 for a fresh database
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// v1: meal log + calorie goal
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- MEAL LOGS
        -- One row per analyzed meal, append-only.
        -- Insertion order (rowid) is chronological order.
        -- ============================================
        CREATE TABLE meal_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,           -- verbatim user input

            -- Aggregated totals over all matched ingredients
            calories REAL NOT NULL DEFAULT 0,
            protein REAL NOT NULL DEFAULT 0,     -- grams
            carbs REAL NOT NULL DEFAULT 0,       -- grams
            fat REAL NOT NULL DEFAULT 0,         -- grams

            -- Local wall-clock time, "YYYY-MM-DD HH:MM:SS"
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
        );

        CREATE INDEX idx_meal_logs_created_at ON meal_logs(created_at);

        -- ============================================
        -- CALORIE GOAL
        -- Single-row table holding the active daily target
        -- ============================================
        CREATE TABLE calorie_goal (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            target REAL NOT NULL,                -- kcal/day, > 0
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_migrations_are_idempotent() {
        let db = Database::new("file:migrations_idempotent?mode=memory&cache=shared").unwrap();
        let conn = db.get_conn().unwrap();

        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }
}
