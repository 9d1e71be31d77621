//! Calorie goal tools
//!
//! Holds the active daily calorie target and computes consumption progress
//! against it, for a single meal or a whole day.

use serde::Serialize;

use crate::db::Database;
use crate::models::{day_nutrition_total, CalorieGoal};

use super::{parse_day, TrackerError, TrackerResult};

/// Progress against the active goal.
///
/// The ratio is deliberately not clamped: values above 1.0 mean the goal
/// was exceeded, and callers doing display capping do it themselves.
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub target: f64,
    pub consumed: f64,
    pub ratio: f64,
    pub percent: f64,
}

/// Response for set_calorie_goal
#[derive(Debug, Serialize)]
pub struct SetGoalResponse {
    pub target: f64,
    pub updated_at: String,
}

/// Response for get_calorie_goal
#[derive(Debug, Serialize)]
pub struct GoalStatusResponse {
    /// Active target in kcal/day; absent when no goal has been set
    pub target: Option<f64>,
}

/// Response for get_goal_progress
#[derive(Debug, Serialize)]
pub struct DayProgressResponse {
    pub date: String,
    #[serde(flatten)]
    pub progress: GoalProgress,
}

/// Compute progress of `consumed` kcal against a goal
pub(crate) fn progress_against(goal: &CalorieGoal, consumed: f64) -> GoalProgress {
    let ratio = consumed / goal.target;
    GoalProgress {
        target: goal.target,
        consumed,
        ratio,
        percent: ratio * 100.0,
    }
}

/// Set or replace the daily calorie goal
pub fn set_goal(db: &Database, target: f64) -> TrackerResult<SetGoalResponse> {
    if !target.is_finite() || target <= 0.0 {
        return Err(TrackerError::InvalidInput(
            "calorie goal target must be a positive number of kcal".to_string(),
        ));
    }

    let conn = db.get_conn()?;
    let goal = CalorieGoal::set(&conn, target)?;
    tracing::info!(target = goal.target, "calorie goal set");

    Ok(SetGoalResponse {
        target: goal.target,
        updated_at: goal.updated_at,
    })
}

/// Report the active goal, if any
pub fn get_goal(db: &Database) -> TrackerResult<GoalStatusResponse> {
    let conn = db.get_conn()?;
    let target = CalorieGoal::get(&conn)?.map(|g| g.target);
    Ok(GoalStatusResponse { target })
}

/// Progress of an explicit calorie amount against the active goal
pub fn progress(db: &Database, consumed: f64) -> TrackerResult<GoalProgress> {
    if !consumed.is_finite() || consumed < 0.0 {
        return Err(TrackerError::InvalidInput(
            "consumed calories must be a non-negative number".to_string(),
        ));
    }

    let conn = db.get_conn()?;
    let goal = CalorieGoal::get(&conn)?.ok_or(TrackerError::NoActiveGoal)?;
    Ok(progress_against(&goal, consumed))
}

/// Progress of one calendar day's total consumption against the active goal
pub fn progress_for_day(db: &Database, date: &str) -> TrackerResult<DayProgressResponse> {
    let date = parse_day(date)?.format("%Y-%m-%d").to_string();

    let conn = db.get_conn()?;
    let goal = CalorieGoal::get(&conn)?.ok_or(TrackerError::NoActiveGoal)?;
    let consumed = day_nutrition_total(&conn, &date)?.calories;

    Ok(DayProgressResponse {
        date,
        progress: progress_against(&goal, consumed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::models::{MealEntry, MealEntryCreate, Nutrition};

    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        db
    }

    fn log_meal(db: &Database, calories: f64, logged_at: &str) {
        db.with_conn(|conn| {
            MealEntry::create(
                conn,
                &MealEntryCreate {
                    description: "test meal".to_string(),
                    nutrition: Nutrition { calories, ..Nutrition::zero() },
                    logged_at: Some(logged_at.to_string()),
                },
            )
            .map(|_| ())
        })
        .unwrap();
    }

    #[test]
    fn test_progress_requires_an_active_goal() {
        let db = test_db("goals_no_goal");
        assert!(matches!(progress(&db, 500.0), Err(TrackerError::NoActiveGoal)));
        assert!(matches!(
            progress_for_day(&db, "2025-03-02"),
            Err(TrackerError::NoActiveGoal)
        ));
    }

    #[test]
    fn test_progress_ratio_is_uncapped() {
        let db = test_db("goals_overshoot");
        set_goal(&db, 2000.0).unwrap();

        let p = progress(&db, 2500.0).unwrap();
        assert_eq!(p.ratio, 1.25);
        assert_eq!(p.percent, 125.0);
        assert_eq!(p.target, 2000.0);
    }

    #[test]
    fn test_set_goal_is_idempotent_and_replaces() {
        let db = test_db("goals_replace");

        set_goal(&db, 2000.0).unwrap();
        let first = progress(&db, 1000.0).unwrap();
        set_goal(&db, 2000.0).unwrap();
        let second = progress(&db, 1000.0).unwrap();
        assert_eq!(first.ratio, second.ratio);

        // a new value replaces, never averages
        set_goal(&db, 1000.0).unwrap();
        let replaced = progress(&db, 1000.0).unwrap();
        assert_eq!(replaced.ratio, 1.0);
    }

    #[test]
    fn test_set_goal_rejects_non_positive_targets() {
        let db = test_db("goals_invalid");
        assert!(matches!(set_goal(&db, 0.0), Err(TrackerError::InvalidInput(_))));
        assert!(matches!(set_goal(&db, -100.0), Err(TrackerError::InvalidInput(_))));
        assert!(matches!(set_goal(&db, f64::NAN), Err(TrackerError::InvalidInput(_))));
    }

    #[test]
    fn test_progress_rejects_invalid_consumed() {
        let db = test_db("goals_invalid_consumed");
        set_goal(&db, 2000.0).unwrap();
        assert!(matches!(progress(&db, -1.0), Err(TrackerError::InvalidInput(_))));
        assert!(matches!(progress(&db, f64::INFINITY), Err(TrackerError::InvalidInput(_))));
    }

    #[test]
    fn test_progress_for_day_sums_only_that_day() {
        let db = test_db("goals_day_progress");
        set_goal(&db, 2000.0).unwrap();

        log_meal(&db, 300.0, "2025-03-02 08:00:00");
        log_meal(&db, 700.0, "2025-03-02 19:30:00");
        log_meal(&db, 999.0, "2025-03-03 12:00:00");

        let p = progress_for_day(&db, "2025-03-02").unwrap();
        assert_eq!(p.progress.consumed, 1000.0);
        assert_eq!(p.progress.ratio, 0.5);
        assert_eq!(p.date, "2025-03-02");
    }
}
