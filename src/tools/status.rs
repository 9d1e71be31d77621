//! NutriSmart Status Tool
//!
//! Provides runtime status information about the NutriSmart service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage guide for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# NutriSmart Usage Instructions

This guide explains how to analyze meals, track calorie goals, and calculate
BMI with the NutriSmart tools.

## Analyzing a Meal

**Tool:** `analyze_meal` with a plain-text `description`.

Tips for good lookups:
- Be specific ("100g grilled chicken" vs "chicken").
- Include portion sizes for accurate results.
- Separate items with commas or "and".

The response contains the per-ingredient breakdown, the aggregated totals,
and (when a calorie goal is set) this meal's progress against the goal.

If the response carries a `warning` instead of totals, the lookup matched no
ingredients. Nothing was logged; ask the user for a more detailed
description and try again.

## Meal History

| Task | Tool |
|------|------|
| Full history, oldest first | `get_meal_history` |
| One day's meals and totals | `get_day_summary` (date YYYY-MM-DD, defaults to today) |
| Download as CSV | `export_meal_history_csv` |
| Delete everything | `clear_meal_history` |

`clear_meal_history` discards the entire history at once and cannot be
undone; there is no per-entry delete. Confirm with the user first.

## Calorie Goal

1. `set_calorie_goal` with a positive `target` in kcal/day. A new target
   replaces the old one.
2. `get_calorie_goal` shows the active target, if any.
3. `get_goal_progress` (date defaults to today) reports consumed calories,
   the target, and the ratio between them. The ratio is not capped: 1.25
   means the user is 25% over goal.

Progress tools report an error when no goal has been set. That means
"prompt the user to set a goal", not that something is broken.

## BMI

**Tool:** `calculate_bmi` with `weight_kg` and `height_cm` (both positive).

Categories: below 18.5 Underweight, 18.5 to below 25 Normal weight, 25 to
below 30 Overweight, 30 and above Obese. The boundary values 25 and 30
belong to the higher category.

## Notes

- Dates use ISO format: YYYY-MM-DD, in the server's local time zone.
- Meal timestamps are assigned at logging time and never change.
- Analysis requires the CALORIE_NINJAS_API_KEY environment variable; check
  `nutrismart_status` if lookups fail.
"#;

/// Runtime status of the NutriSmart service
#[derive(Debug, Clone, Serialize)]
pub struct NutriSmartStatus {
    pub build: BuildInfo,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Whether a nutrition API key is configured
    pub nutrition_api_configured: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Collects runtime status for the status tool
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Snapshot the current status
    pub fn get_status(&self, nutrition_api_configured: bool) -> NutriSmartStatus {
        let pid = std::process::id();

        NutriSmartStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes: std::fs::metadata(&self.database_path).ok().map(|m| m.len()),
            nutrition_api_configured,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes: process_memory(pid),
        }
    }
}

/// Resident memory of this process, 0 when the probe fails
fn process_memory(pid: u32) -> u64 {
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));
    sys.process(Pid::from_u32(pid))
        .map(|p| p.memory())
        .unwrap_or(0)
}
