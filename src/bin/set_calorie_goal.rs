//! Utility to set the daily calorie goal directly in the database

use std::path::{Path, PathBuf};

/// Same resolution as the server: env override, else the project-root data dir
fn database_path() -> PathBuf {
    if let Ok(path) = std::env::var("NUTRISMART_DATABASE_PATH") {
        return PathBuf::from(path);
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    // target/release or target/debug -> project root
    let root = if exe_dir.ends_with("release") || exe_dir.ends_with("debug") {
        exe_dir
            .parent()
            .and_then(|target| target.parent())
            .map(Path::to_path_buf)
            .unwrap_or(exe_dir)
    } else {
        exe_dir
    };

    root.join("data").join("nutrismart.db")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let target: f64 = match std::env::args().nth(1).map(|a| a.parse()) {
        Some(Ok(t)) => t,
        _ => {
            eprintln!("Usage: set_calorie_goal <target_kcal>");
            std::process::exit(1);
        }
    };

    let db_path = database_path();
    println!("Database path: {}", db_path.display());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = nutrismart::db::Database::new(&db_path)?;
    database.with_conn(nutrismart::db::migrations::run_migrations)?;

    let goal = nutrismart::tools::goals::set_goal(&database, target)?;
    println!("Calorie goal set:");
    println!("  Target: {} kcal/day", goal.target);
    println!("  Updated: {}", goal.updated_at);

    Ok(())
}
