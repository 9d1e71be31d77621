//! NutriSmart
//!
//! An MCP server for meal analysis, calorie goal tracking, and BMI.

use std::path::{Path, PathBuf};

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

mod build_info;
mod db;
mod mcp;
mod models;
mod provider;
mod tools;

use mcp::NutriSmartService;
use provider::NutritionProvider;

/// Database location: `NUTRISMART_DATABASE_PATH`, or `data/nutrismart.db`
/// under the project root when running out of a cargo target directory.
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so MCP stdio framing stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrismart=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = database_path();
    eprintln!("Database path: {}", db_path.display());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    // A missing API key is reported at lookup time, so every tool except
    // analyze_meal keeps working without one.
    let nutrition = NutritionProvider::from_env();
    if !nutrition.has_api_key() {
        tracing::warn!("CALORIE_NINJAS_API_KEY is not set; analyze_meal will fail until it is");
    }

    let service = NutriSmartService::new(db_path, database, nutrition);

    eprintln!("Starting MCP server on stdio...");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
