//! NutriSmart MCP Server Implementation
//!
//! Implements the MCP server with all NutriSmart tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::provider::NutritionProvider;
use crate::tools::status::StatusTracker;
use crate::tools::{bmi, goals, meals, today, TrackerError};

/// NutriSmart MCP Service
#[derive(Clone)]
pub struct NutriSmartService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    nutrition: NutritionProvider,
    tool_router: ToolRouter<NutriSmartService>,
}

impl NutriSmartService {
    pub fn new(database_path: PathBuf, database: Database, nutrition: NutritionProvider) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            nutrition,
            tool_router: Self::tool_router(),
        }
    }
}

/// Map engine errors onto MCP transport errors. Invalid input and a missing
/// goal are caller mistakes; provider and storage failures are internal.
fn to_mcp_error(err: TrackerError) -> McpError {
    match err {
        TrackerError::InvalidInput(_) | TrackerError::NoActiveGoal | TrackerError::EmptyResult => {
            McpError::invalid_params(err.to_string(), None)
        }
        TrackerError::ProviderUnavailable(_) | TrackerError::Db(_) => {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeMealParams {
    /// Free-text meal description (e.g., "2 boiled eggs and toast with butter")
    pub description: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DaySummaryParams {
    /// Day to summarize, YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCalorieGoalParams {
    /// Daily calorie target in kcal, must be positive
    pub target: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GoalProgressParams {
    /// Day to compute progress for, YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBmiParams {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutriSmartService {
    // --- Status ---

    #[tool(description = "Get the current status of the NutriSmart service including build info, database status, and process information")]
    async fn nutrismart_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(self.nutrition.has_api_key());
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for analyzing meals, tracking calorie goals, and calculating BMI. Call this when starting a session or when unsure how to use the tools.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Meals ---

    #[tool(description = "Analyze a free-text meal description: resolve it to per-ingredient nutrition data, aggregate totals, and log the meal. Returns a warning (and logs nothing) when no ingredients match.")]
    async fn analyze_meal(&self, Parameters(p): Parameters<AnalyzeMealParams>) -> Result<CallToolResult, McpError> {
        match meals::analyze_meal(&self.database, &self.nutrition, &p.description).await {
            Ok(result) => {
                let json = serde_json::to_string_pretty(&result)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            // Zero matched ingredients is a user outcome, not a protocol error
            Err(TrackerError::EmptyResult) => {
                let warning = serde_json::json!({
                    "warning": "No nutrition data found. Try a more detailed description.",
                    "items_matched": 0,
                    "logged": false,
                });
                let json = serde_json::to_string_pretty(&warning)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    #[tool(description = "Get the full meal history in chronological order, oldest first")]
    fn get_meal_history(&self) -> Result<CallToolResult, McpError> {
        let result = meals::meal_history(&self.database).map_err(to_mcp_error)?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get one day's meals and aggregated nutrition totals (defaults to today)")]
    fn get_day_summary(&self, Parameters(p): Parameters<DaySummaryParams>) -> Result<CallToolResult, McpError> {
        let date = p.date.unwrap_or_else(today);
        let result = meals::day_summary(&self.database, &date).map_err(to_mcp_error)?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Export the full meal history as CSV text")]
    fn export_meal_history_csv(&self) -> Result<CallToolResult, McpError> {
        let csv = meals::export_history_csv(&self.database).map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(csv)]))
    }

    #[tool(description = "Delete the entire meal history. This cannot be undone; there is no per-entry delete.")]
    fn clear_meal_history(&self) -> Result<CallToolResult, McpError> {
        let result = meals::clear_history(&self.database).map_err(to_mcp_error)?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Calorie Goal ---

    #[tool(description = "Set the daily calorie goal in kcal. Replaces any existing goal.")]
    fn set_calorie_goal(&self, Parameters(p): Parameters<SetCalorieGoalParams>) -> Result<CallToolResult, McpError> {
        let result = goals::set_goal(&self.database, p.target).map_err(to_mcp_error)?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the active daily calorie goal, if one has been set")]
    fn get_calorie_goal(&self) -> Result<CallToolResult, McpError> {
        let result = goals::get_goal(&self.database).map_err(to_mcp_error)?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get calorie consumption progress against the active goal for one day (defaults to today). The ratio is uncapped; above 1.0 means the goal was exceeded. Errors when no goal is set.")]
    fn get_goal_progress(&self, Parameters(p): Parameters<GoalProgressParams>) -> Result<CallToolResult, McpError> {
        let date = p.date.unwrap_or_else(today);
        let result = goals::progress_for_day(&self.database, &date).map_err(to_mcp_error)?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- BMI ---

    #[tool(description = "Calculate BMI from weight (kg) and height (cm) and classify it (Underweight / Normal weight / Overweight / Obese)")]
    fn calculate_bmi(&self, Parameters(p): Parameters<CalculateBmiParams>) -> Result<CallToolResult, McpError> {
        let result = bmi::calculate_bmi(p.weight_kg, p.height_cm).map_err(to_mcp_error)?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutriSmartService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrismart".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("NutriSmart".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "NutriSmart - meal analysis, calorie goal tracking, and BMI. \
                 IMPORTANT: Call usage_instructions when starting a session. \
                 Meals: analyze_meal (free-text description, logs an entry), \
                 get_meal_history, get_day_summary, export_meal_history_csv, clear_meal_history. \
                 Goals: set_calorie_goal/get_calorie_goal/get_goal_progress (progress needs a goal set first). \
                 BMI: calculate_bmi with weight_kg and height_cm. \
                 clear_meal_history is irreversible; confirm with the user before calling it."
                    .into(),
            ),
        }
    }
}
