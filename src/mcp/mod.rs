//! MCP server module
//!
//! rmcp service wiring for the NutriSmart tools.

pub mod server;

pub use server::NutriSmartService;
