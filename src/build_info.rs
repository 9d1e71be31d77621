//! Compile-time build metadata
//!
//! build.rs embeds the build number and timestamp as environment variables;
//! this module exposes them alongside the Cargo package fields.

use serde::Serialize;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const BUILD_NUMBER_RAW: Option<&str> = option_env!("NUTRISMART_BUILD_NUMBER");
const BUILD_TIMESTAMP_RAW: Option<&str> = option_env!("NUTRISMART_BUILD_TIMESTAMP");

/// Build metadata reported by the status tool
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    /// Metadata for the running binary. Builds produced without build.rs
    /// (e.g. some IDE check configurations) report build 0 / "unknown".
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER_RAW.and_then(|s| s.parse().ok()).unwrap_or(0),
            build_timestamp: BUILD_TIMESTAMP_RAW.unwrap_or("unknown"),
            description: DESCRIPTION,
        }
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("=============================================");
    eprintln!("  NutriSmart v{} (build {})", info.version, info.build_number);
    eprintln!("  compiled {}", info.build_timestamp);
    eprintln!("=============================================");
}
