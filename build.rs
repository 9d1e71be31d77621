//! Embeds a monotonically increasing build number and the compile timestamp
//! so the status tool can report exactly which build is running.

use std::fs;

const COUNTER_FILE: &str = "build_number.txt";

fn main() {
    // Rebuild metadata only when sources change
    println!("cargo:rerun-if-changed=src");

    let previous: u64 = fs::read_to_string(COUNTER_FILE)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build_number = previous + 1;
    fs::write(COUNTER_FILE, build_number.to_string())
        .expect("failed to update build_number.txt");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=NUTRISMART_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=NUTRISMART_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:warning=NutriSmart build #{} ({})", build_number, timestamp);
}
