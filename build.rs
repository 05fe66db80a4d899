//! Build script for nutrikit
//!
//! Embeds the build timestamp; nothing is written outside cargo's own output.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Honour reproducible-build timestamps when the packager provides one
    let built_at = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(chrono::Utc::now);

    println!(
        "cargo:rustc-env=NUTRIKIT_BUILD_TIMESTAMP={}",
        built_at.format("%Y-%m-%dT%H:%M:%SZ")
    );
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}
