//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `playoff_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("playoff_core ping={}", playoff_core::ping());
    println!("playoff_core version={}", playoff_core::core_version());
}
