//! Swap Scenario Runner
//!
//! Drives the HTLC engine through end-to-end swap flows with a manual clock
//! and seeded secrets, and reports what happened as JSON.
//!
//! # Modules
//! - `secrets`: Seeded preimage generation
//! - `scenarios`: Cross-partition swap, expired refund, expiry race
//! - `export`: Scenario report JSON export

pub mod export;
pub mod scenarios;
pub mod secrets;

/// Crate version constant
pub const VERSION: &str = "1.0.0";

/// Start of simulated time (unix seconds)
pub const GENESIS_TIME: i64 = 1_700_000_000;
