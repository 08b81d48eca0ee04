//! Hashed Timelock Contracts for Native, Fungible and Non-Fungible Assets
//!
//! A sender escrows an asset for a receiver under a SHA-256 hashlock and an
//! absolute timelock. The receiver withdraws by revealing the preimage; after
//! expiry the sender rolls the swap back. Each swap settles exactly once.
//!
//! # Modules
//! - `errors`: Token, adapter, swap and config error types
//! - `events`: `SwapCreated` / `SwapWithdrawn` / `SwapRolledBack`
//! - `security`: Reentrancy guard and creation counter
//! - `hashing`: Hashlock verification and swap id derivation
//! - `tokens`: In-process native bank and token contracts
//! - `assets`: Per-kind custody adapters behind `AssetAdapter`
//! - `ledger`: Generic swap state machine, one per asset kind
//! - `engine`: The three partitions behind one call surface
//! - `config`: Engine configuration (rollback policy, lock bounds)
//! - `clock`: Injected time source

pub mod assets;
pub mod clock;
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod hashing;
pub mod ledger;
pub mod security;
pub mod tokens;

pub use engine::{Adapters, HtlcEngine, InMemorySubstrate};
pub use ledger::{NewSwap, SwapLedger};

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
