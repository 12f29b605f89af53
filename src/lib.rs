//! # Strata DEX Core
//!
//! Core engine for a Solidly-style constant-function-market-maker DEX. The
//! crate owns the two algorithmically interesting pieces of the protocol and
//! reaches everything else through injected host capabilities:
//!
//! - **Routing**: deterministic pair address derivation, stable/volatile
//!   quote selection, multi-hop amount resolution, and swap / liquidity
//!   execution with slippage, deadline, and fee-on-transfer correctness.
//! - **Emissions**: a week-gated minter state machine computing a
//!   decaying-then-floored weekly emission, minting the exact shortfall, and
//!   splitting it across the treasury, an incentive pair gauge, and the
//!   voting reward distributor.
//!
//! ## Architecture
//!
//! The host execution environment (chain runtime, simulator, or test fake)
//! owns all ledger state — pools, balances, escrow locks — and is reached
//! through the [`host`] capability traits. Every public operation is
//! synchronous and atomic per call; the crate keeps no hidden state and does
//! no caching across calls.

// Core Types
/// Route/curve data model and per-call host context
pub mod types;
/// Error taxonomies for router and minter
pub mod errors;
/// Host capability traits the core calls into
pub mod host;

// Routing Engine
/// Deterministic pair address derivation (no host access)
pub mod pair_locator;
/// Liquidity-provision quoting math
pub mod quote;
/// Multi-hop amount resolution and curve selection
pub mod path;
/// Swap and liquidity execution orchestration
pub mod executor;

// Emission Engine
/// Week-gated emission scheduler
pub mod minter;
/// Two-step team role handshake
pub mod governance;

// Settings & Configuration
/// Configuration management
pub mod settings;

// Re-exports for convenience
pub use errors::{MinterError, RouterError};
pub use executor::Router;
pub use governance::TeamGovernance;
pub use host::{DexHost, EmissionHost};
pub use minter::Minter;
pub use settings::{MinterSettings, RouterSettings, Settings};
pub use types::{CallEnv, CurveKind, PermitSignature, Route};
