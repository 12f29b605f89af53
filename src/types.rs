//! # Core Types
//!
//! Data model for routing and execution: curve selection, route segments,
//! and the per-call host context.

use ethers::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

/// Swap curve selector for a pair.
///
/// Every token pair can exist twice: once under the correlated-asset curve
/// (`Stable`) and once under the constant-product curve (`Volatile`). The
/// curve is part of the pair's identity and of its deterministic address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    Stable,
    #[default]
    Volatile,
}

impl CurveKind {
    pub fn is_stable(&self) -> bool {
        matches!(self, CurveKind::Stable)
    }
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveKind::Stable => write!(f, "stable"),
            CurveKind::Volatile => write!(f, "volatile"),
        }
    }
}

/// A single hop in a swap path.
///
/// A path is an ordered, non-empty slice of routes. Hop continuity
/// (`route[i].to == route[i + 1].from`) is the caller's responsibility and is
/// not validated here; a discontinuous path resolves against pairs that
/// typically do not exist and degrades to zero output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Input token of this hop
    pub from: Address,
    /// Output token of this hop
    pub to: Address,
    /// Which curve variant of the pair to trade through
    pub curve: CurveKind,
}

impl Route {
    pub fn new(from: Address, to: Address, curve: CurveKind) -> Self {
        Self { from, to, curve }
    }
}

/// Host call context for a single external entry.
///
/// Mirrors the execution environment the host provides per call: the message
/// sender, any attached native value (already credited to the router by the
/// host before the call body runs), and the observed timestamp used for
/// deadline and period checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEnv {
    pub caller: Address,
    pub value: U256,
    pub timestamp: u64,
}

impl CallEnv {
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self {
            caller,
            value: U256::zero(),
            timestamp,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// ECDSA signature material for a pair permit call.
///
/// The core never inspects the signature; it is handed verbatim to the pair
/// collaborator, which owns verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSignature {
    pub v: u8,
    pub r: H256,
    pub s: H256,
}
