//! # Host Capability Traits
//!
//! The core never owns ledger state. Pools, token balances, the pair
//! registry, the voting escrow, and the reward distributors live in the host
//! execution environment and are reached through the capability traits below.
//!
//! All methods are synchronous: the host executes one external call at a time
//! and guarantees all-or-nothing semantics per call, so the core needs no
//! locking beyond the `&mut` exclusivity of the capability itself.
//! Collaborator failures surface as `anyhow::Error` and propagate verbatim.

use anyhow::Result;
use ethers::types::{Address, U256};

use crate::types::{CurveKind, PermitSignature};

/// Capability surface the router core requires from the host: the pair
/// registry, per-pair operations addressed by pool address, fungible-token
/// movement, and the native-asset wrapping boundary.
pub trait DexHost {
    // Pair registry
    fn is_pair(&self, pair: Address) -> bool;
    fn get_pair(&self, token_a: Address, token_b: Address, curve: CurveKind) -> Option<Address>;
    fn create_pair(
        &mut self,
        token_a: Address,
        token_b: Address,
        curve: CurveKind,
    ) -> Result<Address>;

    // Pair operations
    fn pair_reserves(&self, pair: Address) -> Result<(U256, U256, u64)>;
    /// Curve-specific swap output. The formula is owned by the pair; the core
    /// only selects which pair to ask.
    fn pair_amount_out(&self, pair: Address, amount_in: U256, token_in: Address) -> Result<U256>;
    fn pair_total_supply(&self, pair: Address) -> Result<U256>;
    fn pair_mint(&mut self, pair: Address, to: Address) -> Result<U256>;
    fn pair_burn(&mut self, pair: Address, to: Address) -> Result<(U256, U256)>;
    fn pair_swap(
        &mut self,
        pair: Address,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
    ) -> Result<()>;
    fn pair_permit(
        &mut self,
        pair: Address,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: u64,
        sig: &PermitSignature,
    ) -> Result<()>;

    // Fungible tokens (a pair address doubles as its liquidity-share token).
    // Authorization of `from` is the host's concern; a rejected movement
    // comes back as an error.
    fn balance_of(&self, token: Address, owner: Address) -> U256;
    fn transfer_from(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()>;

    // Native-asset wrapping boundary. The core only moves the wrapped form
    // internally; these convert at the edges.
    fn wrap_native(&mut self, owner: Address, amount: U256) -> Result<()>;
    fn unwrap_native(&mut self, owner: Address, amount: U256) -> Result<()>;
    fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> Result<()>;
}

/// Capability surface the emission scheduler requires from the host: the
/// emission token's supply and mint authority, the voting escrow, and the
/// downstream reward distributors.
pub trait EmissionHost {
    /// Total supply of the emission token.
    fn total_supply(&self) -> U256;
    /// Supply held by the voting escrow (locked).
    fn locked_supply(&self) -> U256;
    fn balance_of(&self, owner: Address) -> U256;
    fn mint(&mut self, to: Address, amount: U256) -> Result<()>;
    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<()>;
    /// Create a time-locked escrow position for `to`, funded from the
    /// minter's balance. Returns the lock id.
    fn create_lock_for(&mut self, amount: U256, lock_duration: u64, to: Address) -> Result<u64>;
    /// Move `amount` of the emission token from `from` to `distributor` and
    /// notify it of the new reward.
    fn notify_reward(&mut self, from: Address, distributor: Address, amount: U256) -> Result<()>;
}
