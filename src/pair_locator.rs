//! # Deterministic Pair Locator
//!
//! Derives the canonical pool address for a (tokenA, tokenB, curve) key
//! without touching the host: CREATE2-style content hashing over the sorted
//! pair plus the factory context and the fixed pair code fingerprint.
//!
//! The derivation is referentially transparent and is recomputed on every
//! use; pair *existence* is always a fresh registry question, never cached
//! alongside the address.

use ethers::types::Address;
use ethers::utils::{get_create2_address_from_hash, keccak256};

use crate::errors::RouterError;
use crate::settings::RouterSettings;
use crate::types::CurveKind;

/// Canonical ordering for a token pair.
///
/// Errors with `IdenticalAssets` when both sides are the same token and with
/// `ZeroAddress` when the low token is the null identifier.
pub fn sort_tokens(token_a: Address, token_b: Address) -> Result<(Address, Address), RouterError> {
    if token_a == token_b {
        return Err(RouterError::IdenticalAssets);
    }
    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    if token0 == Address::zero() {
        return Err(RouterError::ZeroAddress);
    }
    Ok((token0, token1))
}

/// Deterministic pool address for a pair under a given curve.
///
/// `salt = keccak256(token0 ‖ token1 ‖ stable_byte)`, address derived from
/// `(factory, salt, pair_code_hash)`. Order-independent in the input tokens.
pub fn pair_for(
    settings: &RouterSettings,
    token_a: Address,
    token_b: Address,
    curve: CurveKind,
) -> Result<Address, RouterError> {
    let (token0, token1) = sort_tokens(token_a, token_b)?;
    let mut preimage = [0u8; 41];
    preimage[..20].copy_from_slice(token0.as_bytes());
    preimage[20..40].copy_from_slice(token1.as_bytes());
    preimage[40] = curve.is_stable() as u8;
    let salt = keccak256(preimage);
    Ok(get_create2_address_from_hash(
        settings.factory,
        salt,
        settings.pair_code_hash.as_bytes(),
    ))
}
