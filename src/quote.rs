//! # Quote Engine
//!
//! Liquidity-provision math over pair reserves: complementary-amount quoting,
//! add-liquidity estimation (including the bootstrap case), and pro-rata
//! remove-liquidity quoting. All arithmetic is checked U256; overflow is an
//! error, never a wrap.

use ethers::types::{Address, U256};

use crate::errors::RouterError;
use crate::host::DexHost;
use crate::pair_locator::{pair_for, sort_tokens};
use crate::settings::RouterSettings;
use crate::types::CurveKind;

/// Share amount permanently locked by the pair on its first mint. Quoting
/// subtracts it so estimates line up with what the pair actually credits.
pub const MINIMUM_LIQUIDITY: u64 = 1000;

/// Integer square root (Babylonian), floor semantics.
pub fn sqrt(y: U256) -> U256 {
    if y > U256::from(3u64) {
        let mut z = y;
        let mut x = y / 2 + 1;
        while x < z {
            z = x;
            x = (y / x + x) / 2;
        }
        z
    } else if y.is_zero() {
        U256::zero()
    } else {
        U256::one()
    }
}

fn mul_div(a: U256, b: U256, denom: U256) -> Result<U256, RouterError> {
    let product = a.checked_mul(b).ok_or(RouterError::ArithmeticOverflow)?;
    product
        .checked_div(denom)
        .ok_or(RouterError::ArithmeticOverflow)
}

/// Complementary amount preserving the pool ratio: `amount_a * reserve_b /
/// reserve_a`, floor division.
pub fn quote_liquidity_ratio(
    amount_a: U256,
    reserve_a: U256,
    reserve_b: U256,
) -> Result<U256, RouterError> {
    if amount_a.is_zero() {
        return Err(RouterError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(RouterError::InsufficientLiquidity);
    }
    mul_div(amount_a, reserve_b, reserve_a)
}

/// Pair reserves re-aligned to the caller's (token_a, token_b) order rather
/// than the pair's canonical order.
pub fn get_reserves(
    host: &impl DexHost,
    settings: &RouterSettings,
    token_a: Address,
    token_b: Address,
    curve: CurveKind,
) -> Result<(U256, U256), RouterError> {
    let (token0, _) = sort_tokens(token_a, token_b)?;
    let pair = pair_for(settings, token_a, token_b, curve)?;
    let (reserve0, reserve1, _) = host.pair_reserves(pair)?;
    if token_a == token0 {
        Ok((reserve0, reserve1))
    } else {
        Ok((reserve1, reserve0))
    }
}

/// Quote the amounts an add-liquidity call would consume and the share amount
/// it would mint.
///
/// With no reserves yet (bootstrap) the desired amounts are taken as-is and
/// the estimate is `sqrt(a * b) - MINIMUM_LIQUIDITY`. Otherwise the optimal
/// complementary amount is computed in both directions and the branch that
/// stays within the desired caps wins; the estimate is the smaller of the two
/// pro-rata shares against total supply.
pub fn quote_add_liquidity(
    host: &impl DexHost,
    settings: &RouterSettings,
    token_a: Address,
    token_b: Address,
    curve: CurveKind,
    desired_a: U256,
    desired_b: U256,
) -> Result<(U256, U256, U256), RouterError> {
    let mut reserve_a = U256::zero();
    let mut reserve_b = U256::zero();
    let mut total_supply = U256::zero();
    if let Some(pair) = host.get_pair(token_a, token_b, curve) {
        total_supply = host.pair_total_supply(pair)?;
        let (r_a, r_b) = get_reserves(host, settings, token_a, token_b, curve)?;
        reserve_a = r_a;
        reserve_b = r_b;
    }

    if reserve_a.is_zero() && reserve_b.is_zero() {
        let product = desired_a
            .checked_mul(desired_b)
            .ok_or(RouterError::ArithmeticOverflow)?;
        let liquidity = sqrt(product)
            .checked_sub(U256::from(MINIMUM_LIQUIDITY))
            .ok_or(RouterError::InsufficientLiquidity)?;
        return Ok((desired_a, desired_b, liquidity));
    }

    let b_optimal = quote_liquidity_ratio(desired_a, reserve_a, reserve_b)?;
    let (amount_a, amount_b) = if b_optimal <= desired_b {
        (desired_a, b_optimal)
    } else {
        let a_optimal = quote_liquidity_ratio(desired_b, reserve_b, reserve_a)?;
        (a_optimal, desired_b)
    };
    let liquidity = std::cmp::min(
        mul_div(amount_a, total_supply, reserve_a)?,
        mul_div(amount_b, total_supply, reserve_b)?,
    );
    Ok((amount_a, amount_b, liquidity))
}

/// Quote the amounts a remove-liquidity call would return, pro-rata against
/// current reserves and total supply.
///
/// A nonexistent pair is a degenerate case, not a failure: the quote is
/// `(0, 0)`.
pub fn quote_remove_liquidity(
    host: &impl DexHost,
    settings: &RouterSettings,
    token_a: Address,
    token_b: Address,
    curve: CurveKind,
    liquidity: U256,
) -> Result<(U256, U256), RouterError> {
    let pair = match host.get_pair(token_a, token_b, curve) {
        Some(pair) => pair,
        None => return Ok((U256::zero(), U256::zero())),
    };
    let total_supply = host.pair_total_supply(pair)?;
    if total_supply.is_zero() {
        return Ok((U256::zero(), U256::zero()));
    }
    let (reserve_a, reserve_b) = get_reserves(host, settings, token_a, token_b, curve)?;
    let amount_a = mul_div(liquidity, reserve_a, total_supply)?;
    let amount_b = mul_div(liquidity, reserve_b, total_supply)?;
    Ok((amount_a, amount_b))
}
