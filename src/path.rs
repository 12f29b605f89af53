//! # Path Resolver
//!
//! Chains per-hop pair quotes across an ordered route list, and answers the
//! single-hop "which curve pays more" question.

use ethers::types::{Address, U256};
use tracing::debug;

use crate::errors::RouterError;
use crate::host::DexHost;
use crate::pair_locator::pair_for;
use crate::settings::RouterSettings;
use crate::types::{CurveKind, Route};

/// Resolve the full amount vector for a path: `amounts[0]` is the input,
/// `amounts[i + 1]` the output of hop `i`.
///
/// A hop whose pair does not exist contributes 0, which then propagates
/// through the remaining hops; this is a degraded quote, not an abort.
pub fn amounts_out(
    host: &impl DexHost,
    settings: &RouterSettings,
    amount_in: U256,
    routes: &[Route],
) -> Result<Vec<U256>, RouterError> {
    if routes.is_empty() {
        return Err(RouterError::InvalidPath);
    }
    let mut amounts = Vec::with_capacity(routes.len() + 1);
    amounts.push(amount_in);
    let mut current = amount_in;
    for route in routes {
        let pair = pair_for(settings, route.from, route.to, route.curve)?;
        current = if host.is_pair(pair) {
            host.pair_amount_out(pair, current, route.from)?
        } else {
            debug!(
                from = ?route.from,
                to = ?route.to,
                curve = %route.curve,
                "pair does not exist, hop quotes to zero"
            );
            U256::zero()
        };
        amounts.push(current);
    }
    Ok(amounts)
}

/// Single-hop quote across both curve variants of a pair.
///
/// Evaluates the stable and the volatile pair (a missing pair quotes 0) and
/// returns the larger output together with the winning curve. The comparison
/// is strict, so ties go to the volatile curve.
pub fn best_amount_out(
    host: &impl DexHost,
    settings: &RouterSettings,
    amount_in: U256,
    token_in: Address,
    token_out: Address,
) -> Result<(U256, CurveKind), RouterError> {
    let stable_out = curve_amount_out(host, amount_in, token_in, token_out, CurveKind::Stable)?;
    let volatile_out = curve_amount_out(host, amount_in, token_in, token_out, CurveKind::Volatile)?;
    if stable_out > volatile_out {
        Ok((stable_out, CurveKind::Stable))
    } else {
        Ok((volatile_out, CurveKind::Volatile))
    }
}

fn curve_amount_out(
    host: &impl DexHost,
    amount_in: U256,
    token_in: Address,
    token_out: Address,
    curve: CurveKind,
) -> Result<U256, RouterError> {
    match host.get_pair(token_in, token_out, curve) {
        Some(pair) => Ok(host.pair_amount_out(pair, amount_in, token_in)?),
        None => Ok(U256::zero()),
    }
}
