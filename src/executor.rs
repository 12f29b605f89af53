//! # Swap Executor / Liquidity Orchestrator
//!
//! `Router` drives fund movement over the host capability: add/remove
//! liquidity (plain, native, permit variants) and multi-hop swaps (fixed
//! amounts, fee-on-transfer-safe, and native at either edge). It keeps no
//! state across calls; everything it needs per call arrives in `CallEnv` and
//! the host reference.
//!
//! Swap chaining never takes custody mid-path: each pair pays its output
//! directly into the next pair, or to the final recipient on the last hop.

use ethers::types::{Address, U256};
use tracing::{debug, info};

use crate::errors::RouterError;
use crate::host::DexHost;
use crate::pair_locator::{pair_for, sort_tokens};
use crate::path;
use crate::quote;
use crate::settings::RouterSettings;
use crate::types::{CallEnv, CurveKind, PermitSignature, Route};

pub struct Router {
    settings: RouterSettings,
}

impl Router {
    pub fn new(settings: RouterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    fn ensure_deadline(env: &CallEnv, deadline: u64) -> Result<(), RouterError> {
        if env.timestamp > deadline {
            return Err(RouterError::Expired);
        }
        Ok(())
    }

    /// Resolve the actual amounts an add-liquidity call will consume,
    /// creating the pair lazily when it does not exist yet.
    fn resolve_liquidity_amounts(
        &self,
        host: &mut impl DexHost,
        token_a: Address,
        token_b: Address,
        curve: CurveKind,
        desired_a: U256,
        desired_b: U256,
        min_a: U256,
        min_b: U256,
    ) -> Result<(U256, U256), RouterError> {
        if desired_a < min_a || desired_b < min_b {
            return Err(RouterError::BelowDesiredMinimum);
        }
        if host.get_pair(token_a, token_b, curve).is_none() {
            let pair = host.create_pair(token_a, token_b, curve)?;
            info!(?pair, %curve, "created pair");
        }
        let (reserve_a, reserve_b) =
            quote::get_reserves(host, &self.settings, token_a, token_b, curve)?;
        if reserve_a.is_zero() && reserve_b.is_zero() {
            return Ok((desired_a, desired_b));
        }
        let b_optimal = quote::quote_liquidity_ratio(desired_a, reserve_a, reserve_b)?;
        if b_optimal <= desired_b {
            if b_optimal < min_b {
                return Err(RouterError::InsufficientBAmount);
            }
            Ok((desired_a, b_optimal))
        } else {
            let a_optimal = quote::quote_liquidity_ratio(desired_b, reserve_b, reserve_a)?;
            // a_optimal <= desired_a is implied by the ratio math
            if a_optimal < min_a {
                return Err(RouterError::InsufficientAAmount);
            }
            Ok((a_optimal, desired_b))
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        token_a: Address,
        token_b: Address,
        curve: CurveKind,
        desired_a: U256,
        desired_b: U256,
        min_a: U256,
        min_b: U256,
        to: Address,
        deadline: u64,
    ) -> Result<(U256, U256, U256), RouterError> {
        Self::ensure_deadline(env, deadline)?;
        let (amount_a, amount_b) = self.resolve_liquidity_amounts(
            host, token_a, token_b, curve, desired_a, desired_b, min_a, min_b,
        )?;
        let pair = pair_for(&self.settings, token_a, token_b, curve)?;
        host.transfer_from(token_a, env.caller, pair, amount_a)?;
        host.transfer_from(token_b, env.caller, pair, amount_b)?;
        let liquidity = host.pair_mint(pair, to)?;
        debug!(?pair, %amount_a, %amount_b, %liquidity, "liquidity added");
        Ok((amount_a, amount_b, liquidity))
    }

    /// Native-asset add-liquidity: `env.value` is the desired native amount.
    /// The native leg is wrapped before deposit and any dust above what the
    /// pool consumed is refunded to the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity_native(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        token: Address,
        curve: CurveKind,
        desired_token: U256,
        min_token: U256,
        min_native: U256,
        to: Address,
        deadline: u64,
    ) -> Result<(U256, U256, U256), RouterError> {
        Self::ensure_deadline(env, deadline)?;
        let wrapped = self.settings.wrapped_native;
        let (amount_token, amount_native) = self.resolve_liquidity_amounts(
            host,
            token,
            wrapped,
            curve,
            desired_token,
            env.value,
            min_token,
            min_native,
        )?;
        let pair = pair_for(&self.settings, token, wrapped, curve)?;
        host.transfer_from(token, env.caller, pair, amount_token)?;
        host.wrap_native(self.settings.router, amount_native)?;
        host.transfer_from(wrapped, self.settings.router, pair, amount_native)?;
        let liquidity = host.pair_mint(pair, to)?;
        if env.value > amount_native {
            host.transfer_native(self.settings.router, env.caller, env.value - amount_native)?;
        }
        debug!(?pair, %amount_token, %amount_native, %liquidity, "native liquidity added");
        Ok((amount_token, amount_native, liquidity))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        token_a: Address,
        token_b: Address,
        curve: CurveKind,
        liquidity: U256,
        min_a: U256,
        min_b: U256,
        to: Address,
        deadline: u64,
    ) -> Result<(U256, U256), RouterError> {
        Self::ensure_deadline(env, deadline)?;
        let pair = pair_for(&self.settings, token_a, token_b, curve)?;
        // the pair address doubles as its share-token address
        host.transfer_from(pair, env.caller, pair, liquidity)?;
        let (amount0, amount1) = host.pair_burn(pair, to)?;
        let (token0, _) = sort_tokens(token_a, token_b)?;
        let (amount_a, amount_b) = if token_a == token0 {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };
        if amount_a < min_a {
            return Err(RouterError::InsufficientAAmount);
        }
        if amount_b < min_b {
            return Err(RouterError::InsufficientBAmount);
        }
        debug!(?pair, %amount_a, %amount_b, "liquidity removed");
        Ok((amount_a, amount_b))
    }

    /// Permit-authorized removal: runs the share-token permit against the
    /// pair, then the exact removal logic above (which also carries the
    /// deadline guard). A failed permit aborts before anything moves.
    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity_with_permit(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        token_a: Address,
        token_b: Address,
        curve: CurveKind,
        liquidity: U256,
        min_a: U256,
        min_b: U256,
        to: Address,
        deadline: u64,
        approve_max: bool,
        sig: &PermitSignature,
    ) -> Result<(U256, U256), RouterError> {
        let pair = pair_for(&self.settings, token_a, token_b, curve)?;
        let value = if approve_max { U256::MAX } else { liquidity };
        host.pair_permit(pair, env.caller, self.settings.router, value, deadline, sig)?;
        self.remove_liquidity(
            host, env, token_a, token_b, curve, liquidity, min_a, min_b, to, deadline,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn swap_exact_tokens_for_tokens(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        amount_in: U256,
        amount_out_min: U256,
        routes: &[Route],
        to: Address,
        deadline: u64,
    ) -> Result<Vec<U256>, RouterError> {
        Self::ensure_deadline(env, deadline)?;
        let amounts = path::amounts_out(host, &self.settings, amount_in, routes)?;
        let final_out = amounts[amounts.len() - 1];
        if final_out < amount_out_min {
            return Err(RouterError::InsufficientOutputAmount);
        }
        let first_pair = pair_for(&self.settings, routes[0].from, routes[0].to, routes[0].curve)?;
        host.transfer_from(routes[0].from, env.caller, first_pair, amounts[0])?;
        self.execute_swaps(host, &amounts, routes, to)?;
        info!(hops = routes.len(), %amount_in, %final_out, "swap executed");
        Ok(amounts)
    }

    /// Native-in swap: the attached value is wrapped and paid into the first
    /// pair. The path must start at the wrapped-native token.
    pub fn swap_exact_native_for_tokens(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        amount_out_min: U256,
        routes: &[Route],
        to: Address,
        deadline: u64,
    ) -> Result<Vec<U256>, RouterError> {
        Self::ensure_deadline(env, deadline)?;
        if routes.is_empty() || routes[0].from != self.settings.wrapped_native {
            return Err(RouterError::InvalidPath);
        }
        let amounts = path::amounts_out(host, &self.settings, env.value, routes)?;
        let final_out = amounts[amounts.len() - 1];
        if final_out < amount_out_min {
            return Err(RouterError::InsufficientOutputAmount);
        }
        let first_pair = pair_for(&self.settings, routes[0].from, routes[0].to, routes[0].curve)?;
        host.wrap_native(self.settings.router, amounts[0])?;
        host.transfer_from(
            self.settings.wrapped_native,
            self.settings.router,
            first_pair,
            amounts[0],
        )?;
        self.execute_swaps(host, &amounts, routes, to)?;
        info!(hops = routes.len(), amount_in = %env.value, %final_out, "native-in swap executed");
        Ok(amounts)
    }

    /// Native-out swap: the last hop pays the router, which unwraps and
    /// forwards native to the recipient. The path must end at the
    /// wrapped-native token.
    #[allow(clippy::too_many_arguments)]
    pub fn swap_exact_tokens_for_native(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        amount_in: U256,
        amount_out_min: U256,
        routes: &[Route],
        to: Address,
        deadline: u64,
    ) -> Result<Vec<U256>, RouterError> {
        Self::ensure_deadline(env, deadline)?;
        if routes.is_empty() || routes[routes.len() - 1].to != self.settings.wrapped_native {
            return Err(RouterError::InvalidPath);
        }
        let amounts = path::amounts_out(host, &self.settings, amount_in, routes)?;
        let final_out = amounts[amounts.len() - 1];
        if final_out < amount_out_min {
            return Err(RouterError::InsufficientOutputAmount);
        }
        let first_pair = pair_for(&self.settings, routes[0].from, routes[0].to, routes[0].curve)?;
        host.transfer_from(routes[0].from, env.caller, first_pair, amounts[0])?;
        self.execute_swaps(host, &amounts, routes, self.settings.router)?;
        host.unwrap_native(self.settings.router, final_out)?;
        host.transfer_native(self.settings.router, to, final_out)?;
        info!(hops = routes.len(), %amount_in, %final_out, "native-out swap executed");
        Ok(amounts)
    }

    /// Fee-on-transfer-safe swap: per-hop input is measured as the pair's
    /// balance delta rather than trusted from a precomputed vector, and the
    /// final check compares the recipient's balance delta across the whole
    /// call. Returns the amount actually received.
    #[allow(clippy::too_many_arguments)]
    pub fn swap_exact_tokens_for_tokens_supporting_fees(
        &self,
        host: &mut impl DexHost,
        env: &CallEnv,
        amount_in: U256,
        amount_out_min: U256,
        routes: &[Route],
        to: Address,
        deadline: u64,
    ) -> Result<U256, RouterError> {
        Self::ensure_deadline(env, deadline)?;
        if routes.is_empty() {
            return Err(RouterError::InvalidPath);
        }
        let first_pair = pair_for(&self.settings, routes[0].from, routes[0].to, routes[0].curve)?;
        let out_token = routes[routes.len() - 1].to;
        let balance_before = host.balance_of(out_token, to);
        host.transfer_from(routes[0].from, env.caller, first_pair, amount_in)?;
        self.execute_swaps_supporting_fees(host, routes, to)?;
        let received = host
            .balance_of(out_token, to)
            .checked_sub(balance_before)
            .ok_or(RouterError::ArithmeticOverflow)?;
        if received < amount_out_min {
            return Err(RouterError::InsufficientOutputAmount);
        }
        info!(hops = routes.len(), %amount_in, %received, "fee-tolerant swap executed");
        Ok(received)
    }

    /// Hop-by-hop execution against precomputed amounts. Output slot
    /// selection follows canonical pair ordering; each hop's recipient is the
    /// next hop's pair, except the last, which pays `to`.
    fn execute_swaps(
        &self,
        host: &mut impl DexHost,
        amounts: &[U256],
        routes: &[Route],
        to: Address,
    ) -> Result<(), RouterError> {
        for (i, route) in routes.iter().enumerate() {
            let pair = pair_for(&self.settings, route.from, route.to, route.curve)?;
            let (token0, _) = sort_tokens(route.from, route.to)?;
            let amount_out = amounts[i + 1];
            let (amount0_out, amount1_out) = if route.from == token0 {
                (U256::zero(), amount_out)
            } else {
                (amount_out, U256::zero())
            };
            let recipient = if i < routes.len() - 1 {
                let next = &routes[i + 1];
                pair_for(&self.settings, next.from, next.to, next.curve)?
            } else {
                to
            };
            host.pair_swap(pair, amount0_out, amount1_out, recipient)?;
        }
        Ok(())
    }

    /// Balance-delta variant of hop execution: each hop re-derives its input
    /// from what the pair actually holds above its booked reserve, then asks
    /// the pair for the corresponding output.
    fn execute_swaps_supporting_fees(
        &self,
        host: &mut impl DexHost,
        routes: &[Route],
        to: Address,
    ) -> Result<(), RouterError> {
        for (i, route) in routes.iter().enumerate() {
            let pair = pair_for(&self.settings, route.from, route.to, route.curve)?;
            let (token0, _) = sort_tokens(route.from, route.to)?;
            let (reserve0, reserve1, _) = host.pair_reserves(pair)?;
            let reserve_in = if route.from == token0 { reserve0 } else { reserve1 };
            let amount_in = host
                .balance_of(route.from, pair)
                .checked_sub(reserve_in)
                .ok_or(RouterError::ArithmeticOverflow)?;
            let amount_out = host.pair_amount_out(pair, amount_in, route.from)?;
            let (amount0_out, amount1_out) = if route.from == token0 {
                (U256::zero(), amount_out)
            } else {
                (amount_out, U256::zero())
            };
            let recipient = if i < routes.len() - 1 {
                let next = &routes[i + 1];
                pair_for(&self.settings, next.from, next.to, next.curve)?
            } else {
                to
            };
            host.pair_swap(pair, amount0_out, amount1_out, recipient)?;
        }
        Ok(())
    }
}
