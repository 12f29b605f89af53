//! In-memory host fake shared by the integration tests.
//!
//! `TestChain` owns a toy ledger: fungible balances, native balances, pairs
//! with a simplified pair curve (volatile: fee-less constant product,
//! stable: constant sum capped by the output reserve), the emission token,
//! escrow locks, and reward notification records. It implements both host
//! capability traits so one fixture drives router and minter tests alike.

#![allow(dead_code)]

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use ethers::types::{Address, U256};
use strata_dex_core::pair_locator;
use strata_dex_core::quote;
use strata_dex_core::{CurveKind, DexHost, EmissionHost, PermitSignature, RouterSettings};

pub fn addr(byte: u8) -> Address {
    Address::from_slice(&[byte; 20])
}

pub struct TestPair {
    pub token0: Address,
    pub token1: Address,
    pub curve: CurveKind,
    pub reserve0: U256,
    pub reserve1: U256,
    pub total_supply: U256,
}

pub struct TestChain {
    pub router_settings: RouterSettings,
    balances: HashMap<(Address, Address), U256>,
    native: HashMap<Address, U256>,
    pairs: HashMap<Address, TestPair>,
    index: HashMap<(Address, Address, bool), Address>,
    transfer_fee_bps: HashMap<Address, u64>,
    // emission side
    pub emission_token: Address,
    pub minter: Address,
    emission_total: U256,
    locked: U256,
    pub locks: Vec<(Address, U256, u64)>,
    pub notified: Vec<(Address, U256)>,
}

impl TestChain {
    pub fn new(router_settings: RouterSettings) -> Self {
        Self {
            router_settings,
            balances: HashMap::new(),
            native: HashMap::new(),
            pairs: HashMap::new(),
            index: HashMap::new(),
            transfer_fee_bps: HashMap::new(),
            emission_token: addr(0xE0),
            minter: addr(0xE1),
            emission_total: U256::zero(),
            locked: U256::zero(),
            locks: Vec::new(),
            notified: Vec::new(),
        }
    }

    pub fn credit(&mut self, token: Address, owner: Address, amount: U256) {
        let entry = self.balances.entry((token, owner)).or_insert_with(U256::zero);
        *entry += amount;
    }

    pub fn credit_native(&mut self, owner: Address, amount: U256) {
        let entry = self.native.entry(owner).or_insert_with(U256::zero);
        *entry += amount;
    }

    pub fn native_balance(&self, owner: Address) -> U256 {
        self.native.get(&owner).copied().unwrap_or_default()
    }

    /// Inherent accessor; disambiguates between the two trait `balance_of`s.
    pub fn token_balance(&self, token: Address, owner: Address) -> U256 {
        self.balances.get(&(token, owner)).copied().unwrap_or_default()
    }

    pub fn emission_balance(&self, owner: Address) -> U256 {
        self.token_balance(self.emission_token, owner)
    }

    /// Charge a flat bps fee on every transfer of `token` (fee-on-transfer
    /// token simulation; the fee portion is burned).
    pub fn set_transfer_fee(&mut self, token: Address, bps: u64) {
        self.transfer_fee_bps.insert(token, bps);
    }

    pub fn set_locked(&mut self, locked: U256) {
        self.locked = locked;
    }

    pub fn pair_state(&self, pair: Address) -> &TestPair {
        self.pairs.get(&pair).expect("pair exists")
    }

    fn sorted_key(token_a: Address, token_b: Address, curve: CurveKind) -> (Address, Address, bool) {
        let (t0, t1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        (t0, t1, curve.is_stable())
    }

    fn move_token(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        let from_balance = self.balances.get(&(token, from)).copied().unwrap_or_default();
        if from_balance < amount {
            bail!("transfer failed: insufficient balance of {token:?} at {from:?}");
        }
        self.balances.insert((token, from), from_balance - amount);
        let fee = self.transfer_fee_bps.get(&token).copied().unwrap_or(0);
        let received = amount - amount * U256::from(fee) / U256::from(10_000u64);
        self.credit(token, to, received);
        Ok(())
    }

    /// Create a pair and seed it with initial reserves, minting the first
    /// liquidity to `seeder`.
    pub fn seed_pair(
        &mut self,
        seeder: Address,
        token_a: Address,
        token_b: Address,
        curve: CurveKind,
        amount_a: U256,
        amount_b: U256,
    ) -> Address {
        let pair = self.create_pair(token_a, token_b, curve).expect("create pair");
        self.credit(token_a, pair, amount_a);
        self.credit(token_b, pair, amount_b);
        self.pair_mint(pair, seeder).expect("seed mint");
        pair
    }
}

impl DexHost for TestChain {
    fn is_pair(&self, pair: Address) -> bool {
        self.pairs.contains_key(&pair)
    }

    fn get_pair(&self, token_a: Address, token_b: Address, curve: CurveKind) -> Option<Address> {
        self.index.get(&Self::sorted_key(token_a, token_b, curve)).copied()
    }

    fn create_pair(&mut self, token_a: Address, token_b: Address, curve: CurveKind) -> Result<Address> {
        let key = Self::sorted_key(token_a, token_b, curve);
        if self.index.contains_key(&key) {
            bail!("pair exists");
        }
        let pair = pair_locator::pair_for(&self.router_settings, token_a, token_b, curve)
            .map_err(|e| anyhow!("pair derivation failed: {e}"))?;
        self.pairs.insert(
            pair,
            TestPair {
                token0: key.0,
                token1: key.1,
                curve,
                reserve0: U256::zero(),
                reserve1: U256::zero(),
                total_supply: U256::zero(),
            },
        );
        self.index.insert(key, pair);
        Ok(pair)
    }

    fn pair_reserves(&self, pair: Address) -> Result<(U256, U256, u64)> {
        let state = self.pairs.get(&pair).ok_or_else(|| anyhow!("unknown pair"))?;
        Ok((state.reserve0, state.reserve1, 0))
    }

    fn pair_amount_out(&self, pair: Address, amount_in: U256, token_in: Address) -> Result<U256> {
        let state = self.pairs.get(&pair).ok_or_else(|| anyhow!("unknown pair"))?;
        let (reserve_in, reserve_out) = if token_in == state.token0 {
            (state.reserve0, state.reserve1)
        } else {
            (state.reserve1, state.reserve0)
        };
        let out = match state.curve {
            CurveKind::Stable => std::cmp::min(amount_in, reserve_out),
            CurveKind::Volatile => {
                let denom = reserve_in + amount_in;
                if denom.is_zero() {
                    U256::zero()
                } else {
                    amount_in * reserve_out / denom
                }
            }
        };
        Ok(out)
    }

    fn pair_total_supply(&self, pair: Address) -> Result<U256> {
        let state = self.pairs.get(&pair).ok_or_else(|| anyhow!("unknown pair"))?;
        Ok(state.total_supply)
    }

    fn pair_mint(&mut self, pair: Address, to: Address) -> Result<U256> {
        let state = self.pairs.get(&pair).ok_or_else(|| anyhow!("unknown pair"))?;
        let balance0 = self.balances.get(&(state.token0, pair)).copied().unwrap_or_default();
        let balance1 = self.balances.get(&(state.token1, pair)).copied().unwrap_or_default();
        let amount0 = balance0 - state.reserve0;
        let amount1 = balance1 - state.reserve1;
        let minimum = U256::from(quote::MINIMUM_LIQUIDITY);
        let (liquidity, supply_delta) = if state.total_supply.is_zero() {
            let liquidity = quote::sqrt(amount0 * amount1)
                .checked_sub(minimum)
                .ok_or_else(|| anyhow!("insufficient initial liquidity"))?;
            // the minimum stays locked in the pair forever
            (liquidity, liquidity + minimum)
        } else {
            let liquidity = std::cmp::min(
                amount0 * state.total_supply / state.reserve0,
                amount1 * state.total_supply / state.reserve1,
            );
            (liquidity, liquidity)
        };
        let state = self.pairs.get_mut(&pair).expect("pair exists");
        state.total_supply += supply_delta;
        state.reserve0 = balance0;
        state.reserve1 = balance1;
        self.credit(pair, to, liquidity);
        Ok(liquidity)
    }

    fn pair_burn(&mut self, pair: Address, to: Address) -> Result<(U256, U256)> {
        let (token0, token1, liquidity, amount0, amount1) = {
            let state = self.pairs.get(&pair).ok_or_else(|| anyhow!("unknown pair"))?;
            let liquidity = self.balances.get(&(pair, pair)).copied().unwrap_or_default();
            if liquidity.is_zero() || state.total_supply.is_zero() {
                bail!("no liquidity to burn");
            }
            let amount0 = liquidity * state.reserve0 / state.total_supply;
            let amount1 = liquidity * state.reserve1 / state.total_supply;
            (state.token0, state.token1, liquidity, amount0, amount1)
        };
        self.balances.insert((pair, pair), U256::zero());
        self.move_token(token0, pair, to, amount0)?;
        self.move_token(token1, pair, to, amount1)?;
        let balance0 = self.balances.get(&(token0, pair)).copied().unwrap_or_default();
        let balance1 = self.balances.get(&(token1, pair)).copied().unwrap_or_default();
        let state = self.pairs.get_mut(&pair).expect("pair exists");
        state.total_supply -= liquidity;
        state.reserve0 = balance0;
        state.reserve1 = balance1;
        Ok((amount0, amount1))
    }

    fn pair_swap(&mut self, pair: Address, amount0_out: U256, amount1_out: U256, to: Address) -> Result<()> {
        let (token0, token1) = {
            let state = self.pairs.get(&pair).ok_or_else(|| anyhow!("unknown pair"))?;
            if amount0_out > state.reserve0 || amount1_out > state.reserve1 {
                bail!("insufficient pair liquidity");
            }
            (state.token0, state.token1)
        };
        if !amount0_out.is_zero() {
            self.move_token(token0, pair, to, amount0_out)?;
        }
        if !amount1_out.is_zero() {
            self.move_token(token1, pair, to, amount1_out)?;
        }
        // sync booked reserves with actual balances (absorbs the paid-in input)
        let balance0 = self.balances.get(&(token0, pair)).copied().unwrap_or_default();
        let balance1 = self.balances.get(&(token1, pair)).copied().unwrap_or_default();
        let state = self.pairs.get_mut(&pair).expect("pair exists");
        state.reserve0 = balance0;
        state.reserve1 = balance1;
        Ok(())
    }

    fn pair_permit(
        &mut self,
        _pair: Address,
        _owner: Address,
        _spender: Address,
        _value: U256,
        _deadline: u64,
        sig: &PermitSignature,
    ) -> Result<()> {
        // v == 0 stands in for a signature that fails verification
        if sig.v == 0 {
            bail!("permit: invalid signature");
        }
        Ok(())
    }

    fn balance_of(&self, token: Address, owner: Address) -> U256 {
        self.balances.get(&(token, owner)).copied().unwrap_or_default()
    }

    fn transfer_from(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        self.move_token(token, from, to, amount)
    }

    fn wrap_native(&mut self, owner: Address, amount: U256) -> Result<()> {
        let balance = self.native_balance(owner);
        if balance < amount {
            bail!("wrap: insufficient native balance");
        }
        self.native.insert(owner, balance - amount);
        self.credit(self.router_settings.wrapped_native, owner, amount);
        Ok(())
    }

    fn unwrap_native(&mut self, owner: Address, amount: U256) -> Result<()> {
        let wrapped = self.router_settings.wrapped_native;
        let balance = self.balances.get(&(wrapped, owner)).copied().unwrap_or_default();
        if balance < amount {
            bail!("unwrap: insufficient wrapped balance");
        }
        self.balances.insert((wrapped, owner), balance - amount);
        self.credit_native(owner, amount);
        Ok(())
    }

    fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        let balance = self.native_balance(from);
        if balance < amount {
            bail!("native transfer failed");
        }
        self.native.insert(from, balance - amount);
        self.credit_native(to, amount);
        Ok(())
    }
}

impl EmissionHost for TestChain {
    fn total_supply(&self) -> U256 {
        self.emission_total
    }

    fn locked_supply(&self) -> U256 {
        self.locked
    }

    fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&(self.emission_token, owner)).copied().unwrap_or_default()
    }

    fn mint(&mut self, to: Address, amount: U256) -> Result<()> {
        self.emission_total += amount;
        self.credit(self.emission_token, to, amount);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        self.move_token(self.emission_token, from, to, amount)
    }

    fn create_lock_for(&mut self, amount: U256, lock_duration: u64, to: Address) -> Result<u64> {
        self.move_token(self.emission_token, self.minter, Address::zero(), amount)?;
        self.locked += amount;
        self.locks.push((to, amount, lock_duration));
        Ok(self.locks.len() as u64)
    }

    fn notify_reward(&mut self, from: Address, distributor: Address, amount: U256) -> Result<()> {
        self.move_token(self.emission_token, from, distributor, amount)?;
        self.notified.push((distributor, amount));
        Ok(())
    }
}
