//! # Emission Scheduler
//!
//! `Minter` is a period-gated state machine. Any caller may trigger
//! [`Minter::update_period`]; the state only advances once per week. An
//! advance computes the next weekly emission as the larger of a decaying
//! target and a circulating-supply tail floor, mints the shortfall against
//! the minter's balance, and distributes the treasury, incentive-pair, and
//! voter shares.
//!
//! Scheduler-owned state mutates only after every host interaction of an
//! advance has succeeded, so a failed advance leaves the scheduler exactly as
//! it was; the host guarantees its own side is all-or-nothing per call.

use ethers::types::{Address, U256};
use tracing::{debug, info};

use crate::errors::MinterError;
use crate::governance::TeamGovernance;
use crate::host::EmissionHost;
use crate::settings::MinterSettings;
use crate::types::CallEnv;

/// Period length gating emission advances.
pub const WEEK: u64 = 7 * 86400;
/// Denominator for emission, team, and incentive rates.
pub const PRECISION: u64 = 1000;
/// Tail emission numerator: circulating supply * 2 / 1000 per week.
pub const TAIL_EMISSION: u64 = 2;
/// Decay numerator for the first emission phase.
pub const DECAY_NUMERATOR: u64 = 995;
/// Decay numerator after the shift epoch. Larger numerator, slower decay.
pub const TAIL_NUMERATOR: u64 = 999;
/// Epoch count at which the numerator shifts, once and irreversibly.
pub const NUMERATOR_SHIFT_EPOCH: u64 = 104;
/// Upper bound on the configurable team rate (over [`PRECISION`]).
pub const MAX_TEAM_RATE: u64 = 50;
/// Lock duration used for bootstrap escrow positions: 4 years.
pub const MAX_LOCK_DURATION: u64 = 4 * 365 * 86400;

pub struct Minter {
    settings: MinterSettings,
    governance: TeamGovernance,
    weekly: U256,
    active_period: u64,
    epoch: u64,
    emission_numerator: u64,
    team_rate: u64,
    treasury: Address,
    voter: Address,
    incentive_gauge: Address,
    /// Bootstrap sentinel: emission is gated until the initializer has run
    /// [`Minter::initialize`] and cleared it.
    initializer: Option<Address>,
}

impl Minter {
    pub fn new(settings: MinterSettings, team: Address, initializer: Address, now: u64) -> Self {
        let active_period = now / WEEK * WEEK;
        Self {
            weekly: settings.initial_weekly,
            team_rate: settings.team_rate,
            treasury: settings.treasury,
            voter: settings.voter,
            incentive_gauge: settings.incentive_gauge,
            settings,
            governance: TeamGovernance::new(team),
            active_period,
            epoch: 0,
            emission_numerator: DECAY_NUMERATOR,
            initializer: Some(initializer),
        }
    }

    pub fn weekly(&self) -> U256 {
        self.weekly
    }

    pub fn active_period(&self) -> u64 {
        self.active_period
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn emission_numerator(&self) -> u64 {
        self.emission_numerator
    }

    pub fn team_rate(&self) -> u64 {
        self.team_rate
    }

    pub fn team(&self) -> Address {
        self.governance.team()
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn is_initialized(&self) -> bool {
        self.initializer.is_none()
    }

    /// Bootstrap: mint the initial allocation to the minter, create
    /// max-duration escrow locks for the claimants, and clear the sentinel.
    /// Callable exactly once, by the initializer only.
    pub fn initialize(
        &mut self,
        host: &mut impl EmissionHost,
        env: &CallEnv,
        claimants: &[(Address, U256)],
        initial_mint: U256,
    ) -> Result<(), MinterError> {
        match self.initializer {
            Some(initializer) if initializer == env.caller => {}
            Some(_) => return Err(MinterError::NotInitializer),
            None => return Err(MinterError::AlreadyInitialized),
        }
        host.mint(self.settings.minter, initial_mint)?;
        for (claimant, amount) in claimants {
            host.create_lock_for(*amount, MAX_LOCK_DURATION, *claimant)?;
        }
        self.initializer = None;
        info!(claimants = claimants.len(), %initial_mint, "minter initialized");
        Ok(())
    }

    /// Advance the emission period if a full week has elapsed since the last
    /// boundary. Early triggers (and triggers before initialization) are
    /// no-ops returning the unchanged period.
    pub fn update_period(
        &mut self,
        host: &mut impl EmissionHost,
        env: &CallEnv,
    ) -> Result<u64, MinterError> {
        let period = self.active_period;
        if self.initializer.is_some() || env.timestamp < period + WEEK {
            debug!(period, now = env.timestamp, "period unchanged");
            return Ok(period);
        }

        // one-way numerator shift, checked at the start of each advance
        let numerator = if self.epoch >= NUMERATOR_SHIFT_EPOCH {
            TAIL_NUMERATOR
        } else {
            self.emission_numerator
        };

        let new_period = env.timestamp / WEEK * WEEK;
        let decaying = mul_rate(self.weekly, numerator)?;
        let circulating = host.total_supply().saturating_sub(host.locked_supply());
        let tail = mul_rate(circulating, TAIL_EMISSION)?;
        let weekly_next = std::cmp::max(decaying, tail);

        let team_share = mul_rate(weekly_next, self.team_rate)?;
        let pair_share = mul_rate(weekly_next, self.settings.incentive_rate)?;
        let required = weekly_next
            .checked_add(team_share)
            .and_then(|sum| sum.checked_add(pair_share))
            .ok_or(MinterError::ArithmeticOverflow)?;

        let balance = host.balance_of(self.settings.minter);
        if required > balance {
            host.mint(self.settings.minter, required - balance)?;
        }
        host.transfer(self.settings.minter, self.treasury, team_share)?;
        host.notify_reward(self.settings.minter, self.incentive_gauge, pair_share)?;
        host.notify_reward(self.settings.minter, self.voter, weekly_next)?;

        self.weekly = weekly_next;
        self.active_period = new_period;
        self.emission_numerator = numerator;
        self.epoch += 1;
        info!(
            epoch = self.epoch,
            period = new_period,
            weekly = %weekly_next,
            %team_share,
            %pair_share,
            "emission period advanced"
        );
        Ok(new_period)
    }

    // Configuration mutators, all gated through the team capability.

    pub fn set_team(&mut self, env: &CallEnv, candidate: Address) -> Result<(), MinterError> {
        self.governance.propose(env.caller, candidate)
    }

    pub fn accept_team(&mut self, env: &CallEnv) -> Result<(), MinterError> {
        self.governance.accept(env.caller)
    }

    pub fn set_team_rate(&mut self, env: &CallEnv, rate: u64) -> Result<(), MinterError> {
        self.governance.require_team(env.caller)?;
        if rate > MAX_TEAM_RATE {
            return Err(MinterError::RateTooHigh);
        }
        self.team_rate = rate;
        Ok(())
    }

    pub fn set_treasury(&mut self, env: &CallEnv, treasury: Address) -> Result<(), MinterError> {
        self.governance.require_team(env.caller)?;
        self.treasury = treasury;
        Ok(())
    }

    pub fn set_reward_targets(
        &mut self,
        env: &CallEnv,
        voter: Address,
        incentive_gauge: Address,
    ) -> Result<(), MinterError> {
        self.governance.require_team(env.caller)?;
        self.voter = voter;
        self.incentive_gauge = incentive_gauge;
        Ok(())
    }
}

fn mul_rate(amount: U256, numerator: u64) -> Result<U256, MinterError> {
    amount
        .checked_mul(U256::from(numerator))
        .map(|product| product / U256::from(PRECISION))
        .ok_or(MinterError::ArithmeticOverflow)
}
