//! Team access-control capability: a two-step propose/accept handshake over
//! the privileged role, injected into the scheduler's configuration mutators.

use ethers::types::Address;

use crate::errors::MinterError;

#[derive(Debug, Clone)]
pub struct TeamGovernance {
    team: Address,
    pending: Option<Address>,
}

impl TeamGovernance {
    pub fn new(team: Address) -> Self {
        Self { team, pending: None }
    }

    pub fn team(&self) -> Address {
        self.team
    }

    pub fn pending(&self) -> Option<Address> {
        self.pending
    }

    pub fn require_team(&self, caller: Address) -> Result<(), MinterError> {
        if caller != self.team {
            return Err(MinterError::NotTeam);
        }
        Ok(())
    }

    /// Step one: the current team nominates a successor. Overwrites any
    /// earlier nomination that was never accepted.
    pub fn propose(&mut self, caller: Address, candidate: Address) -> Result<(), MinterError> {
        self.require_team(caller)?;
        self.pending = Some(candidate);
        Ok(())
    }

    /// Step two: the nominee claims the role.
    pub fn accept(&mut self, caller: Address) -> Result<(), MinterError> {
        if self.pending != Some(caller) {
            return Err(MinterError::NotPendingTeam);
        }
        self.team = caller;
        self.pending = None;
        Ok(())
    }
}
