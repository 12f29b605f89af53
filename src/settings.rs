use config::{Config, ConfigError, Environment, File};
use ethers::types::{Address, H256, U256};
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Code fingerprint of the canonical pair implementation, baked in so address
/// derivation works with no configuration at all.
static DEFAULT_PAIR_CODE_HASH: Lazy<H256> = Lazy::new(|| {
    let bytes = hex::decode("9b3fbcb17eab2a7b4bdbaf276e82a6aebd8d0d7c11aa6a9735962b2cfbca9553")
        .expect("static code hash is valid hex");
    H256::from_slice(&bytes)
});

fn default_pair_code_hash() -> H256 {
    *DEFAULT_PAIR_CODE_HASH
}

fn default_address() -> Address {
    Address::zero()
}

fn default_initial_weekly() -> U256 {
    // 15M tokens at 18 decimals
    U256::from(15_000_000u64) * U256::exp10(18)
}

fn default_team_rate() -> u64 {
    30 // 3.0%
}

fn default_incentive_rate() -> u64 {
    20 // 2.0%
}

/// Deployment context for the router: the registry address and code
/// fingerprint feeding deterministic pair derivation, the wrapped-native
/// token, and the router's own address (used when it briefly holds wrapped
/// funds at the native boundary).
#[derive(Debug, Deserialize, Clone)]
pub struct RouterSettings {
    #[serde(default = "default_address")]
    pub factory: Address,
    #[serde(default = "default_pair_code_hash")]
    pub pair_code_hash: H256,
    #[serde(default = "default_address")]
    pub wrapped_native: Address,
    #[serde(default = "default_address")]
    pub router: Address,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            factory: default_address(),
            pair_code_hash: default_pair_code_hash(),
            wrapped_native: default_address(),
            router: default_address(),
        }
    }
}

/// Emission parameters and destinations. Rates are numerators over 1000.
#[derive(Debug, Deserialize, Clone)]
pub struct MinterSettings {
    /// The minter's own address: shortfalls are minted here and distributed
    /// from here.
    #[serde(default = "default_address")]
    pub minter: Address,
    #[serde(default = "default_initial_weekly")]
    pub initial_weekly: U256,
    #[serde(default = "default_team_rate")]
    pub team_rate: u64,
    /// Fixed share routed to the protocol's incentive pair gauge each epoch.
    #[serde(default = "default_incentive_rate")]
    pub incentive_rate: u64,
    #[serde(default = "default_address")]
    pub treasury: Address,
    #[serde(default = "default_address")]
    pub voter: Address,
    #[serde(default = "default_address")]
    pub incentive_gauge: Address,
}

impl Default for MinterSettings {
    fn default() -> Self {
        Self {
            minter: default_address(),
            initial_weekly: default_initial_weekly(),
            team_rate: default_team_rate(),
            incentive_rate: default_incentive_rate(),
            treasury: default_address(),
            voter: default_address(),
            incentive_gauge: default_address(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub router: RouterSettings,
    #[serde(default)]
    pub minter: MinterSettings,
}

impl Settings {
    /// Layered load: optional TOML file, then `STRATA_`-prefixed environment
    /// overrides (`STRATA_ROUTER__FACTORY=0x…`), with serde defaults filling
    /// everything else.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        builder = builder.add_source(Environment::with_prefix("STRATA").separator("__"));
        builder.build()?.try_deserialize()
    }
}
