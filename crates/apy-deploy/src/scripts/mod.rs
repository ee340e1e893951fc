//! The operational flows. Each one takes a [`ScriptContext`] so that the
//! binaries only need to build a context and report the outcome.
//!
//! [`ScriptContext`]: crate::script::ScriptContext
mod emergency_withdraw;
mod factories;
mod fund_strategy;
mod generic_executor;
mod governance_token;
mod inspect;
mod register_addresses;
mod reward_distributor;
mod staking;
mod tvl_aggregator;
mod user_withdraw;

pub use emergency_withdraw::{emergency_withdraw, EmergencyWithdrawOptions};
pub use factories::{deploy_factories, FACTORY_NAMES};
pub use fund_strategy::{fund_strategy_from_whales, FundStrategyOptions, WHALE_FUNDING_AMOUNT};
pub use generic_executor::{deploy_generic_executor, VERIFICATION_CONFIRMATIONS};
pub use governance_token::{deploy_governance_token, GovernanceToken, TOTAL_SUPPLY};
pub use inspect::{inspect_address_book, InspectedContract};
pub use register_addresses::{register_addresses, registry_entries, REGISTRY_IDS};
pub use reward_distributor::deploy_reward_distributor;
pub use staking::{fund_staking_rewards, StakingOptions};
pub use tvl_aggregator::{deploy_tvl_aggregator, TvlAggregatorOptions};
pub use user_withdraw::{user_withdraw, UserWithdrawOptions};

/// Mnemonic of the key that authorizes reward claims.
pub const SIGNER_MNEMONIC: &str = "SIGNER_MNEMONIC";
/// Mnemonic of the governance token deployer, which holds the token supply.
pub const TOKEN_MNEMONIC: &str = "TOKEN_MNEMONIC";
/// Mnemonic of the account that controls the liquidity mining contracts.
pub const STAKING_MNEMONIC: &str = "STAKING_MNEMONIC";
/// Mnemonic of the account that deploys the generic executor.
pub const ACCOUNT_MANAGER_MNEMONIC: &str = "ACCOUNT_MANAGER_MNEMONIC";

/// Script specific options share the `APY_` prefix with [`Config`].
///
/// [`Config`]: crate::config::Config
fn options_from_env<T: serde::de::DeserializeOwned>() -> eyre::Result<T> {
    Ok(envy::prefixed("APY_").from_env::<T>()?)
}
