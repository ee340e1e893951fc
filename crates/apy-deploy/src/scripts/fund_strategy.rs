use apy_addresses::registry::{stablecoin_address, whale_address, STABLECOIN_SYMBOLS};
use apy_wrappers::wrappers::{detailed_erc20::IDetailedERC20, pool_manager::PoolManager};
use ethers::types::Address;
use eyre::Result;
use serde::Deserialize;
use tracing::info;

use super::options_from_env;
use crate::{
    script::ScriptContext,
    units::{bytes32, token_amount},
};

/// Whole tokens of each stablecoin moved into the strategy.
pub const WHALE_FUNDING_AMOUNT: &str = "100000";

fn default_strategy_id() -> String {
    "curve_y".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct FundStrategyOptions {
    #[serde(default = "default_strategy_id")]
    pub strategy_id: String,
}

impl FundStrategyOptions {
    pub fn from_env() -> Result<Self> {
        options_from_env()
    }
}

/// Tops up a strategy with every pool stablecoin, sourced from whales. Only
/// works on a forked development node.
pub async fn fund_strategy_from_whales(ctx: &mut ScriptContext, strategy_id: &str) -> Result<Address> {
    let manager = PoolManager::new(ctx.deployed("PoolManagerProxy")?, ctx.deployer.clone());
    let strategy = manager.get_strategy(bytes32(strategy_id)?).call().await?;
    info!(id = strategy_id, ?strategy, "funding strategy");

    for symbol in STABLECOIN_SYMBOLS {
        let token = stablecoin_address(symbol, ctx.network)?;
        let decimals = IDetailedERC20::new(token, ctx.deployer.clone())
            .decimals()
            .call()
            .await?;
        let amount = token_amount(WHALE_FUNDING_AMOUNT, decimals.into())?;
        let balance = ctx
            .chain
            .acquire_token(whale_address(symbol)?, token, strategy, amount)
            .await?;
        info!(symbol, %balance, "strategy balance");
    }

    Ok(strategy)
}
