use apy_wrappers::wrappers::pool_token::PoolToken;
use ethers::types::U256;
use eyre::Result;
use serde::Deserialize;
use tracing::{info, warn};

use super::options_from_env;
use crate::script::ScriptContext;

fn default_pool() -> String {
    "DAI".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserWithdrawOptions {
    /// Symbol of the pool's underlying stablecoin.
    #[serde(default = "default_pool")]
    pub pool: String,
}

impl UserWithdrawOptions {
    pub fn from_env() -> Result<Self> {
        options_from_env()
    }
}

/// Redeems the deployer's entire position in a stablecoin pool and returns
/// the underlyer amount it was worth.
pub async fn user_withdraw(ctx: &mut ScriptContext, symbol: &str) -> Result<U256> {
    let symbol = symbol.to_uppercase();
    let pool = PoolToken::new(
        ctx.deployed(&format!("{}_PoolTokenProxy", symbol))?,
        ctx.deployer.clone(),
    );

    let balance = pool.balance_of(ctx.deployer_address()).call().await?;
    info!(pool = %symbol, %balance, "pool token balance");
    if balance.is_zero() {
        warn!(pool = %symbol, "nothing to withdraw");
        return Ok(U256::zero());
    }

    let amount = pool.get_underlyer_amount(balance).call().await?;
    info!(pool = %symbol, %amount, "withdrawing");
    ctx.send("redeem", pool.redeem(balance)).await?;

    Ok(amount)
}
