use apy_addresses::registry::{BALANCER_STAKING_ADDRESS, UNISWAP_STAKING_ADDRESS};
use apy_wrappers::wrappers::{detailed_erc20::IDetailedERC20, staking_rewards::StakingRewards};
use ethers::{
    providers::Middleware,
    signers::{LocalWallet, Signer},
    types::U256,
    utils::format_ether,
};
use eyre::Result;
use serde::Deserialize;
use tracing::info;

use super::options_from_env;
use crate::{script::ScriptContext, units::token_amount};

fn default_staking_amount() -> String {
    "35000".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct StakingOptions {
    /// Whole reward tokens given to each staking contract.
    #[serde(default = "default_staking_amount")]
    pub staking_amount: String,
    /// Only estimate the ether the transactions would cost.
    #[serde(default)]
    pub dry_run: bool,
}

impl StakingOptions {
    pub fn from_env() -> Result<Self> {
        options_from_env()
    }
}

/// Funds the Balancer and Uniswap liquidity mining contracts with `amount`
/// reward tokens each and starts a new reward period on both.
///
/// The tokens come from the token deployer while `notifyRewardAmount` is
/// restricted to the staking deployer. In a dry run nothing is sent and the
/// estimated ether cost is returned instead.
pub async fn fund_staking_rewards(
    ctx: &mut ScriptContext,
    token_deployer: LocalWallet,
    staking_deployer: LocalWallet,
    amount: &str,
    dry_run: bool,
) -> Result<Option<U256>> {
    let amount = token_amount(amount, 18)?;
    let token_address = ctx.deployed("GovernanceTokenProxy")?;
    let token_deployer_address = token_deployer.address();
    let staking_deployer_address = staking_deployer.address();
    info!(address = ?token_deployer_address, "token deployer");
    info!(address = ?staking_deployer_address, "staking deployer");

    let token = IDetailedERC20::new(token_address, ctx.client(token_deployer).await?);
    let staking_client = ctx.client(staking_deployer).await?;
    let balancer = StakingRewards::new(*BALANCER_STAKING_ADDRESS, staking_client.clone());
    let uniswap = StakingRewards::new(*UNISWAP_STAKING_ADDRESS, staking_client);

    if dry_run {
        info!("doing a dry run");
        let gas_price = match ctx.gas_price().await? {
            Some(gas_price) => gas_price,
            None => ctx.chain.provider().get_gas_price().await?,
        };

        let transfer_gas = token
            .transfer(*BALANCER_STAKING_ADDRESS, amount)
            .estimate_gas()
            .await?
            + token
                .transfer(*UNISWAP_STAKING_ADDRESS, amount)
                .estimate_gas()
                .await?;
        let transfer_cost = transfer_gas * gas_price;
        let balance = ctx.ether_balance(token_deployer_address).await?;
        info!(
            estimated_cost = %format_ether(transfer_cost),
            balance = %format_ether(balance),
            "token transfers"
        );

        let notify_gas = balancer.notify_reward_amount(amount).estimate_gas().await?
            + uniswap.notify_reward_amount(amount).estimate_gas().await?;
        let notify_cost = notify_gas * gas_price;
        let balance = ctx.ether_balance(staking_deployer_address).await?;
        info!(
            estimated_cost = %format_ether(notify_cost),
            balance = %format_ether(balance),
            "reward notifications"
        );

        return Ok(Some(transfer_cost + notify_cost));
    }

    ctx.send("transfer to Balancer staking", token.transfer(*BALANCER_STAKING_ADDRESS, amount))
        .await?;
    ctx.send("transfer to Uniswap staking", token.transfer(*UNISWAP_STAKING_ADDRESS, amount))
        .await?;
    ctx.send("notifyRewardAmount on Balancer", balancer.notify_reward_amount(amount))
        .await?;
    ctx.send("notifyRewardAmount on Uniswap", uniswap.notify_reward_amount(amount))
        .await?;
    info!(%amount, "staking contracts funded");

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() -> Result<()> {
        let options = envy::prefixed("APY_").from_iter::<_, StakingOptions>(Vec::new())?;
        assert_eq!(options.staking_amount, "35000");
        assert!(!options.dry_run);

        let options = envy::prefixed("APY_").from_iter::<_, StakingOptions>(vec![
            ("APY_STAKING_AMOUNT".to_string(), "1000".to_string()),
            ("APY_DRY_RUN".to_string(), "true".to_string()),
        ])?;
        assert_eq!(options.staking_amount, "1000");
        assert!(options.dry_run);
        Ok(())
    }
}
