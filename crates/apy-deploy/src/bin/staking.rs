//! Funds the liquidity mining contracts. Set `APY_DRY_RUN=true` to only
//! estimate the ether cost.

use apy_deploy::{
    script::ScriptContext,
    scripts::{fund_staking_rewards, StakingOptions, STAKING_MNEMONIC, TOKEN_MNEMONIC},
};
use ethers::utils::format_ether;
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let options = StakingOptions::from_env()?;
    let token_deployer = ctx.wallet_from_env(TOKEN_MNEMONIC)?;
    let staking_deployer = ctx.wallet_from_env(STAKING_MNEMONIC)?;
    let estimate = fund_staking_rewards(
        &mut ctx,
        token_deployer,
        staking_deployer,
        &options.staking_amount,
        options.dry_run,
    )
    .await?;
    match estimate {
        Some(cost) => println!("Estimated ETH cost: {}", format_ether(cost)),
        None => println!("Staking contracts updated successfully."),
    }
    Ok(())
}
