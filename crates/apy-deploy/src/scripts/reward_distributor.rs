use ethers::{abi::Token, types::Address};
use eyre::Result;
use tracing::info;

use crate::script::ScriptContext;

/// Deploys the reward distributor for the governance token. `signer` is the
/// account whose signatures authorize claims.
pub async fn deploy_reward_distributor(ctx: &mut ScriptContext, signer: Address) -> Result<Address> {
    let token = ctx.deployed("GovernanceTokenProxy")?;
    info!(?signer, ?token, "deploying reward distributor");
    let distributor = ctx
        .deploy(
            "RewardDistributor",
            vec![Token::Address(token), Token::Address(signer)],
        )
        .await?
        .address;
    ctx.record([("RewardDistributor", distributor)])?;
    Ok(distributor)
}
