//! Deploys the reward distributor with the `SIGNER_MNEMONIC` account as its
//! claim signer.

use apy_deploy::{
    script::ScriptContext,
    scripts::{deploy_reward_distributor, SIGNER_MNEMONIC},
};
use ethers::signers::Signer;
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let signer = ctx.wallet_from_env(SIGNER_MNEMONIC)?.address();
    println!("Signer address: {:?}", signer);
    let distributor = deploy_reward_distributor(&mut ctx, signer).await?;
    println!("RewardDistributor: {:?}", distributor);
    println!("Deployment successful.");
    Ok(())
}
