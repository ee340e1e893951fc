use apy_wrappers::wrappers::{
    detailed_erc20::IDetailedERC20,
    reward_distributor::{Recipient, RewardDistributor},
};
use ethers::{
    signers::{LocalWallet, Signer},
    types::{Address, U256},
};
use eyre::{eyre, Result};
use serde::Deserialize;
use tracing::{info, warn};

use super::options_from_env;
use crate::{
    script::ScriptContext,
    signature::{sign_reward_claim, RewardClaim},
};

#[derive(Clone, Debug, Deserialize)]
pub struct EmergencyWithdrawOptions {
    /// Where the distributor's balance is sent.
    pub emergency_recipient: Address,
}

impl EmergencyWithdrawOptions {
    pub fn from_env() -> Result<Self> {
        options_from_env()
    }
}

/// Drains the reward distributor by signing a claim for its entire token
/// balance in favor of `recipient`. `signer` must be the distributor's
/// configured signer.
pub async fn emergency_withdraw(
    ctx: &mut ScriptContext,
    signer: &LocalWallet,
    recipient: Address,
) -> Result<U256> {
    let token = IDetailedERC20::new(ctx.deployed("GovernanceTokenProxy")?, ctx.deployer.clone());
    let distributor =
        RewardDistributor::new(ctx.deployed("RewardDistributor")?, ctx.deployer.clone());

    let expected_signer = distributor.signer().call().await?;
    if expected_signer != signer.address() {
        return Err(eyre!(
            "{:?} can't authorize claims, the distributor expects {:?}",
            signer.address(),
            expected_signer
        ));
    }

    let balance = token.balance_of(distributor.address()).call().await?;
    if balance.is_zero() {
        warn!("the distributor holds no tokens");
        return Ok(U256::zero());
    }
    let nonce = distributor.account_nonces(recipient).call().await?;
    info!(%balance, %nonce, ?recipient, "claiming the distributor's balance");

    let claim = RewardClaim {
        nonce,
        wallet: recipient,
        amount: balance,
    };
    let signature = sign_reward_claim(signer, distributor.address(), ctx.chain_id(), &claim).await?;
    ctx.send(
        "claim",
        distributor.claim(
            Recipient {
                nonce,
                wallet: recipient,
                amount: balance,
            },
            signature.v,
            signature.r,
            signature.s,
        ),
    )
    .await?;
    info!("funds secured");

    Ok(balance)
}
