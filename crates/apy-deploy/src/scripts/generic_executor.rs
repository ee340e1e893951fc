use apy_addresses::Network;
use ethers::{
    providers::PendingTransaction,
    signers::{LocalWallet, Signer},
    types::Address,
    utils::format_ether,
};
use eyre::Result;
use tracing::info;

use crate::{constants::ETH, script::ScriptContext};

/// Confirmations to wait for on public networks before the block explorer
/// can verify a deployment.
pub const VERIFICATION_CONFIRMATIONS: usize = 5;

/// Deploys the generic executor from the account manager's wallet.
pub async fn deploy_generic_executor(
    ctx: &mut ScriptContext,
    manager: LocalWallet,
) -> Result<Address> {
    info!(address = ?manager.address(), "account manager");
    // The manager has no ether on a fresh fork.
    if ctx.network == Network::Localhost {
        ctx.chain.deal(manager.address(), *ETH).await?;
    }
    let balance = ctx.ether_balance(manager.address()).await?;
    info!(balance = %format_ether(balance), "account manager balance");

    let client = ctx.client(manager).await?;
    let deployment = ctx.deploy_with(client, "GenericExecutor", vec![]).await?;
    ctx.record([("GenericExecutor", deployment.address)])?;

    if ctx.network.is_public() {
        let provider = ctx.chain.provider();
        PendingTransaction::new(deployment.transaction_hash, &provider)
            .confirmations(VERIFICATION_CONFIRMATIONS)
            .await?;
        info!(
            address = ?deployment.address,
            "generic executor is ready for verification"
        );
    }

    Ok(deployment.address)
}
