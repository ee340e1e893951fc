//! Deploys the TVL flux aggregator. Run this first on a fresh fork so the
//! aggregator lands at the address the registry expects.

use apy_deploy::{
    chain::dev_wallet,
    script::ScriptContext,
    scripts::{deploy_tvl_aggregator, TvlAggregatorOptions},
};
use ethers::signers::Signer;
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let options = TvlAggregatorOptions::from_env()?;
    // Without an explicit oracle the second development account is used.
    let oracle = match options.oracle_address {
        Some(oracle) => oracle,
        None => dev_wallet(1)?.address(),
    };
    let aggregator = deploy_tvl_aggregator(&mut ctx, oracle, &options.link_amount).await?;
    println!("FluxAggregator: {:?}", aggregator);
    println!("Deployment successful.");
    Ok(())
}
