//! Deploys the governance token behind a proxy and records
//! `GovernanceTokenProxyAdmin`, `GovernanceToken` and `GovernanceTokenProxy`.

use apy_deploy::{script::ScriptContext, scripts::deploy_governance_token};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let token = deploy_governance_token(&mut ctx).await?;
    println!("GovernanceTokenProxy: {:?}", token.proxy);
    println!("Deployment successful.");
    Ok(())
}
