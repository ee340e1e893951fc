use apy_wrappers::wrappers::detailed_erc20::IDetailedERC20;
use ethers::{abi::Token, types::Address};
use eyre::Result;
use tracing::info;

use crate::{
    script::ScriptContext,
    units::{format_token_amount, token_amount},
};

/// The fixed supply minted to the deployer, in whole tokens.
pub const TOTAL_SUPPLY: &str = "100000000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GovernanceToken {
    pub proxy_admin: Address,
    pub logic: Address,
    pub proxy: Address,
}

/// Deploys the governance token behind a transparent proxy owned by a fresh
/// proxy admin. The whole supply is minted to the deployer.
pub async fn deploy_governance_token(ctx: &mut ScriptContext) -> Result<GovernanceToken> {
    let proxy_admin = ctx.deploy("ProxyAdmin", vec![]).await?.address;
    ctx.record([("GovernanceTokenProxyAdmin", proxy_admin)])?;

    let logic = ctx.deploy("GovernanceToken", vec![]).await?.address;
    ctx.record([("GovernanceToken", logic)])?;

    let proxy = ctx
        .deploy(
            "GovernanceTokenProxy",
            vec![
                Token::Address(logic),
                Token::Address(proxy_admin),
                Token::Uint(token_amount(TOTAL_SUPPLY, 18)?),
            ],
        )
        .await?
        .address;
    ctx.record([("GovernanceTokenProxy", proxy)])?;

    let token = IDetailedERC20::new(proxy, ctx.deployer.clone());
    let decimals = token.decimals().call().await?;
    let total_supply = token.total_supply().call().await?;
    let balance = token.balance_of(ctx.deployer_address()).call().await?;
    info!(
        total_supply = %format_token_amount(total_supply, decimals.into())?,
        deployer_balance = %format_token_amount(balance, decimals.into())?,
        "governance token ready"
    );

    Ok(GovernanceToken {
        proxy_admin,
        logic,
        proxy,
    })
}
