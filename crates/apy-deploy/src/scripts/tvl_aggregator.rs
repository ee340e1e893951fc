use apy_addresses::registry::{aggregator_address, LINK_ADDRESS, LINK_WHALE_ADDRESS};
use apy_wrappers::wrappers::flux_aggregator::FluxAggregator;
use ethers::{
    abi::Token,
    providers::Middleware,
    types::{Address, U256},
};
use eyre::Result;
use serde::Deserialize;
use tracing::{info, warn};

use super::options_from_env;
use crate::{script::ScriptContext, units::token_amount};

pub const DESCRIPTION: &str = "TVL aggregator";
/// Seconds before an oracle may skip a round.
pub const ROUND_TIMEOUT: u32 = 100_000;
pub const ANSWER_DECIMALS: u8 = 8;

fn default_link_amount() -> String {
    "100000".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct TvlAggregatorOptions {
    /// The node allowed to submit TVL answers.
    pub oracle_address: Option<Address>,
    /// LINK used to pay the oracle. The aggregator needs enough for two
    /// rounds of submissions from every oracle.
    #[serde(default = "default_link_amount")]
    pub link_amount: String,
}

impl TvlAggregatorOptions {
    pub fn from_env() -> Result<Self> {
        options_from_env()
    }
}

/// Deploys the Chainlink flux aggregator that serves the TVL feed, funds it
/// with LINK from a whale and registers `oracle` as its only node.
///
/// The registry expects the local TVL aggregator at a fixed address, which
/// only holds when this is the first transaction from the deployer.
pub async fn deploy_tvl_aggregator(
    ctx: &mut ScriptContext,
    oracle: Address,
    link_amount: &str,
) -> Result<Address> {
    let deployer = ctx.deployer_address();
    let nonce = ctx
        .chain
        .provider()
        .get_transaction_count(deployer, None)
        .await?;
    info!(%nonce, ?oracle, "deploying tvl aggregator");

    let args = vec![
        Token::Address(*LINK_ADDRESS),
        // Payment per oracle submission.
        Token::Uint(token_amount("1", 18)?),
        Token::Uint(ROUND_TIMEOUT.into()),
        // No validator.
        Token::Address(Address::zero()),
        // Submissions must lie in [0, 1e20].
        Token::Int(U256::zero()),
        Token::Int(token_amount("1", 20)?),
        Token::Uint(ANSWER_DECIMALS.into()),
        Token::String(DESCRIPTION.to_string()),
    ];
    let address = ctx.deploy("FluxAggregator", args).await?.address;
    ctx.record([("TvlAggregator", address)])?;

    match aggregator_address(ctx.network, "TVL") {
        Ok(expected) if expected != address => warn!(
            ?expected,
            actual = ?address,
            "tvl aggregator doesn't match the registry"
        ),
        Ok(_) => {}
        Err(err) => warn!(%err, "couldn't check the tvl aggregator address"),
    }

    let amount = token_amount(link_amount, 18)?;
    ctx.chain
        .acquire_token(*LINK_WHALE_ADDRESS, *LINK_ADDRESS, address, amount)
        .await?;
    let aggregator = FluxAggregator::new(address, ctx.deployer.clone());
    ctx.send("updateAvailableFunds", aggregator.update_available_funds())
        .await?;

    ctx.send(
        "changeOracles",
        aggregator.change_oracles(
            vec![],
            vec![oracle],
            vec![deployer],
            1, // min submissions per round
            1, // max submissions per round
            0, // rounds before an oracle can start a new round
        ),
    )
    .await?;
    info!(?address, "tvl aggregator ready");

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() -> Result<()> {
        let options = envy::prefixed("APY_").from_iter::<_, TvlAggregatorOptions>(vec![(
            "APY_ORACLE_ADDRESS".to_string(),
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
        )])?;
        assert_eq!(options.link_amount, "100000");
        assert_eq!(
            options.oracle_address,
            Some("0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse::<Address>()?)
        );
        Ok(())
    }
}
