//! These tests fork mainnet and need `APY_FORK_URL` to point at an archive
//! node.
use std::env;

use apy_addresses::{
    registry::{aggregator_address, stablecoin_address, whale_address, DAI_ADDRESS},
    Network,
};
use apy_deploy::{chain::Chain, constants::ALICE, units::token_amount};
use apy_wrappers::wrappers::{
    aggregator_v3::AggregatorV3Interface, detailed_erc20::IDetailedERC20,
};
use ethers::{signers::Signer, types::I256};
use eyre::Result;

async fn fork() -> Result<Chain> {
    Chain::connect(None, Some(env::var("APY_FORK_URL")?)).await
}

#[ignore]
#[tokio::test]
async fn test_acquire_stablecoins_from_whales() -> Result<()> {
    let chain = fork().await?;
    let client = chain.client(ALICE.clone()).await?;

    for symbol in ["DAI", "USDC", "USDT"] {
        let token = stablecoin_address(symbol, Network::Mainnet)?;
        let decimals = IDetailedERC20::new(token, client.clone())
            .decimals()
            .call()
            .await?;
        let amount = token_amount("100000", decimals.into())?;
        let balance = chain
            .acquire_token(whale_address(symbol)?, token, ALICE.address(), amount)
            .await?;
        assert_eq!(balance, amount);
    }

    let dai = IDetailedERC20::new(*DAI_ADDRESS, client);
    assert_eq!(dai.symbol().call().await?, "DAI");
    Ok(())
}

#[ignore]
#[tokio::test]
async fn test_registry_aggregators_are_live() -> Result<()> {
    let chain = fork().await?;
    let client = chain.client(ALICE.clone()).await?;

    for pair in ["DAI-ETH", "USDC-ETH", "USDT-ETH"] {
        let aggregator =
            AggregatorV3Interface::new(aggregator_address(Network::Mainnet, pair)?, client.clone());
        assert_eq!(aggregator.decimals().call().await?, 18);
        let (_, answer, _, _, _) = aggregator.latest_round_data().call().await?;
        assert!(answer > I256::zero());
    }
    Ok(())
}
