use std::{
    fs,
    path::{Path, PathBuf},
};

use apy_addresses::{AddressBook, Network};
use apy_deploy::{
    config::Config,
    constants::ALICE,
    script::ScriptContext,
    scripts::{
        deploy_factories, emergency_withdraw, inspect_address_book, register_addresses,
        user_withdraw, FACTORY_NAMES,
    },
    units::bytes32,
};
use apy_wrappers::wrappers::detailed_erc20::IDetailedERC20;
use ethers::{
    abi::Token,
    providers::Middleware,
    signers::Signer,
    types::{Address, Bytes},
    utils::hex,
};
use eyre::Result;
use rand::Rng;

// Creation code for a contract whose runtime code returns 42 for any call.
const ANSWER_BYTECODE: &str = "0x600a600c600039600a6000f3602a60005260206000f3";
// Creation code for a contract whose runtime code returns 0 for any call.
const ZERO_BYTECODE: &str = "0x6005600c60003960056000f360206000f3";
// Creation code for a contract whose runtime code reverts on every call.
const REVERT_BYTECODE: &str = "0x6005600c60003960056000f360006000fd";

/// Creation code for a registry stand-in that answers every call with
/// `(0x20, 1, id)`. That decodes as `[id]` for `getIds()` and as the address
/// `0x20` for `getAddress(bytes32)`.
fn registry_bytecode(id: &str) -> Result<String> {
    let runtime = format!(
        "{}{}7f{}604052{}",
        // mstore(0x00, 0x20)
        "6020600052",
        // mstore(0x20, 1)
        "6001602052",
        hex::encode(bytes32(id)?),
        // return(0x00, 0x60)
        "60606000f3",
    );
    Ok(format!(
        "0x60{len:02x}600c60003960{len:02x}6000f3{runtime}",
        len = runtime.len() / 2,
    ))
}

fn scratch_dir() -> PathBuf {
    let suffix: u64 = rand::thread_rng().gen();
    std::env::temp_dir().join(format!("apy-deployment-tests-{suffix}"))
}

fn write_artifact(root: &Path, name: &str, bytecode: &str) -> Result<()> {
    let dir = root.join(format!("{}.sol", name));
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join(format!("{}.json", name)),
        serde_json::json!({
            "contractName": name,
            "abi": [],
            "bytecode": bytecode,
        })
        .to_string(),
    )?;
    fs::write(dir.join(format!("{}.dbg.json", name)), "{}")?;
    Ok(())
}

fn local_config(root: &Path) -> Config {
    Config {
        network: Network::Localhost,
        address_book: root.join("deployed_addresses.json"),
        artifacts: root.join("artifacts"),
        ..Config::default()
    }
}

#[ignore]
#[tokio::test]
async fn test_deploy_and_record() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let root = scratch_dir();
    write_artifact(&root.join("artifacts"), "Answer", ANSWER_BYTECODE)?;
    let config = local_config(&root);
    let mut ctx = ScriptContext::new(config.clone()).await?;

    let deployment = ctx.deploy("Answer", vec![]).await?;
    ctx.record([("Answer", deployment.address)])?;

    // The book is persisted immediately.
    let book = AddressBook::load(&config.address_book)?;
    assert_eq!(book.get("LOCALHOST", "Answer"), Some(deployment.address));
    assert_eq!(ctx.deployed("Answer")?, deployment.address);

    let code = ctx.chain.provider().get_code(deployment.address, None).await?;
    assert_eq!(code, "0x602a60005260206000f3".parse::<Bytes>()?);
    assert_eq!(ctx.total_gas_used(), deployment.gas_used);

    let inspected = inspect_address_book(&ctx).await?;
    assert_eq!(inspected.len(), 1);
    assert!(inspected[0].has_code);

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[ignore]
#[tokio::test]
async fn test_constructor_arguments_are_rejected_without_constructor() -> Result<()> {
    let root = scratch_dir();
    write_artifact(&root.join("artifacts"), "Answer", ANSWER_BYTECODE)?;
    let mut ctx = ScriptContext::new(local_config(&root)).await?;

    let result = ctx
        .deploy("Answer", vec![Token::Uint(1.into())])
        .await;
    assert!(result.is_err());
    assert!(ctx.deployed("Answer").is_err());

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[ignore]
#[tokio::test]
async fn test_deploy_factories() -> Result<()> {
    let root = scratch_dir();
    for name in FACTORY_NAMES {
        write_artifact(&root.join("artifacts"), name, ANSWER_BYTECODE)?;
    }
    let config = local_config(&root);
    let mut ctx = ScriptContext::new(config.clone()).await?;

    let factories = deploy_factories(&mut ctx).await?;
    assert_eq!(factories.len(), FACTORY_NAMES.len());

    let book = AddressBook::load(&config.address_book)?;
    for (name, address) in &factories {
        assert_eq!(book.get("LOCALHOST", name), Some(*address));
    }
    assert!(ctx.total_gas_used() > 0.into());

    // Every factory was deployed to a fresh address.
    let mut addresses = factories.iter().map(|(_, address)| *address).collect::<Vec<_>>();
    addresses.sort();
    addresses.dedup();
    assert_eq!(addresses.len(), FACTORY_NAMES.len());

    fs::remove_dir_all(&root)?;
    Ok(())
}

/// Deploys the artifact `artifact` and records it under `name`.
async fn deploy_as(ctx: &mut ScriptContext, artifact: &str, name: &str) -> Result<Address> {
    let address = ctx.deploy(artifact, vec![]).await?.address;
    ctx.record([(name, address)])?;
    Ok(address)
}

#[ignore]
#[tokio::test]
async fn test_send_rejects_reverted_receipts() -> Result<()> {
    let root = scratch_dir();
    write_artifact(&root.join("artifacts"), "Reverter", REVERT_BYTECODE)?;
    let mut ctx = ScriptContext::new(local_config(&root)).await?;

    let reverter = ctx.deploy("Reverter", vec![]).await?.address;
    let gas_used = ctx.total_gas_used();

    // An explicit gas limit skips estimation so the revert lands on chain.
    let token = IDetailedERC20::new(reverter, ctx.deployer.clone());
    let call = token.transfer(Address::from_low_u64_be(1), 1.into()).gas(100_000u64);
    let err = ctx.send("transfer", call).await.unwrap_err();
    assert!(err.to_string().contains("reverted"));
    assert_eq!(ctx.total_gas_used(), gas_used);

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[ignore]
#[tokio::test]
async fn test_register_addresses_skips_registered_ids() -> Result<()> {
    let root = scratch_dir();
    write_artifact(
        &root.join("artifacts"),
        "Registry",
        &registry_bytecode("lpSafe")?,
    )?;
    let mut ctx = ScriptContext::new(local_config(&root)).await?;
    deploy_as(&mut ctx, "Registry", "AddressRegistryProxy").await?;

    // The registry already maps lpSafe to 0x20.
    let registered = vec![("lpSafe".to_string(), Address::from_low_u64_be(0x20))];
    assert_eq!(register_addresses(&mut ctx, &registered).await?, 0);

    let mut entries = registered;
    entries.push(("adminSafe".to_string(), Address::from_low_u64_be(0xad)));
    entries.push(("lpSafe".to_string(), Address::from_low_u64_be(0x21)));
    assert_eq!(register_addresses(&mut ctx, &entries).await?, 2);

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[ignore]
#[tokio::test]
async fn test_emergency_withdraw_requires_distributor_signer() -> Result<()> {
    let root = scratch_dir();
    write_artifact(&root.join("artifacts"), "Answer", ANSWER_BYTECODE)?;
    let mut ctx = ScriptContext::new(local_config(&root)).await?;
    deploy_as(&mut ctx, "Answer", "GovernanceTokenProxy").await?;
    // signer() answers 0x2a.
    deploy_as(&mut ctx, "Answer", "RewardDistributor").await?;
    let gas_used = ctx.total_gas_used();

    let err = emergency_withdraw(&mut ctx, &ALICE, Address::from_low_u64_be(0xbeef))
        .await
        .unwrap_err();
    assert!(err.to_string().contains(&format!("{:?}", ALICE.address())));
    assert_eq!(ctx.total_gas_used(), gas_used);

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[ignore]
#[tokio::test]
async fn test_user_withdraw_without_balance() -> Result<()> {
    let root = scratch_dir();
    write_artifact(&root.join("artifacts"), "EmptyPool", ZERO_BYTECODE)?;
    let mut ctx = ScriptContext::new(local_config(&root)).await?;
    deploy_as(&mut ctx, "EmptyPool", "DAI_PoolTokenProxy").await?;
    let gas_used = ctx.total_gas_used();

    assert_eq!(user_withdraw(&mut ctx, "dai").await?, 0.into());
    assert_eq!(ctx.total_gas_used(), gas_used);
    assert!(user_withdraw(&mut ctx, "usdc").await.is_err());

    fs::remove_dir_all(&root)?;
    Ok(())
}
