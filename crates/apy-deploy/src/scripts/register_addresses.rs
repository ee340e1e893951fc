use apy_wrappers::wrappers::address_registry::AddressRegistryV2;
use ethers::types::Address;
use eyre::Result;
use tracing::info;

use crate::{script::ScriptContext, units::bytes32};

/// Registry ids and the address book entries they resolve to.
pub const REGISTRY_IDS: &[(&str, &str)] = &[
    ("poolManager", "PoolManagerProxy"),
    ("tvlManager", "TvlManager"),
    ("oracleAdapter", "OracleAdapter"),
    ("mApt", "MetaPoolTokenProxy"),
    ("daiPool", "DAI_PoolTokenProxy"),
    ("usdcPool", "USDC_PoolTokenProxy"),
    ("usdtPool", "USDT_PoolTokenProxy"),
    ("adminSafe", "AdminSafe"),
    ("lpSafe", "LpSafe"),
];

/// The registry entries whose contracts are recorded for the current network.
pub fn registry_entries(ctx: &ScriptContext) -> Vec<(String, Address)> {
    REGISTRY_IDS
        .iter()
        .filter_map(|(id, name)| {
            ctx.address_book
                .get(ctx.network.key(), name)
                .map(|address| (id.to_string(), address))
        })
        .collect()
}

/// Registers each `(id, address)` pair with the address registry recorded in
/// the book. Ids that already point at the right address are skipped, so the
/// script can be re-run after a failure. Returns the number of registrations
/// that were sent.
pub async fn register_addresses(
    ctx: &mut ScriptContext,
    entries: &[(String, Address)],
) -> Result<usize> {
    let registry =
        AddressRegistryV2::new(ctx.deployed("AddressRegistryProxy")?, ctx.deployer.clone());
    let registered = registry.get_ids().call().await?;

    let mut sent = 0;
    for (id, address) in entries {
        let key = bytes32(id)?;
        if registered.contains(&key) && registry.get_address(key).call().await? == *address {
            info!(id = %id, ?address, "already registered");
            continue;
        }
        ctx.send(
            &format!("registerAddress({})", id),
            registry.register_address(key, *address),
        )
        .await?;
        sent += 1;
    }
    info!(sent, "registration complete");

    Ok(sent)
}
