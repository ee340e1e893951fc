use ethers::types::Address;
use eyre::Result;
use tracing::info;

use crate::script::ScriptContext;

/// The alpha deployment factories, in deployment order.
pub const FACTORY_NAMES: [&str; 10] = [
    "ProxyAdminFactory",
    "ProxyFactory",
    "AddressRegistryV2Factory",
    "MetaPoolTokenFactory",
    "PoolTokenV1Factory",
    "PoolTokenV2Factory",
    "TvlManagerFactory",
    "Erc20AllocationFactory",
    "OracleAdapterFactory",
    "LpAccountFactory",
];

/// Deploys every factory, persisting the address book after each one so a
/// failure part way through can be picked up by hand.
pub async fn deploy_factories(ctx: &mut ScriptContext) -> Result<Vec<(&'static str, Address)>> {
    let mut factories = Vec::with_capacity(FACTORY_NAMES.len());
    for name in FACTORY_NAMES {
        let deployment = ctx.deploy(name, vec![]).await?;
        ctx.record([(name, deployment.address)])?;
        factories.push((name, deployment.address));
    }
    info!(total_gas_used = %ctx.total_gas_used(), "deployed factories");
    Ok(factories)
}
