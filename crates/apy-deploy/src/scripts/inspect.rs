use ethers::{providers::Middleware, types::Address};
use eyre::Result;
use tracing::warn;

use crate::script::ScriptContext;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectedContract {
    pub name: String,
    pub address: Address,
    pub has_code: bool,
}

/// Checks every entry recorded for the current network against the chain.
/// Entries without code usually mean the book belongs to another chain or a
/// local node was restarted.
pub async fn inspect_address_book(ctx: &ScriptContext) -> Result<Vec<InspectedContract>> {
    let provider = ctx.chain.provider();
    let mut inspected = vec![];
    for (name, address) in ctx.address_book.contracts(ctx.network.key()) {
        let has_code = !provider.get_code(address, None).await?.is_empty();
        if !has_code {
            warn!(contract = %name, ?address, "no code at recorded address");
        }
        inspected.push(InspectedContract {
            name,
            address,
            has_code,
        });
    }
    Ok(inspected)
}
