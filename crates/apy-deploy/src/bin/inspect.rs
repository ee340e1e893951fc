//! Prints the address book for the selected network and flags entries that
//! have no code on chain.

use apy_deploy::{script::ScriptContext, scripts::inspect_address_book};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = ScriptContext::from_env().await?;
    let contracts = inspect_address_book(&ctx).await?;
    if contracts.is_empty() {
        println!("No deployments recorded for {}", ctx.network);
        return Ok(());
    }
    println!("{}", ctx.network);
    for contract in &contracts {
        let marker = if contract.has_code { "" } else { "  (no code)" };
        println!("  {:<32} {:?}{}", contract.name, contract.address, marker);
    }
    Ok(())
}
