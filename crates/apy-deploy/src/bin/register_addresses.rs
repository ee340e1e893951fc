use apy_deploy::{
    script::ScriptContext,
    scripts::{register_addresses, registry_entries},
};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let entries = registry_entries(&ctx);
    let sent = register_addresses(&mut ctx, &entries).await?;
    println!("Registered {} of {} addresses.", sent, entries.len());
    println!("Registration successful.");
    Ok(())
}
