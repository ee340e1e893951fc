use apy_deploy::{script::ScriptContext, scripts::deploy_factories};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    for (name, address) in deploy_factories(&mut ctx).await? {
        println!("{}: {:?}", name, address);
    }
    println!("Total gas used: {}", ctx.total_gas_used());
    println!("Deployed addresses recorded in {}", ctx.config.address_book.display());
    println!("Deployment successful.");
    Ok(())
}
