use apy_deploy::{
    script::ScriptContext,
    scripts::{deploy_generic_executor, ACCOUNT_MANAGER_MNEMONIC},
};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let manager = ctx.wallet_from_env(ACCOUNT_MANAGER_MNEMONIC)?;
    let executor = deploy_generic_executor(&mut ctx, manager).await?;
    println!("GenericExecutor: {:?}", executor);
    println!("Executor deployment successful.");
    Ok(())
}
