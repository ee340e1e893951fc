use apy_deploy::{
    script::ScriptContext,
    scripts::{user_withdraw, UserWithdrawOptions},
};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let options = UserWithdrawOptions::from_env()?;
    let amount = user_withdraw(&mut ctx, &options.pool).await?;
    println!("Withdrew {} from the {} pool", amount, options.pool.to_uppercase());
    println!("Execution successful.");
    Ok(())
}
