use apy_deploy::{
    script::ScriptContext,
    scripts::{fund_strategy_from_whales, FundStrategyOptions},
};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let options = FundStrategyOptions::from_env()?;
    let strategy = fund_strategy_from_whales(&mut ctx, &options.strategy_id).await?;
    println!("Funded strategy {} at {:?}", options.strategy_id, strategy);
    Ok(())
}
