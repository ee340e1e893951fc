use apy_deploy::{
    script::ScriptContext,
    scripts::{emergency_withdraw, EmergencyWithdrawOptions, SIGNER_MNEMONIC},
};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut ctx = ScriptContext::from_env().await?;
    let options = EmergencyWithdrawOptions::from_env()?;
    let signer = ctx.wallet_from_env(SIGNER_MNEMONIC)?;
    let amount = emergency_withdraw(&mut ctx, &signer, options.emergency_recipient).await?;
    println!(
        "Secured {} tokens for {:?}",
        amount, options.emergency_recipient
    );
    Ok(())
}
