use std::sync::Arc;

use apy_wrappers::wrappers::detailed_erc20::IDetailedERC20;
use ethers::{
    providers::{Http, Middleware, Provider},
    signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, Signer},
    types::{Address, U256},
};
use eyre::{eyre, Result};
use serde_json::Value;
use tracing::{debug, info};

use super::Chain;
use crate::constants::{DEV_ACCOUNT_BALANCE, ETH, MNEMONIC};

/// The development nodes whose cheat codes we know how to use. They share
/// the `evm_*` methods but namespace the rest under their own prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DevNode {
    Anvil,
    Hardhat,
}

impl DevNode {
    /// Detects the node from its `web3_clientVersion`.
    pub fn detect(client_version: &str) -> Option<Self> {
        let client_version = client_version.to_lowercase();
        if client_version.contains("anvil") {
            Some(Self::Anvil)
        } else if client_version.contains("hardhat") {
            Some(Self::Hardhat)
        } else {
            None
        }
    }

    pub fn method(&self, name: &str) -> String {
        let namespace = match self {
            Self::Anvil => "anvil",
            Self::Hardhat => "hardhat",
        };
        format!("{}_{}", namespace, name)
    }
}

impl Chain {
    /// The development node behind this chain. Cheat codes fail on any other
    /// node.
    pub fn dev_node(&self) -> Result<DevNode> {
        DevNode::detect(&self.client_version).ok_or_else(|| {
            eyre!(
                "{} doesn't support development cheat codes",
                self.client_version
            )
        })
    }

    pub async fn snapshot(&self) -> Result<U256> {
        self.dev_node()?;
        let id = self.provider.request("evm_snapshot", ()).await?;
        Ok(id)
    }

    pub async fn revert<U: Into<U256>>(&self, id: U) -> Result<()> {
        self.dev_node()?;
        let id = id.into();
        let reverted = self
            .provider
            .request::<[U256; 1], bool>("evm_revert", [id])
            .await?;
        if !reverted {
            return Err(eyre!("couldn't revert to snapshot {}", id));
        }
        Ok(())
    }

    /// Moves the clock forward and mines a block at the new time.
    pub async fn increase_time(&self, seconds: u64) -> Result<()> {
        self.dev_node()?;
        self.provider
            .request::<[u64; 1], Value>("evm_increaseTime", [seconds])
            .await?;
        self.mine(1).await
    }

    pub async fn mine(&self, blocks: u64) -> Result<()> {
        let node = self.dev_node()?;
        self.provider
            .request::<[U256; 1], Value>(&node.method("mine"), [U256::from(blocks)])
            .await?;
        Ok(())
    }

    pub async fn set_balance<U: Into<U256>>(&self, address: Address, balance: U) -> Result<()> {
        let node = self.dev_node()?;
        self.provider
            .request::<(Address, U256), Value>(&node.method("setBalance"), (address, balance.into()))
            .await?;
        Ok(())
    }

    /// Adds ether to an account's existing balance.
    pub async fn deal<U: Into<U256>>(&self, address: Address, amount: U) -> Result<()> {
        let balance = self.provider.get_balance(address, None).await?;
        self.set_balance(address, balance + amount.into()).await
    }

    /// Lets unsigned transactions be sent from `address`.
    pub async fn impersonate(&self, address: Address) -> Result<()> {
        let node = self.dev_node()?;
        self.provider
            .request::<[Address; 1], Value>(&node.method("impersonateAccount"), [address])
            .await?;
        Ok(())
    }

    pub async fn stop_impersonating(&self, address: Address) -> Result<()> {
        let node = self.dev_node()?;
        self.provider
            .request::<[Address; 1], Value>(&node.method("stopImpersonatingAccount"), [address])
            .await?;
        Ok(())
    }

    /// Moves `amount` of `token` from a whale to `receiver` and returns the
    /// receiver's new balance. The whale is impersonated for the duration of
    /// the transfer and given an ether for gas.
    pub async fn acquire_token(
        &self,
        whale: Address,
        token: Address,
        receiver: Address,
        amount: U256,
    ) -> Result<U256> {
        let token = IDetailedERC20::new(token, Arc::new(self.provider()));
        self.impersonate(whale).await?;
        let transfer = async {
            self.deal(whale, *ETH).await?;
            transfer_from(&token, whale, receiver, amount).await
        }
        .await;
        // The whale is released even when funding or the transfer failed.
        self.stop_impersonating(whale).await?;
        transfer?;

        let balance = token.balance_of(receiver).call().await?;
        info!(
            token = ?token.address(),
            ?receiver,
            %balance,
            "acquired tokens from whale"
        );
        Ok(balance)
    }

    /// Derives `num_accounts` accounts from the development mnemonic and
    /// funds each of them with ether.
    pub async fn fund_accounts(&self, num_accounts: usize) -> Result<Vec<LocalWallet>> {
        let chain_id = self.chain_id().await?;
        let mut accounts = vec![];
        for i in 0..num_accounts {
            let account = dev_wallet(i as u32)?.with_chain_id(chain_id);
            self.set_balance(account.address(), *ETH * DEV_ACCOUNT_BALANCE)
                .await?;
            debug!(address = ?account.address(), "funded development account");
            accounts.push(account);
        }
        Ok(accounts)
    }
}

/// The account at `index` of the development mnemonic.
pub fn dev_wallet(index: u32) -> Result<LocalWallet> {
    Ok(MnemonicBuilder::<English>::default()
        .phrase(MNEMONIC)
        .index(index)?
        .build()?)
}

async fn transfer_from(
    token: &IDetailedERC20<Provider<Http>>,
    from: Address,
    to: Address,
    amount: U256,
) -> Result<()> {
    let receipt = token
        .transfer(to, amount)
        .from(from)
        .send()
        .await?
        .await?
        .ok_or_else(|| eyre!("transfer from {:?} was dropped", from))?;
    if receipt.status != Some(1.into()) {
        return Err(eyre!(
            "transfer of {} from {:?} reverted in {:?}",
            amount,
            from,
            receipt.transaction_hash
        ));
    }
    Ok(())
}
