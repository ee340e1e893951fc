use std::{env, sync::Arc};

use apy_addresses::{AddressBook, LayeredAddressBook, Network};
use ethers::{
    abi::{Detokenize, Token},
    contract::ContractCall,
    providers::Middleware,
    signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, Signer},
    types::{Address, TransactionReceipt, TxHash, U256},
    utils::format_ether,
};
use eyre::{eyre, Result, WrapErr};
use tracing::{info, warn};

use crate::{
    artifacts::{Artifacts, Deployment},
    chain::{dev_wallet, Chain, ChainClient},
    config::Config,
    constants::{DEV_ACCOUNT_BALANCE, ETH},
    gas::GasPriceOracle,
    infra::query_address_book,
    logging::init_logging,
};

/// Everything a script needs: the network it targets, a connection, the
/// deployer's client, the compiled artifacts and the address book.
///
/// The address book is the local file layered over the published book when
/// `APY_ADDRESS_BOOK_URL` is set. Deployments only ever land in the file.
pub struct ScriptContext {
    pub config: Config,
    pub network: Network,
    pub chain: Chain,
    pub deployer: Arc<ChainClient<LocalWallet>>,
    pub artifacts: Artifacts,
    pub address_book: LayeredAddressBook,
    chain_id: u64,
    gas_oracle: GasPriceOracle,
    gas_used: U256,
}

impl ScriptContext {
    /// Loads `.env`, installs logging and builds a context from the `APY_*`
    /// environment variables.
    pub async fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        init_logging();
        Self::new(Config::from_env()?).await
    }

    pub async fn new(config: Config) -> Result<Self> {
        let network = config.network;
        info!("{} selected", network);

        let chain = Chain::connect(config.ethereum_url.clone(), config.fork_url.clone()).await?;
        let chain_id = chain.chain_id().await?;
        if chain_id != network.chain_id() {
            warn!(
                expected = network.chain_id(),
                actual = chain_id,
                "the node's chain id doesn't match {}",
                network
            );
        }

        let wallet = deployer_wallet(&config, &chain).await?;
        let deployer = chain.client(wallet).await?;

        let published = match &config.address_book_url {
            Some(url) => query_address_book(url).await?,
            None => AddressBook::default(),
        };
        let address_book = LayeredAddressBook::open(&config.address_book, published)?;

        let balance = chain.provider().get_balance(deployer.address(), None).await?;
        info!(
            address = ?deployer.address(),
            balance = %format_ether(balance),
            "deployer"
        );

        Ok(Self {
            network,
            chain,
            deployer,
            artifacts: Artifacts::new(&config.artifacts),
            address_book,
            chain_id,
            gas_oracle: GasPriceOracle::new(config.gas_price, config.gas_oracle_url.clone()),
            gas_used: U256::zero(),
            config,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn deployer_address(&self) -> Address {
        self.deployer.address()
    }

    /// The address recorded for `name` on the current network.
    pub fn deployed(&self, name: &str) -> Result<Address> {
        self.address_book.address(self.network.key(), name)
    }

    pub fn explorer_link(&self, hash: TxHash) -> String {
        self.network.explorer_tx_url(hash)
    }

    pub async fn gas_price(&self) -> Result<Option<U256>> {
        self.gas_oracle.gas_price().await
    }

    pub async fn ether_balance(&self, address: Address) -> Result<U256> {
        Ok(self.chain.provider().get_balance(address, None).await?)
    }

    /// The gas used by every deployment and transaction sent through this
    /// context so far.
    pub fn total_gas_used(&self) -> U256 {
        self.gas_used
    }

    /// A role wallet derived from the mnemonic in `var`.
    pub fn wallet_from_env(&self, var: &str) -> Result<LocalWallet> {
        let mnemonic = env::var(var).wrap_err_with(|| format!("must set {}", var))?;
        let wallet = MnemonicBuilder::<English>::default()
            .phrase(mnemonic.trim())
            .build()
            .wrap_err_with(|| format!("{} isn't a valid mnemonic", var))?;
        Ok(wallet.with_chain_id(self.chain_id))
    }

    pub async fn client(&self, wallet: LocalWallet) -> Result<Arc<ChainClient<LocalWallet>>> {
        self.chain.client(wallet).await
    }

    pub async fn deploy(&mut self, name: &str, args: Vec<Token>) -> Result<Deployment> {
        self.deploy_with(self.deployer.clone(), name, args).await
    }

    /// Deploys `name` from the artifacts using `client` as the sender.
    pub async fn deploy_with<M: Middleware + 'static>(
        &mut self,
        client: Arc<M>,
        name: &str,
        args: Vec<Token>,
    ) -> Result<Deployment> {
        let artifact = self.artifacts.load(name)?;
        let gas_price = self.gas_price().await?;
        info!("deploying {}", name);
        let deployment = artifact
            .deploy(client, args, gas_price)
            .await
            .wrap_err_with(|| format!("couldn't deploy {}", name))?;
        info!(
            address = ?deployment.address,
            link = %self.explorer_link(deployment.transaction_hash),
            gas_used = %deployment.gas_used,
            "deployed {}",
            name
        );
        self.gas_used += deployment.gas_used;
        Ok(deployment)
    }

    /// Records deployments for the current network and persists the book so
    /// that a failed script can be resumed.
    pub fn record<I, S>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Address)>,
        S: AsRef<str>,
    {
        self.address_book.record(self.network.key(), entries)
    }

    /// Sends a contract call and waits for its receipt. Dropped and reverted
    /// transactions are errors.
    pub async fn send<M: Middleware + 'static, D: Detokenize>(
        &mut self,
        label: &str,
        call: ContractCall<M, D>,
    ) -> Result<TransactionReceipt> {
        let call = match self.gas_price().await? {
            Some(gas_price) => call.legacy().gas_price(gas_price),
            None => call,
        };
        let pending = call
            .send()
            .await
            .wrap_err_with(|| format!("couldn't send {}", label))?;
        let hash = *pending;
        info!(link = %self.explorer_link(hash), "sent {}", label);

        let receipt = pending
            .confirmations(self.config.confirmations)
            .await?
            .ok_or_else(|| eyre!("{} transaction {:?} was dropped", label, hash))?;
        if receipt.status != Some(1.into()) {
            return Err(eyre!("{} reverted in {:?}", label, hash));
        }
        self.gas_used += receipt.gas_used.unwrap_or_default();
        Ok(receipt)
    }
}

/// Picks the deployer: an explicit private key, then a mnemonic. Without
/// either a development account is funded, which only works on dev nodes.
async fn deployer_wallet(config: &Config, chain: &Chain) -> Result<LocalWallet> {
    if let Some(private_key) = &config.private_key {
        return private_key
            .trim()
            .parse::<LocalWallet>()
            .wrap_err("APY_PRIVATE_KEY isn't a valid private key");
    }
    if let Some(mnemonic) = &config.mnemonic {
        return MnemonicBuilder::<English>::default()
            .phrase(mnemonic.trim())
            .index(config.mnemonic_index)?
            .build()
            .wrap_err("APY_MNEMONIC isn't a valid mnemonic");
    }

    chain
        .dev_node()
        .wrap_err("set APY_PRIVATE_KEY or APY_MNEMONIC to deploy to a public node")?;
    let wallet = dev_wallet(config.mnemonic_index)?;
    chain
        .set_balance(wallet.address(), *ETH * DEV_ACCOUNT_BALANCE)
        .await?;
    Ok(wallet)
}
