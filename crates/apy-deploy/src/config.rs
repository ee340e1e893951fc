use std::path::PathBuf;

use apy_addresses::Network;
use serde::Deserialize;

fn default_network() -> Network {
    Network::Localhost
}

fn default_address_book() -> PathBuf {
    PathBuf::from("deployed_addresses.json")
}

fn default_artifacts() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_confirmations() -> usize {
    1
}

/// Script configuration, read from `APY_`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_network")]
    pub network: Network,
    /// Spawns an anvil node when unset.
    pub ethereum_url: Option<String>,
    pub fork_url: Option<String>,
    pub private_key: Option<String>,
    pub mnemonic: Option<String>,
    #[serde(default)]
    pub mnemonic_index: u32,
    #[serde(default = "default_address_book")]
    pub address_book: PathBuf,
    /// A published address book layered under the local one.
    pub address_book_url: Option<String>,
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,
    /// Gas price in gwei.
    pub gas_price: Option<f64>,
    pub gas_oracle_url: Option<String>,
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(envy::prefixed("APY_").from_env::<Config>()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: default_network(),
            ethereum_url: None,
            fork_url: None,
            private_key: None,
            mnemonic: None,
            mnemonic_index: 0,
            address_book: default_address_book(),
            address_book_url: None,
            artifacts: default_artifacts(),
            gas_price: None,
            gas_oracle_url: None,
            confirmations: default_confirmations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use eyre::Result;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = envy::prefixed("APY_").from_iter::<_, Config>(vars(&[("PATH", "/bin")]))?;
        assert_eq!(config.network, Network::Localhost);
        assert_eq!(config.ethereum_url, None);
        assert_eq!(config.mnemonic_index, 0);
        assert_eq!(config.address_book, PathBuf::from("deployed_addresses.json"));
        assert_eq!(config.artifacts, PathBuf::from("artifacts"));
        assert_eq!(config.confirmations, 1);
        assert_eq!(config.gas_price, None);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let config = envy::prefixed("APY_").from_iter::<_, Config>(vars(&[
            ("APY_NETWORK", "MAINNET"),
            ("APY_ETHEREUM_URL", "http://localhost:8545"),
            ("APY_MNEMONIC_INDEX", "3"),
            ("APY_ADDRESS_BOOK", "/tmp/book.json"),
            ("APY_GAS_PRICE", "42.5"),
            ("APY_CONFIRMATIONS", "5"),
        ]))?;
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.ethereum_url.as_deref(), Some("http://localhost:8545"));
        assert_eq!(config.mnemonic_index, 3);
        assert_eq!(config.address_book, PathBuf::from("/tmp/book.json"));
        assert_eq!(config.gas_price, Some(42.5));
        assert_eq!(config.confirmations, 5);
        Ok(())
    }

    #[test]
    fn test_unknown_network() {
        let result = envy::prefixed("APY_").from_iter::<_, Config>(vars(&[("APY_NETWORK", "ropsten")]));
        assert!(result.is_err());
    }
}
