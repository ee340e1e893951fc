use std::{fmt, str::FromStr};

use ethers::types::H256;
use eyre::{eyre, Error, Result};
use serde::{Deserialize, Serialize};

/// The networks the APY contracts are deployed to.
///
/// `Localhost` and `Testnet` are forks of mainnet, so they share mainnet's
/// chain id and external contract addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Network {
    Mainnet,
    Rinkeby,
    Goerli,
    Kovan,
    Localhost,
    Testnet,
}

impl Network {
    pub const ALL: [Network; 6] = [
        Network::Mainnet,
        Network::Rinkeby,
        Network::Goerli,
        Network::Kovan,
        Network::Localhost,
        Network::Testnet,
    ];

    /// The key used for this network in the address book and registries.
    pub fn key(&self) -> &'static str {
        match self {
            Network::Mainnet => "MAINNET",
            Network::Rinkeby => "RINKEBY",
            Network::Goerli => "GOERLI",
            Network::Kovan => "KOVAN",
            Network::Localhost => "LOCALHOST",
            Network::Testnet => "TESTNET",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet | Network::Localhost | Network::Testnet => 1,
            Network::Rinkeby => 4,
            Network::Goerli => 5,
            Network::Kovan => 42,
        }
    }

    /// Public networks get extra confirmations after deployments so that the
    /// block explorer has indexed the contract before verification.
    pub fn is_public(&self) -> bool {
        matches!(self, Network::Mainnet | Network::Kovan)
    }

    /// A block explorer link for a transaction. Forks link to mainnet's
    /// explorer since that is where their history lives.
    pub fn explorer_tx_url(&self, hash: H256) -> String {
        let host = match self {
            Network::Mainnet | Network::Localhost | Network::Testnet => "etherscan.io",
            Network::Rinkeby => "rinkeby.etherscan.io",
            Network::Goerli => "goerli.etherscan.io",
            Network::Kovan => "kovan.etherscan.io",
        };
        format!("https://{}/tx/{:?}", host, hash)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = crate::network_key(s);
        Network::ALL
            .into_iter()
            .find(|network| network.key() == key)
            .ok_or_else(|| {
                eyre!(
                    "unsupported network {:?}, expected one of {}",
                    s,
                    Network::ALL.map(|n| n.key()).join(", ")
                )
            })
    }
}

impl TryFrom<String> for Network {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Network> for String {
    fn from(network: Network) -> Self {
        network.key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() -> Result<()> {
        assert_eq!("mainnet".parse::<Network>()?, Network::Mainnet);
        assert_eq!("KOVAN".parse::<Network>()?, Network::Kovan);
        assert_eq!(" Localhost".parse::<Network>()?, Network::Localhost);

        let err = "ropsten".parse::<Network>().unwrap_err();
        assert!(err.to_string().contains("ropsten"));
        assert!(err.to_string().contains("MAINNET"));
        Ok(())
    }

    #[test]
    fn test_serde() -> Result<()> {
        assert_eq!(serde_json::to_string(&Network::Kovan)?, "\"KOVAN\"");
        assert_eq!(serde_json::from_str::<Network>("\"localhost\"")?, Network::Localhost);
        assert!(serde_json::from_str::<Network>("\"ropsten\"").is_err());
        Ok(())
    }

    #[test]
    fn test_display_round_trips() -> Result<()> {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>()?, network);
        }
        Ok(())
    }

    #[test]
    fn test_chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), 1);
        assert_eq!(Network::Rinkeby.chain_id(), 4);
        assert_eq!(Network::Goerli.chain_id(), 5);
        assert_eq!(Network::Kovan.chain_id(), 42);
        // Local networks fork mainnet.
        assert_eq!(Network::Localhost.chain_id(), 1);
        assert_eq!(Network::Testnet.chain_id(), 1);
    }

    #[test]
    fn test_public_networks() {
        let public = Network::ALL
            .into_iter()
            .filter(Network::is_public)
            .collect::<Vec<_>>();
        assert_eq!(public, vec![Network::Mainnet, Network::Kovan]);
    }

    #[test]
    fn test_explorer_links() {
        let hash = H256::repeat_byte(0xab);
        assert_eq!(
            Network::Kovan.explorer_tx_url(hash),
            format!("https://kovan.etherscan.io/tx/0x{}", "ab".repeat(32))
        );
        assert!(Network::Localhost
            .explorer_tx_url(hash)
            .starts_with("https://etherscan.io/tx/0x"));
    }
}
