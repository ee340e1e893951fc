//! Well-known external contracts and accounts.
//!
//! These tables are fixed reference data. Deployed APY contracts belong in
//! the address book instead.
use std::collections::BTreeMap;

use ethers::types::Address;
use eyre::{eyre, Result};

use crate::Network;

/// A stablecoin accepted by the APY pools along with the Chainlink
/// aggregator that prices it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAggregator {
    pub symbol: &'static str,
    pub token: Address,
    pub aggregator: Address,
}

/// The protocol contracts tracked in the address book.
pub const CONTRACT_NAMES: &[&str] = &[
    "PoolTokenProxyAdmin",
    "DAI_PoolToken",
    "DAI_PoolTokenProxy",
    "USDC_PoolToken",
    "USDC_PoolTokenProxy",
    "USDT_PoolToken",
    "USDT_PoolTokenProxy",
    "PoolTokenV2",
    "Demo_DAI_PoolTokenProxy",
    "Demo_USDC_PoolTokenProxy",
    "Demo_USDT_PoolTokenProxy",
    "AddressRegistry",
    "AddressRegistryV2",
    "AddressRegistryProxy",
    "AddressRegistryProxyAdmin",
    "GovernanceToken",
    "GovernanceTokenProxy",
    "GovernanceTokenProxyAdmin",
    "MetaPoolToken",
    "MetaPoolTokenProxy",
    "MetaPoolTokenProxyAdmin",
    "OracleAdapter",
    "PoolManager",
    "PoolManagerProxy",
    "PoolManagerProxyAdmin",
    "ProxyConstructorArg",
    "RewardDistributor",
    "TvlManager",
    "AdminSafe",
    "LpSafe",
];

/// The stablecoins backing the APY pools.
pub const STABLECOIN_SYMBOLS: [&str; 3] = ["DAI", "USDC", "USDT"];

fn address(s: &str) -> Address {
    s.parse().unwrap()
}

fn pairs(entries: &[(&'static str, &str)]) -> BTreeMap<&'static str, Address> {
    entries
        .iter()
        .map(|(key, value)| (*key, address(value)))
        .collect()
}

const MAINNET_AGGREGATORS: &[(&str, &str)] = &[
    ("DAI-USD", "0xAed0c38402a5d19df6E4c03F4E2DceD6e29c1ee9"),
    ("USDC-USD", "0x8fFfFfd4AfB6115b954Bd326cbe7B4BA576818f6"),
    ("USDT-USD", "0x3E7d1eAB13ad0104d2750B8863b489D65364e32D"),
    ("ETH-USD", "0x5f4eC3Df9cbd43714FE2740f5E3616155c5b8419"),
    ("DAI-ETH", "0x773616E4d11A78F511299002da57A0a94577F1f4"),
    ("USDC-ETH", "0x986b5E1e1755e3C2440e960477f25201B0a8bbD4"),
    ("USDT-ETH", "0xEe9F2375b4bdF6387aa8265dD4FB8F16512A1d46"),
];

const MAINNET_STABLECOINS: &[(&str, &str, &str)] = &[
    (
        "DAI",
        "0x6B175474E89094C44Da98b954EedeAC495271d0F",
        "0x773616E4d11A78F511299002da57A0a94577F1f4",
    ),
    (
        "USDC",
        "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        "0x986b5E1e1755e3C2440e960477f25201B0a8bbD4",
    ),
    (
        "USDT",
        "0xdAC17F958D2ee523a2206206994597C13D831ec7",
        "0xEe9F2375b4bdF6387aa8265dD4FB8F16512A1d46",
    ),
];

const KOVAN_STABLECOINS: &[(&str, &str, &str)] = &[
    (
        "DAI",
        "0xff795577d9ac8bd7d90ee22b6c1703490b6512fd",
        "0x22B58f1EbEDfCA50feF632bD73368b2FdA96D541",
    ),
    (
        "USDC",
        "0xe22da380ee6b445bb8273c81944adeb6e8450422",
        "0x64EaC61A2DFda2c3Fa04eED49AA33D021AeC8838",
    ),
    (
        "USDT",
        "0x13512979ade267ab5100878e2e0f485b568328a4",
        "0x0bF499444525a23E7Bb61997539725cA2e928138",
    ),
];

fn token_aggregator_list(entries: &[(&'static str, &str, &str)]) -> Vec<TokenAggregator> {
    entries
        .iter()
        .map(|(symbol, token, aggregator)| TokenAggregator {
            symbol,
            token: address(token),
            aggregator: address(aggregator),
        })
        .collect()
}

lazy_static! {
    // Accounts holding plenty of each token. Local forks impersonate these
    // to fund test scenarios. Most stablecoins come out of the sUSD curve
    // pool.
    pub static ref WHALE_POOLS: BTreeMap<&'static str, Address> = pairs(&[
        ("DAI", "0xA5407eAE9Ba41422680e2e00537571bcC53efBfD"),
        ("ADAI", "0x6231bd0147ca6d052b833183037b04cfb2090e5c"),
        ("USDC", "0xA5407eAE9Ba41422680e2e00537571bcC53efBfD"),
        ("USDT", "0xA5407eAE9Ba41422680e2e00537571bcC53efBfD"),
        ("ALUSD", "0x43b4fdfd4ff969587185cdb6f0bd875c5fc83f8c"),
        ("BUSD", "0x4807862aa8b2bf68830e4c8dc86d0e9a998e085a"),
        ("CDAI", "0x6341c289b2e0795a04223df04b53a77970958723"),
        ("FRAX", "0xc69ddcd4dfef25d8a793241834d4cc4b3668ead6"),
        ("CYDAI", "0x2dded6da1bf5dbdf597c45fcfaa3194e53ecfeaf"),
        ("LUSD", "0x66017d22b0f8556afdd19fc67041899eb65a21bb"),
        ("MUSD", "0xe2f2a5C287993345a840Db3B0845fbC70f5935a5"),
        ("SUSD", "0x57Ab1ec28D129707052df4dF418D58a2D46d5f51"),
        ("USDN", "0x674C6Ad92Fd080e4004b2312b45f796a192D27a0"),
        ("USDP", "0x42d7025938bec20b69cbae5a77421082407f053a"),
        ("UST", "0xa47c8bf37f92aBed4A126BDA807A7b7498661acD"),
    ]);

    // Chainlink aggregators by network and price pair. The local TVL
    // aggregator address is only deterministic when `deploy_tvl_aggregator`
    // is the first transaction sent by the development deployer.
    pub static ref AGG_MAP: BTreeMap<Network, BTreeMap<&'static str, Address>> = {
        let mainnet = pairs(MAINNET_AGGREGATORS);
        let local = {
            let mut local = mainnet.clone();
            local.insert("TVL", address("0x344D5d70fc3c3097f82d1F26464aaDcEb30C6AC7"));
            local
        };
        let mut map = BTreeMap::new();
        map.insert(Network::Mainnet, {
            let mut mainnet = mainnet.clone();
            mainnet.insert("TVL", address("0xDb299D394817D8e7bBe297E84AFfF7106CF92F5f"));
            mainnet
        });
        map.insert(Network::Kovan, pairs(&[
            ("TVL", "0xCAFECAFECAFECAFECAFECAFECAFECAFECAFECAFE"),
            ("DAI-USD", "0x777A68032a88E5A84678A77Af2CD65A7b3c0775a"),
            ("USDC-USD", "0x9211c6b3BF41A10F78539810Cf5c64e1BB78Ec60"),
            ("USDT-USD", "0x2ca5A90D34cA333661083F89D831f757A9A50148"),
            ("ETH-USD", "0x9326BFA02ADD2366b30bacB125260Af641031331"),
            ("DAI-ETH", "0x22B58f1EbEDfCA50feF632bD73368b2FdA96D541"),
            ("USDC-ETH", "0x64EaC61A2DFda2c3Fa04eED49AA33D021AeC8838"),
            ("USDT-ETH", "0x0bF499444525a23E7Bb61997539725cA2e928138"),
        ]));
        map.insert(Network::Localhost, local.clone());
        map.insert(Network::Testnet, local);
        map
    };

    // The pool stablecoins and their ETH-denominated aggregators.
    pub static ref TOKEN_AGG_MAP: BTreeMap<Network, Vec<TokenAggregator>> = {
        let mut map = BTreeMap::new();
        map.insert(Network::Mainnet, token_aggregator_list(MAINNET_STABLECOINS));
        map.insert(Network::Kovan, token_aggregator_list(KOVAN_STABLECOINS));
        map.insert(Network::Localhost, token_aggregator_list(MAINNET_STABLECOINS));
        map.insert(Network::Testnet, token_aggregator_list(MAINNET_STABLECOINS));
        map
    };

    /// Maker DAO. See https://changelog.makerdao.com/releases/mainnet/latest/contracts.json.
    pub static ref DAI_ADDRESS: Address = address("0x6B175474E89094C44Da98b954EedeAC495271d0F");
    pub static ref DAI_MINTER_ADDRESS: Address = address("0x9759A6Ac90977b93B58547b4A71c78317f391A28");
    pub static ref CDAI_ADDRESS: Address = address("0x5d3a536e4d6dbd6114cc1ead35777bab948e3643");

    /// Compound Finance.
    pub static ref COMPTROLLER_ADDRESS: Address = address("0x3d9819210a31b4961b30ef54be2aed79b9c9cd3b");
    pub static ref COMP_ADDRESS: Address = address("0xc00e94Cb662C3520282E6f5717214004A7f26888");

    /// 1inch OneSplit (1proto.eth). This contract moves around; if calls fail
    /// with "no code at address", check the current 1proto.eth resolution.
    pub static ref ONE_SPLIT_ADDRESS: Address = address("0x50FDA034C0Ce7a8f7EFDAebDA7Aa7cA21CC1267e");

    pub static ref USDC_ADDRESS: Address = address("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    pub static ref BAL_ADDRESS: Address = address("0xba100000625a3754423978a60c9317c58a424e3D");
    pub static ref CRV_ADDRESS: Address = address("0xD533a949740bb3306d119CC777fa900bA034cd52");

    /// Chainlink's LINK token, used to pay aggregator oracles.
    pub static ref LINK_ADDRESS: Address = address("0x514910771AF9Ca656af840dff83E8264EcF986CA");
    /// The Aave lending pool holds plenty of LINK.
    pub static ref LINK_WHALE_ADDRESS: Address = address("0x3dfd23A6c5E8BbcFc9581d2E864a68feb6a076d3");

    /// Liquidity mining contracts for the governance token. These were
    /// deployed by hand rather than through the scripts.
    pub static ref BALANCER_STAKING_ADDRESS: Address = address("0xFe82ea0Ef14DfdAcd5dB1D49F563497A1a751bA1");
    pub static ref UNISWAP_STAKING_ADDRESS: Address = address("0x0310DEE97b42063BbB46d02a674727C13eb79cFD");

    /// The mainnet address registry that alpha deployments upgrade in place.
    pub static ref MAINNET_ADDRESS_REGISTRY: Address = address("0x7EC81B7035e91f8435BdEb2787DCBd51116Ad303");

    // Placeholder addresses for tests that need an address without code.
    pub static ref FAKE_ADDRESS: Address = address("0xCAFECAFECAFECAFECAFECAFECAFECAFECAFECAFE");
    pub static ref ANOTHER_FAKE_ADDRESS: Address = address("0xBAADC0FFEEBAADC0FFEEBAADC0FFEEBAADC0FFEE");
}

/// The whale used to source a token on mainnet forks.
pub fn whale_address(symbol: &str) -> Result<Address> {
    WHALE_POOLS
        .get(symbol.to_uppercase().as_str())
        .copied()
        .ok_or_else(|| eyre!("no whale registered for {}", symbol))
}

/// The Chainlink aggregator for a price pair such as `DAI-USD` or `TVL`.
pub fn aggregator_address(network: Network, pair: &str) -> Result<Address> {
    AGG_MAP
        .get(&network)
        .and_then(|aggregators| aggregators.get(pair.to_uppercase().as_str()))
        .copied()
        .ok_or_else(|| eyre!("no {} aggregator registered for {}", pair, network))
}

/// The pool stablecoins registered on a network.
pub fn token_aggregators(network: Network) -> Result<&'static [TokenAggregator]> {
    TOKEN_AGG_MAP
        .get(&network)
        .map(Vec::as_slice)
        .ok_or_else(|| eyre!("no stablecoins registered for {}", network))
}

/// The address of a pool stablecoin on a network.
pub fn stablecoin_address(symbol: &str, network: Network) -> Result<Address> {
    let symbol = symbol.to_uppercase();
    token_aggregators(network)?
        .iter()
        .find(|entry| entry.symbol == symbol)
        .map(|entry| entry.token)
        .ok_or_else(|| eyre!("no {} stablecoin registered for {}", symbol, network))
}
