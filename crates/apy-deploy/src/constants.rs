use ethers::{
    signers::LocalWallet,
    types::U256,
    utils::{keccak256, WEI_IN_ETHER},
};

/// The mnemonic behind the accounts that anvil and hardhat fund at genesis.
/// Deployers derived from it only make sense on development nodes.
pub const MNEMONIC: &str = "test test test test test test test test test test test junk";

/// The ether given to each development account.
pub const DEV_ACCOUNT_BALANCE: u64 = 10_000;

lazy_static! {
    pub static ref ETH: U256 = WEI_IN_ETHER;

    // A set of test accounts.
    pub static ref ALICE: LocalWallet = LocalWallet::from_bytes(&keccak256("alice")).unwrap();
    pub static ref BOB: LocalWallet = LocalWallet::from_bytes(&keccak256("bob")).unwrap();
}
