use ethers::prelude::abigen;

abigen!(
    RewardDistributor,
    r#"[
        struct Recipient { uint256 nonce; address wallet; uint256 amount; }
        function apyToken() external view returns (address)
        function signer() external view returns (address)
        function accountNonces(address account) external view returns (uint256)
        function setSigner(address newSigner) external
        function claim(Recipient recipient, uint8 v, bytes32 r, bytes32 s) external
        event Claimed(uint256 nonce, address recipient, uint256 amount)
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
