use ethers::prelude::abigen;

abigen!(
    PoolManager,
    r#"[
        function owner() external view returns (address)
        function getStrategy(bytes32 id) external view returns (address)
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
