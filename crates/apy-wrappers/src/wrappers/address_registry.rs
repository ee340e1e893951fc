use ethers::prelude::abigen;

abigen!(
    AddressRegistryV2,
    r#"[
        function owner() external view returns (address)
        function transferOwnership(address newOwner) external
        function getIds() external view returns (bytes32[])
        function getAddress(bytes32 id) external view returns (address)
        function registerAddress(bytes32 id, address addr) external
        event AddressRegistered(bytes32 id, address addr)
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
