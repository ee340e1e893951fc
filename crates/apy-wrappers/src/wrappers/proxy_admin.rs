use ethers::prelude::abigen;

abigen!(
    ProxyAdmin,
    r#"[
        function owner() external view returns (address)
        function transferOwnership(address newOwner) external
        function getProxyAdmin(address proxy) external view returns (address)
        function getProxyImplementation(address proxy) external view returns (address)
        function upgrade(address proxy, address implementation) external
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
