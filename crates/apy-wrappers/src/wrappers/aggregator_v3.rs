use ethers::prelude::abigen;

abigen!(
    AggregatorV3Interface,
    r#"[
        function decimals() external view returns (uint8)
        function description() external view returns (string)
        function version() external view returns (uint256)
        function latestRoundData() external view returns (uint80 roundId, int256 answer, uint256 startedAt, uint256 updatedAt, uint80 answeredInRound)
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
