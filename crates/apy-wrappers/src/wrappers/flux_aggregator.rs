use ethers::prelude::abigen;

// The Chainlink aggregator backing the TVL feed. Oracles are paid in LINK
// out of the aggregator's own balance.
abigen!(
    FluxAggregator,
    r#"[
        function decimals() external view returns (uint8)
        function description() external view returns (string)
        function latestRoundData() external view returns (uint80 roundId, int256 answer, uint256 startedAt, uint256 updatedAt, uint80 answeredInRound)
        function linkToken() external view returns (address)
        function paymentAmount() external view returns (uint128)
        function availableFunds() external view returns (uint128)
        function updateAvailableFunds() external
        function getOracles() external view returns (address[])
        function changeOracles(address[] removed, address[] added, address[] addedAdmins, uint32 minSubmissions, uint32 maxSubmissions, uint32 restartDelay) external
        function submit(uint256 roundId, int256 submission) external
        event AvailableFundsUpdated(uint256 indexed amount)
        event OraclePermissionsUpdated(address indexed oracle, bool indexed whitelisted)
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
