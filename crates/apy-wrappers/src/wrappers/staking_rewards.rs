use ethers::prelude::abigen;

abigen!(
    StakingRewards,
    r#"[
        function rewardsToken() external view returns (address)
        function rewardsDistribution() external view returns (address)
        function rewardRate() external view returns (uint256)
        function periodFinish() external view returns (uint256)
        function notifyRewardAmount(uint256 reward) external
        event RewardAdded(uint256 reward)
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
