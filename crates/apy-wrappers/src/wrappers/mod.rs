pub mod address_registry;
pub mod aggregator_v3;
pub mod detailed_erc20;
pub mod flux_aggregator;
pub mod pool_manager;
pub mod pool_token;
pub mod proxy_admin;
pub mod reward_distributor;
pub mod staking_rewards;
