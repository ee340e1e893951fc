use ethers::prelude::abigen;

abigen!(
    PoolToken,
    r#"[
        function underlyer() external view returns (address)
        function balanceOf(address account) external view returns (uint256)
        function totalSupply() external view returns (uint256)
        function getUnderlyerAmount(uint256 aptAmount) external view returns (uint256)
        function calculateMintAmount(uint256 depositAmount) external view returns (uint256)
        function addLiquidity(uint256 depositAmount) external
        function redeem(uint256 aptAmount) external
        event DepositedAPT(address indexed sender, address token, uint256 tokenAmount, uint256 aptMintAmount, uint256 tokenEthValue, uint256 totalEthValueLocked)
        event RedeemedAPT(address indexed sender, address token, uint256 redeemedTokenAmount, uint256 aptRedeemAmount, uint256 tokenEthValue, uint256 totalEthValueLocked)
    ]"#,
    derives(serde::Serialize, serde::Deserialize);
);
