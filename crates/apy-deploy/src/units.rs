use ethers::{
    types::U256,
    utils::{format_bytes32_string, format_units, parse_bytes32_string, parse_units},
};
use eyre::Result;

/// Converts a decimal amount such as `"100000"` or `"1.5"` into the token's
/// base units.
pub fn token_amount<S: ToString>(amount: S, decimals: u32) -> Result<U256> {
    Ok(parse_units(amount, decimals)?.into())
}

/// Renders base units as a decimal amount.
pub fn format_token_amount(amount: U256, decimals: u32) -> Result<String> {
    Ok(format_units(amount, decimals)?)
}

/// Encodes an identifier as a right padded `bytes32`, the format used for
/// strategy and registry ids. Identifiers longer than 32 bytes are an error.
pub fn bytes32(text: &str) -> Result<[u8; 32]> {
    Ok(format_bytes32_string(text)?)
}

/// Decodes a right padded `bytes32` identifier.
pub fn parse_bytes32(id: &[u8; 32]) -> Result<String> {
    Ok(parse_bytes32_string(id)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_amount() -> Result<()> {
        assert_eq!(
            token_amount("100000", 6)?,
            U256::from(100_000u64) * U256::exp10(6)
        );
        assert_eq!(
            token_amount("100000000", 18)?,
            U256::from(100_000_000u64) * U256::exp10(18)
        );
        assert_eq!(token_amount("1.5", 18)?, U256::from(15u64) * U256::exp10(17));
        assert_eq!(token_amount(35_000, 18)?, U256::from(35_000u64) * U256::exp10(18));
        assert!(token_amount("lots", 18).is_err());
        Ok(())
    }

    #[test]
    fn test_format_token_amount() -> Result<()> {
        assert_eq!(format_token_amount(U256::from(1_500_000u64), 6)?, "1.500000");
        assert_eq!(
            format_token_amount(U256::exp10(18), 18)?,
            "1.000000000000000000"
        );
        Ok(())
    }

    #[test]
    fn test_bytes32() -> Result<()> {
        let id = bytes32("curve_y")?;
        assert_eq!(&id[..7], b"curve_y");
        assert!(id[7..].iter().all(|byte| *byte == 0));
        assert_eq!(parse_bytes32(&id)?, "curve_y");

        assert!(bytes32(&"x".repeat(32)).is_ok());
        assert!(bytes32(&"x".repeat(33)).is_err());
        Ok(())
    }
}
