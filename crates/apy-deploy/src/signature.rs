//! EIP-712 signatures authorizing reward claims.
//!
//! The reward distributor pays out a claim only when it carries a signature
//! from the distributor's configured signer over the `Recipient` struct. The
//! account nonce makes every signature single use.
use ethers::{
    signers::{LocalWallet, Signer},
    types::{
        transaction::eip712::{Eip712, TypedData},
        Address, Signature, H256, U256,
    },
};
use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DOMAIN_NAME: &str = "APY Distribution";
pub const DOMAIN_VERSION: &str = "1";

/// The claim a recipient submits to the reward distributor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardClaim {
    pub nonce: U256,
    pub wallet: Address,
    pub amount: U256,
}

/// A signature split the way the distributor's `claim` expects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimSignature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// The EIP-712 digest that was signed.
    pub digest: H256,
    signature: Signature,
}

impl ClaimSignature {
    /// Recovers the address that produced the signature.
    pub fn recover(&self) -> Result<Address> {
        Ok(self.signature.recover(self.digest)?)
    }
}

pub fn reward_claim_typed_data(
    distributor: Address,
    chain_id: u64,
    claim: &RewardClaim,
) -> Result<TypedData> {
    let typed_data = json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" }
            ],
            "Recipient": [
                { "name": "nonce", "type": "uint256" },
                { "name": "wallet", "type": "address" },
                { "name": "amount", "type": "uint256" }
            ]
        },
        "primaryType": "Recipient",
        "domain": {
            "name": DOMAIN_NAME,
            "version": DOMAIN_VERSION,
            "chainId": chain_id,
            "verifyingContract": format!("{:?}", distributor)
        },
        "message": {
            "nonce": claim.nonce.to_string(),
            "wallet": format!("{:?}", claim.wallet),
            "amount": claim.amount.to_string()
        }
    });
    Ok(serde_json::from_value(typed_data)?)
}

pub async fn sign_reward_claim(
    signer: &LocalWallet,
    distributor: Address,
    chain_id: u64,
    claim: &RewardClaim,
) -> Result<ClaimSignature> {
    let typed_data = reward_claim_typed_data(distributor, chain_id, claim)?;
    let digest = H256::from(typed_data.encode_eip712()?);
    let signature = signer.sign_typed_data(&typed_data).await?;

    let mut r = [0; 32];
    let mut s = [0; 32];
    signature.r.to_big_endian(&mut r);
    signature.s.to_big_endian(&mut s);
    Ok(ClaimSignature {
        v: u8::try_from(signature.v)?,
        r,
        s,
        digest,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ALICE, BOB};

    fn claim() -> RewardClaim {
        RewardClaim {
            nonce: U256::zero(),
            wallet: BOB.address(),
            amount: U256::exp10(18) * 1_000,
        }
    }

    #[test]
    fn test_typed_data() -> Result<()> {
        let distributor = Address::from_low_u64_be(0xd157);
        let typed_data = reward_claim_typed_data(distributor, 1, &claim())?;
        assert_eq!(typed_data.primary_type, "Recipient");
        assert_eq!(typed_data.domain.name.as_deref(), Some(DOMAIN_NAME));
        assert_eq!(typed_data.domain.version.as_deref(), Some(DOMAIN_VERSION));
        assert_eq!(typed_data.domain.chain_id, Some(U256::one()));
        assert_eq!(typed_data.domain.verifying_contract, Some(distributor));
        Ok(())
    }

    #[tokio::test]
    async fn test_signature_recovers_signer() -> Result<()> {
        let distributor = Address::from_low_u64_be(0xd157);
        let signature = sign_reward_claim(&ALICE, distributor, 1, &claim()).await?;
        assert_eq!(signature.recover()?, ALICE.address());
        assert!(signature.v == 27 || signature.v == 28);
        assert_ne!(signature.r, [0; 32]);
        assert_ne!(signature.s, [0; 32]);
        Ok(())
    }

    #[tokio::test]
    async fn test_digest_is_bound_to_domain_and_claim() -> Result<()> {
        let distributor = Address::from_low_u64_be(0xd157);
        let mainnet = sign_reward_claim(&ALICE, distributor, 1, &claim()).await?;
        let kovan = sign_reward_claim(&ALICE, distributor, 42, &claim()).await?;
        assert_ne!(mainnet.digest, kovan.digest);

        let other = sign_reward_claim(&ALICE, Address::from_low_u64_be(1), 1, &claim()).await?;
        assert_ne!(mainnet.digest, other.digest);

        let mut next = claim();
        next.nonce = U256::one();
        let next = sign_reward_claim(&ALICE, distributor, 1, &next).await?;
        assert_ne!(mainnet.digest, next.digest);

        // Signing is deterministic.
        let again = sign_reward_claim(&ALICE, distributor, 1, &claim()).await?;
        assert_eq!(mainnet, again);
        Ok(())
    }
}
