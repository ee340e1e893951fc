//! Compiled contract artifacts. Contracts are compiled outside of this
//! workspace by Hardhat or Foundry; deployments only need the ABI and the
//! creation bytecode from the resulting JSON files.
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use ethers::{
    abi::{Abi, Token},
    contract::ContractFactory,
    providers::Middleware,
    types::{Address, Bytes, TxHash, U256},
};
use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hardhat(String),
    Foundry { object: String },
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: Abi,
    bytecode: RawBytecode,
}

/// A directory tree of compiled artifacts.
#[derive(Clone, Debug)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds `<name>.json` anywhere under the root. Hardhat writes a
    /// `<name>.dbg.json` file next to every artifact which is skipped.
    pub fn find(&self, name: &str) -> Result<PathBuf> {
        let file_name = format!("{}.json", name);
        find_file(&self.root, &file_name)?.ok_or_else(|| {
            eyre!(
                "no artifact for {} under {}",
                name,
                self.root.display()
            )
        })
    }

    pub fn load(&self, name: &str) -> Result<ContractArtifact> {
        let path = self.find(name)?;
        let json = fs::read_to_string(&path)?;
        ContractArtifact::from_json(name, &json)
            .wrap_err_with(|| format!("couldn't load artifact {}", path.display()))
    }
}

fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .wrap_err_with(|| format!("couldn't read artifacts directory {}", dir.display()))?
        .collect::<Result<Vec<_>, _>>()?;
    // Sorting keeps the search deterministic when a name appears twice.
    entries.sort_by_key(|entry| entry.path());
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        } else if path.file_name().and_then(|name| name.to_str()) == Some(file_name) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// The result of a successful deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: TxHash,
    pub gas_used: U256,
}

#[derive(Clone, Debug)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parses a Hardhat (`"bytecode": "0x.."`) or Foundry
    /// (`"bytecode": { "object": "0x.." }`) artifact.
    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json)?;
        let bytecode = match raw.bytecode {
            RawBytecode::Hardhat(bytecode) => bytecode,
            RawBytecode::Foundry { object } => object,
        };
        let bytecode = bytecode
            .parse::<Bytes>()
            .map_err(|err| eyre!("invalid bytecode for {}: {}", name, err))?;
        if bytecode.is_empty() {
            return Err(eyre!(
                "{} has no bytecode; interfaces and abstract contracts can't be deployed",
                name
            ));
        }
        Ok(Self {
            name: name.to_string(),
            abi: raw.abi,
            bytecode,
        })
    }

    /// Deploys the contract with ABI encoded constructor arguments. A fixed
    /// gas price forces a legacy transaction.
    pub async fn deploy<M: Middleware + 'static>(
        &self,
        client: Arc<M>,
        args: Vec<Token>,
        gas_price: Option<U256>,
    ) -> Result<Deployment> {
        let factory = ContractFactory::new(self.abi.clone(), self.bytecode.clone(), client);
        let mut deployer = factory.deploy_tokens(args)?;
        if let Some(gas_price) = gas_price {
            deployer = deployer.legacy();
            deployer.tx.set_gas_price(gas_price);
        }
        let (contract, receipt) = deployer.send_with_receipt().await?;
        debug!(name = %self.name, address = ?contract.address(), "deployed");
        Ok(Deployment {
            address: contract.address(),
            transaction_hash: receipt.transaction_hash,
            gas_used: receipt.gas_used.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    const ABI: &str = r#"[
        {
            "inputs": [{ "internalType": "address", "name": "token", "type": "address" }],
            "stateMutability": "nonpayable",
            "type": "constructor"
        }
    ]"#;

    fn scratch_dir() -> PathBuf {
        let suffix: u64 = rand::thread_rng().gen();
        std::env::temp_dir().join(format!("apy-artifacts-{suffix}"))
    }

    #[test]
    fn test_hardhat_artifact() -> Result<()> {
        let json = format!(
            r#"{{ "contractName": "ProxyAdmin", "abi": {}, "bytecode": "0x6080604052" }}"#,
            ABI
        );
        let artifact = ContractArtifact::from_json("ProxyAdmin", &json)?;
        assert_eq!(artifact.name, "ProxyAdmin");
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert!(artifact.abi.constructor().is_some());
        Ok(())
    }

    #[test]
    fn test_foundry_artifact() -> Result<()> {
        let json = format!(
            r#"{{ "abi": {}, "bytecode": {{ "object": "0x6080", "linkReferences": {{}} }} }}"#,
            ABI
        );
        let artifact = ContractArtifact::from_json("ProxyFactory", &json)?;
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80]);
        Ok(())
    }

    #[test]
    fn test_interface_artifact() {
        let json = r#"{ "abi": [], "bytecode": "0x" }"#;
        let err = ContractArtifact::from_json("IDetailedERC20", json).unwrap_err();
        assert!(err.to_string().contains("IDetailedERC20"));
    }

    #[test]
    fn test_find_skips_debug_files() -> Result<()> {
        let root = scratch_dir();
        let dir = root.join("contracts").join("ProxyAdmin.sol");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("ProxyAdmin.dbg.json"), r#"{ "buildInfo": "" }"#)?;
        fs::write(
            dir.join("ProxyAdmin.json"),
            format!(r#"{{ "abi": {}, "bytecode": "0x6080" }}"#, ABI),
        )?;

        let artifacts = Artifacts::new(&root);
        assert_eq!(artifacts.find("ProxyAdmin")?, dir.join("ProxyAdmin.json"));
        assert_eq!(artifacts.load("ProxyAdmin")?.bytecode.to_vec(), vec![0x60, 0x80]);
        assert!(artifacts.find("GovernanceToken").is_err());

        fs::remove_dir_all(&root)?;
        Ok(())
    }
}
