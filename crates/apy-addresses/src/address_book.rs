use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use ethers::types::Address;
use eyre::{eyre, Result, WrapErr};
use heck::ToShoutySnakeCase;
use serde::{Deserialize, Serialize};

/// Normalizes a network name into the key used by the address book. Hardhat
/// style names (`localhost`, `mainnet-fork`) and upper case names address the
/// same entries.
pub fn network_key(network: &str) -> String {
    network.trim().to_shouty_snake_case()
}

/// A mapping from network to contract name to the canonical deployed
/// address of that contract.
///
/// Each (network, name) pair maps to at most one address. Inserting an
/// address for an existing pair replaces it, which is how upgrades are
/// recorded. Nothing is ever removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    networks: BTreeMap<String, BTreeMap<String, Address>>,
}

impl AddressBook {
    /// Loads an address book from disk. A missing file is treated as an empty
    /// book since the first deployment on a network creates it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no address book found, starting empty");
            return Ok(Self::default());
        }
        let file = File::open(path)?;
        let book: AddressBook = serde_json::from_reader(BufReader::new(file))
            .wrap_err_with(|| format!("malformed address book at {}", path.display()))?;
        Ok(book.normalized())
    }

    /// Writes the address book to disk. The book is written to a sibling
    /// temporary file first and then renamed into place so that a failure
    /// half way through never leaves a truncated book behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Gets the address of a contract on a network if one was recorded.
    pub fn get(&self, network: &str, name: &str) -> Option<Address> {
        self.networks
            .get(&network_key(network))
            .and_then(|contracts| contracts.get(name))
            .copied()
    }

    /// Gets the address of a contract on a network, failing if the contract
    /// hasn't been deployed there.
    pub fn address(&self, network: &str, name: &str) -> Result<Address> {
        self.get(network, name).ok_or_else(|| {
            eyre!(
                "no {} deployment recorded for {}",
                name,
                network_key(network)
            )
        })
    }

    /// Records a deployment and returns the address it replaced, if any.
    pub fn insert(&mut self, network: &str, name: &str, address: Address) -> Option<Address> {
        let network = network_key(network);
        let previous = self
            .networks
            .entry(network.clone())
            .or_default()
            .insert(name.to_string(), address);
        match previous {
            Some(previous) if previous != address => {
                tracing::warn!(
                    %network,
                    contract = name,
                    ?previous,
                    current = ?address,
                    "replacing recorded address"
                );
            }
            _ => {}
        }
        previous
    }

    /// Records several deployments on the same network.
    pub fn extend<I, S>(&mut self, network: &str, entries: I)
    where
        I: IntoIterator<Item = (S, Address)>,
        S: AsRef<str>,
    {
        for (name, address) in entries {
            self.insert(network, name.as_ref(), address);
        }
    }

    /// Folds another address book into this one. Entries that this book
    /// already holds take precedence.
    pub fn merge(&mut self, other: AddressBook) {
        for (network, contracts) in other.networks {
            let existing = self.networks.entry(network_key(&network)).or_default();
            for (name, address) in contracts {
                existing.entry(name).or_insert(address);
            }
        }
    }

    /// The networks that have at least one recorded deployment.
    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    /// The contracts recorded for a network.
    pub fn contracts(&self, network: &str) -> Option<&BTreeMap<String, Address>> {
        self.networks.get(&network_key(network))
    }

    /// Rewrites hand-edited or remotely published network keys into their
    /// canonical form. When two spellings of a network disagree about a
    /// contract, the canonical spelling wins and the conflict is logged.
    pub fn normalized(self) -> Self {
        let (canonical, aliased): (Vec<_>, Vec<_>) = self
            .networks
            .into_iter()
            .partition(|(network, _)| *network == network_key(network));
        let mut book = Self::default();
        for (network, contracts) in aliased.into_iter().chain(canonical) {
            book.extend(&network, contracts);
        }
        book
    }

    pub fn is_empty(&self) -> bool {
        self.networks.values().all(BTreeMap::is_empty)
    }
}

/// The address book a script writes to, layered over a published book that
/// it only reads.
///
/// Lookups prefer the local book. Deployments are recorded in the local book
/// and only the local book is persisted, so a published upgrade is picked up
/// on the next run unless the same contract was deployed locally.
#[derive(Clone, Debug)]
pub struct LayeredAddressBook {
    path: PathBuf,
    local: AddressBook,
    published: AddressBook,
}

impl LayeredAddressBook {
    /// Loads the local book at `path` on top of `published`.
    pub fn open<P: Into<PathBuf>>(path: P, published: AddressBook) -> Result<Self> {
        let path = path.into();
        let local = AddressBook::load(&path)?;
        Ok(Self {
            path,
            local,
            published,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The entries recorded on disk.
    pub fn local(&self) -> &AddressBook {
        &self.local
    }

    pub fn published(&self) -> &AddressBook {
        &self.published
    }

    pub fn get(&self, network: &str, name: &str) -> Option<Address> {
        self.local
            .get(network, name)
            .or_else(|| self.published.get(network, name))
    }

    pub fn address(&self, network: &str, name: &str) -> Result<Address> {
        self.get(network, name).ok_or_else(|| {
            eyre!(
                "no {} deployment recorded for {}",
                name,
                network_key(network)
            )
        })
    }

    /// Records deployments in the local book and persists it.
    pub fn record<I, S>(&mut self, network: &str, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Address)>,
        S: AsRef<str>,
    {
        self.local.extend(network, entries);
        self.local.save(&self.path)
    }

    /// Every contract that resolves on `network`, local entries first.
    pub fn contracts(&self, network: &str) -> BTreeMap<String, Address> {
        let mut view = self.local.clone();
        view.merge(self.published.clone());
        view.contracts(network).cloned().unwrap_or_default()
    }
}
