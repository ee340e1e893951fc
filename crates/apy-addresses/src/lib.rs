//! Address bookkeeping for APY deployments.
//!
//! The address book is the only state the deployment scripts persist between
//! runs. The registries hold the well-known external contracts the scripts
//! interact with on each network.
#[macro_use]
extern crate lazy_static;

mod address_book;
mod network;
pub mod registry;

pub use address_book::{network_key, AddressBook, LayeredAddressBook};
pub use network::Network;
