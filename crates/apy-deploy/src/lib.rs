#[macro_use]
extern crate lazy_static;

pub mod artifacts;
pub mod chain;
pub mod config;
pub mod constants;
pub mod gas;
pub mod infra;
pub mod logging;
pub mod script;
pub mod scripts;
pub mod signature;
pub mod units;
