//! Typed bindings for the contracts the operations scripts call after
//! deployment. Deployments themselves go through compiled artifacts.
pub mod wrappers;
