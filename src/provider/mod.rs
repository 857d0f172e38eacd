//! Provider configuration lookup for Herald.
//!
//! Providers are configured delivery channels identified by a code. They are
//! owned and edited elsewhere; the delivery pipeline only reads them, freshly
//! on every use. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Resolution services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
