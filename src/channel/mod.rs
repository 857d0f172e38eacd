//! Delivery channels for Herald.
//!
//! A channel translates a generic send request into one provider-specific
//! wire call and back into a uniform response. Three channels exist: the
//! token-authenticated chat relay, the signed transactional email API, and a
//! simulated stand-in for providers without an integration. The
//! [`services::ChannelRegistry`] maps every provider type onto exactly one of
//! them.
//!
//! - Domain types in [`domain`]
//! - The channel contract in [`ports`]
//! - Channel implementations in [`adapters`]
//! - Type-based dispatch in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;

#[cfg(test)]
mod tests;
