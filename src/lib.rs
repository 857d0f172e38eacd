//! Herald: multi-channel message delivery relay.
//!
//! Herald accepts a send request naming a provider, persists a message
//! record, and delivers it through the channel matching the provider's type:
//! a token-authenticated chat relay, a signed transactional email API, or a
//! simulated stand-in for providers without an integration. Failed attempts
//! are retried on a fixed schedule, every attempt is logged, and the message
//! ends `delivered` or `failed`.
//!
//! # Architecture
//!
//! Herald follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and channels
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, HTTP,
//!   in-memory)
//!
//! # Modules
//!
//! - [`delivery`]: Message lifecycle, retries, and attempt logging
//! - [`channel`]: Provider-specific wire calls behind one contract
//! - [`provider`]: Provider configuration lookup
//! - [`config`]: Layered configuration
//! - [`clock`]: Schedulable sleeps

pub mod channel;
pub mod clock;
pub mod config;
pub mod delivery;
pub mod provider;
