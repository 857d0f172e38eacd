//! Message delivery for Herald.
//!
//! The delivery module accepts a send request, persists a message record,
//! dispatches it through the channel matching the provider type with a fixed
//! retry schedule, and records every attempt. The outcome is reported as a
//! [`domain::DeliveryReport`].
//!
//! - Domain types in [`domain`]
//! - Persistence ports in [`ports`]
//! - In-memory and `PostgreSQL` adapters in [`adapters`]
//! - The orchestrator and retry policy in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
