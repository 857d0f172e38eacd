//! Adapter implementations for the delivery persistence ports.

pub mod memory;
pub mod postgres;
