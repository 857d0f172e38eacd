//! Channel selection services.

mod registry;

pub use registry::ChannelRegistry;
