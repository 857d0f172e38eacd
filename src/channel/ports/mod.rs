//! Port contract implemented by every delivery channel.

pub mod adapter;

pub use adapter::ChannelAdapter;
