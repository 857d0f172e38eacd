//! Step definitions for message delivery scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
