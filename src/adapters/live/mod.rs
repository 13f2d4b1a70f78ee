//! Live adapters for real external interactions.

pub mod events;
pub mod filesystem;
pub mod remote;
