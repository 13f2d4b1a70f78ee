//! Cassettes: recorded port interactions for offline replay.

pub mod format;
pub mod recorder;
pub mod replayer;
