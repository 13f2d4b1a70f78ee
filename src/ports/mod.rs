//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the patcher core and an
//! external system (filesystem, remote name table, event sink, the host's
//! symbol graph). Implementations live in `src/adapters/` and `src/module.rs`.

pub mod events;
pub mod filesystem;
pub mod remote;
pub mod symbols;

pub use events::{EventSink, PatchEvent};
pub use filesystem::FileSystem;
pub use remote::{Column, MappingProvider, ProviderFuture, RemoteQuery};
pub use symbols::{SymbolDomain, SymbolGraph};
