//! Symbol graph port: the host module's renameable names.

use std::fmt;

use serde::Serialize;

/// A kind of named symbol in a module.
///
/// Ordering follows declaration order, which is also the walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolDomain {
    /// Type definitions, nested types included.
    Type,
    /// Methods of every type.
    Method,
    /// Parameters of every method.
    Parameter,
    /// Fields of every type.
    Field,
    /// Properties of every type.
    Property,
    /// Events of every type.
    Event,
}

impl SymbolDomain {
    /// Every domain, in the order the rename engine walks them.
    pub const ALL: [Self; 6] =
        [Self::Type, Self::Method, Self::Parameter, Self::Field, Self::Property, Self::Event];

    /// Lowercase label used in logs and summaries.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Method => "method",
            Self::Parameter => "parameter",
            Self::Field => "field",
            Self::Property => "property",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for SymbolDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability over a module's symbols: enumerate, read and rename.
///
/// Implementations never gain or lose symbols through `rename`, so handles
/// listed before a rename stay valid afterwards.
pub trait SymbolGraph {
    /// Opaque reference to one symbol.
    type Handle;

    /// Lists every symbol of the given domain across all types of the module.
    fn symbols(&self, domain: SymbolDomain) -> Vec<Self::Handle>;

    /// Current name of the referenced symbol.
    fn name(&self, handle: &Self::Handle) -> &str;

    /// Sets the name of the referenced symbol.
    fn rename(&mut self, handle: &Self::Handle, new_name: &str);
}
