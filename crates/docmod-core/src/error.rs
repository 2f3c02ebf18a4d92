//! Error types for module reorganization
//!
//! Authoring mistakes (blank tag payloads, duplicate definitions, names that
//! match nothing) are not errors: they are logged and skipped. The variants
//! here cover broken trees and bad configuration.

use docmod_symbol::{SymbolId, TreeError};

/// Reorganization failure
#[derive(Debug, thiserror::Error)]
pub enum ReorganizeError {
    /// A tree primitive failed
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// A definition points at a symbol missing from the global index
    ///
    /// Definitions are recorded from symbols found in the tree, so this means
    /// the tree was mutated behind the registries' back. The run stops.
    #[error("definition '{name}' refers to unindexed symbol {symbol}")]
    UnregisteredDefinition { name: String, symbol: SymbolId },

    /// Configuration rejected before the run started
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ReorganizeError {
    /// True for failures caused by a tree that violates its own invariants
    #[inline]
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        match self {
            Self::UnregisteredDefinition { .. } => true,
            Self::Tree(err) => !matches!(err, TreeError::ArenaFull(_)),
            Self::Config(_) => false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A tag name is blank
    #[error("tag name for {field} must not be blank")]
    BlankTag { field: &'static str },

    /// Both tags share a name
    #[error("module tag and definition tag are both '{0}'")]
    SameTags(String),
}
