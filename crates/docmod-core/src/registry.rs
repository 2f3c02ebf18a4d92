//! Definition and declaration registries
//!
//! Both registries are filled by the collection pass and read by the
//! reorganizer. Iteration order is insertion order; the reorganizer's
//! results depend on it.

use docmod_symbol::{Comment, SymbolId};
use indexmap::IndexMap;
use std::collections::HashSet;

/// A container that declares the logical module it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefinition {
    /// Logical module name
    pub name: String,
    /// Container comment with the definition tag removed
    pub comment: Comment,
    /// Container carrying the definition
    pub symbol: SymbolId,
}

/// Ordered list of module definitions
///
/// No deduplication: when two containers define the same name the first one
/// registered wins at resolution time.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    definitions: Vec<ModuleDefinition>,
}

impl DefinitionRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition
    pub fn add_definition(&mut self, name: impl Into<String>, comment: Comment, symbol: SymbolId) {
        self.definitions.push(ModuleDefinition {
            name: name.into(),
            comment,
            symbol,
        });
    }

    /// First definition registered for `name`
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ModuleDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDefinition> + '_ {
        self.definitions.iter()
    }

    /// True if `symbol` is the winning definition of a module other than `name`
    #[must_use]
    pub fn reserves_for_other(&self, symbol: SymbolId, name: &str) -> bool {
        self.definitions.iter().any(|d| {
            d.symbol == symbol
                && d.name != name
                && self.find(&d.name).is_some_and(|winner| winner.symbol == symbol)
        })
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when nothing was registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A declaration assigned to a logical module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeclaration {
    /// Logical module name
    pub module_name: String,
    /// Declaration to move
    pub symbol: SymbolId,
}

/// Module assignments keyed by declaration identity
///
/// Re-registering an identity overwrites its module name but keeps the
/// identity's first position in iteration order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationRegistry {
    declarations: IndexMap<SymbolId, ModuleDeclaration>,
}

impl DeclarationRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the assignment for `symbol`
    ///
    /// Returns the assignment that was replaced, if any.
    pub fn add_declaration(
        &mut self,
        module_name: impl Into<String>,
        symbol: SymbolId,
    ) -> Option<ModuleDeclaration> {
        self.declarations.insert(
            symbol,
            ModuleDeclaration {
                module_name: module_name.into(),
                symbol,
            },
        )
    }

    /// Assignment for `symbol`
    #[inline]
    #[must_use]
    pub fn get(&self, symbol: SymbolId) -> Option<&ModuleDeclaration> {
        self.declarations.get(&symbol)
    }

    /// Whether `symbol` was assigned a module
    #[inline]
    #[must_use]
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.declarations.contains_key(&symbol)
    }

    /// Assignments in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDeclaration> + '_ {
        self.declarations.values()
    }

    /// Identities of every assigned declaration
    #[must_use]
    pub fn claimed(&self) -> HashSet<SymbolId> {
        self.declarations.keys().copied().collect()
    }

    /// Number of assignments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// True when nothing was registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
