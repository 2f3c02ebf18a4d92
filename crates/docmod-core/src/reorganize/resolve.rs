//! Container resolution: existing container, promoted definition or a new one

use super::Reorganizer;
use crate::error::ReorganizeError;
use crate::registry::{DefinitionRegistry, ModuleDefinition};
use docmod_symbol::{Symbol, SymbolId, SymbolKind, TreeError};

impl Reorganizer<'_> {
    /// Top-level container for `name`, creating or promoting one if needed
    pub(super) fn resolve_container(
        &mut self,
        name: &str,
        definitions: &DefinitionRegistry,
    ) -> Result<SymbolId, ReorganizeError> {
        if let Some(existing) = self.find_existing(name, definitions) {
            return Ok(existing);
        }
        match definitions.find(name) {
            Some(definition) => self.promote_definition(definition),
            None => self.synthesize_container(name),
        }
    }

    /// First top-level container named `name` that no definition reserves
    /// for another module
    ///
    /// A reserved container is renamed once its module is promoted, so
    /// reusing it under its physical name would not survive a second pass.
    fn find_existing(&self, name: &str, definitions: &DefinitionRegistry) -> Option<SymbolId> {
        self.tree.top_level().into_iter().find(|&id| {
            let named = self
                .tree
                .get(id)
                .is_some_and(|s| s.kind.is_container() && s.name == name);
            named && !definitions.reserves_for_other(id, name)
        })
    }

    fn promote_definition(
        &mut self,
        definition: &ModuleDefinition,
    ) -> Result<SymbolId, ReorganizeError> {
        let id = definition.symbol;
        let kind = match self.tree.get(id) {
            Some(symbol) => symbol.kind,
            None => {
                return Err(ReorganizeError::UnregisteredDefinition {
                    name: definition.name.clone(),
                    symbol: id,
                })
            }
        };
        if !kind.is_container() {
            return Err(TreeError::NotAContainer { id, kind }.into());
        }

        let root = self.tree.root();
        self.tree.attach(id, root)?;
        self.tree.rename(id, definition.name.clone())?;
        self.tree.symbol_mut(id)?.comment = definition
            .comment
            .has_description()
            .then(|| definition.comment.clone());

        tracing::debug!(symbol = %id, module = %definition.name, "promoted module definition");
        self.report.containers_promoted.push(definition.name.clone());
        Ok(id)
    }

    fn synthesize_container(&mut self, name: &str) -> Result<SymbolId, ReorganizeError> {
        let root = self.tree.root();
        let id = self.tree.register(Symbol::new(name, SymbolKind::Module).exported())?;
        self.tree.attach(id, root)?;

        tracing::debug!(symbol = %id, module = name, "created module container");
        self.report.containers_created.push(name.to_string());
        Ok(id)
    }
}
