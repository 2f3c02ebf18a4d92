//! Relocation of unclaimed leftovers and empty-container pruning

use super::Reorganizer;
use crate::error::ReorganizeError;
use docmod_symbol::SymbolId;
use std::collections::{HashSet, VecDeque};

impl Reorganizer<'_> {
    /// Move every unclaimed child of a top-level container to the root
    ///
    /// Aliases are dropped instead of moved. A container moved to the root
    /// becomes top-level itself and is drained the same way, so a second run
    /// has nothing left to relocate.
    pub(super) fn relocate_unclaimed(
        &mut self,
        claimed: &HashSet<SymbolId>,
    ) -> Result<(), ReorganizeError> {
        let root = self.tree.root();
        let mut pending: VecDeque<SymbolId> = self
            .tree
            .top_level()
            .into_iter()
            .filter(|&id| self.tree.get(id).is_some_and(|s| s.kind.is_container()))
            .collect();

        while let Some(container) = pending.pop_front() {
            let children = self.tree.symbol(container)?.children().to_vec();
            for child in children {
                if claimed.contains(&child) {
                    continue;
                }
                let symbol = self.tree.symbol(child)?;
                if symbol.is_alias() {
                    self.tree.remove_subtree(child)?;
                    self.report.aliases_dropped += 1;
                    continue;
                }
                let is_container = symbol.kind.is_container();

                self.tree.attach(child, root)?;
                self.report.relocated_to_root += 1;
                tracing::debug!(symbol = %child, from = %container, "relocated unclaimed symbol");
                if is_container {
                    pending.push_back(child);
                }
            }
        }
        Ok(())
    }

    /// Delete every container left without children, innermost first
    ///
    /// The root is never pruned.
    pub(super) fn prune_empty_containers(&mut self) -> Result<(), ReorganizeError> {
        let root = self.tree.root();
        self.prune_below(root)
    }

    fn prune_below(&mut self, container: SymbolId) -> Result<(), ReorganizeError> {
        let children = self.tree.symbol(container)?.children().to_vec();
        for &child in children.iter().rev() {
            let symbol = self.tree.symbol(child)?;
            if !symbol.kind.is_container() {
                continue;
            }
            self.prune_below(child)?;

            let emptied = self.tree.symbol(child)?;
            if emptied.children().is_empty() {
                let name = emptied.name.clone();
                self.tree.remove_subtree(child)?;
                tracing::debug!(symbol = %child, name = %name, "pruned empty container");
                self.report.containers_pruned.push(name);
            }
        }
        Ok(())
    }
}
