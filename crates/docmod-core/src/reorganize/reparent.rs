//! Reparenting and group maintenance

use super::Reorganizer;
use crate::error::ReorganizeError;
use docmod_symbol::{Group, SymbolId};

impl Reorganizer<'_> {
    /// Move `declaration` under `target` and make it a member of the
    /// target's kind group
    ///
    /// Aliases of the declaration found along the way are dropped; an alias
    /// already sitting in the target hands its child and group slots over to
    /// the real declaration.
    pub(super) fn reparent(
        &mut self,
        declaration: SymbolId,
        target: SymbolId,
    ) -> Result<(), ReorganizeError> {
        if !self.tree.contains(declaration) {
            tracing::warn!(symbol = %declaration, "declaration no longer indexed, skipping");
            self.report.declarations_skipped += 1;
            return Ok(());
        }
        if declaration == target || self.tree.is_ancestor(declaration, target) {
            tracing::warn!(
                symbol = %declaration,
                target = %target,
                "declaration encloses its own module, skipping"
            );
            self.report.declarations_skipped += 1;
            return Ok(());
        }

        self.unlink_from_other_containers(declaration, target)?;

        let aliases = self.aliases_in(target, declaration)?;
        let current = self.tree.symbol(declaration)?.parent();
        if current != Some(target) {
            self.tree.detach(declaration)?;
            let children = self.tree.children_mut(target)?;
            match aliases
                .first()
                .and_then(|alias| children.iter().position(|c| c == alias))
            {
                Some(slot) => children[slot] = declaration,
                None => children.push(declaration),
            }
            self.tree.set_parent(declaration, Some(target))?;
            self.report.declarations_moved += 1;
            tracing::debug!(symbol = %declaration, target = %target, "declaration moved");
        }

        self.ensure_group_membership(declaration, target, &aliases)?;

        for alias in aliases {
            self.tree.remove_subtree(alias)?;
            self.report.aliases_dropped += 1;
        }
        Ok(())
    }

    /// Remove the declaration and its aliases from every top-level container
    /// except `target`
    fn unlink_from_other_containers(
        &mut self,
        declaration: SymbolId,
        target: SymbolId,
    ) -> Result<(), ReorganizeError> {
        for container in self.tree.top_level().into_iter().rev() {
            if container == target || container == declaration {
                continue;
            }
            while let Some(removed) = self.tree.unlink_standing_for(container, declaration)? {
                if removed != declaration {
                    self.tree.remove_subtree(removed)?;
                    self.report.aliases_dropped += 1;
                }
            }
        }
        Ok(())
    }

    /// Children of `container` that are aliases of `declaration`
    fn aliases_in(
        &self,
        container: SymbolId,
        declaration: SymbolId,
    ) -> Result<Vec<SymbolId>, ReorganizeError> {
        let children = self.tree.symbol(container)?.children();
        Ok(children
            .iter()
            .copied()
            .filter(|&c| c != declaration)
            .filter(|&c| {
                self.tree
                    .get(c)
                    .is_some_and(|s| s.alias_of == Some(declaration))
            })
            .collect())
    }

    fn ensure_group_membership(
        &mut self,
        declaration: SymbolId,
        target: SymbolId,
        aliases: &[SymbolId],
    ) -> Result<(), ReorganizeError> {
        let kind = self.tree.symbol(declaration)?.kind;
        let groups = self.tree.groups_mut(target)?;

        let Some(group) = groups.iter_mut().find(|g| g.kind == kind) else {
            groups.push(Group::seeded(kind, declaration));
            return Ok(());
        };

        match group.children.iter().position(|c| aliases.contains(c)) {
            Some(mut slot) => {
                if let Some(existing) = group.children.iter().position(|&c| c == declaration) {
                    group.children.remove(existing);
                    if existing < slot {
                        slot -= 1;
                    }
                }
                group.children[slot] = declaration;
            }
            None if !group.contains(declaration) => group.children.push(declaration),
            None => {}
        }
        Ok(())
    }
}
