//! Arena-backed documentation tree
//!
//! Provides [`SymbolTree`], the global symbol index. Symbols live in slots
//! addressed by [`SymbolId`]; containers hold id lists, never references, so
//! pruning a container cannot leave anything dangling.

use crate::group::Group;
use crate::symbol::{Symbol, SymbolId, SymbolKind};
use serde::{Deserialize, Serialize};

/// Errors for tree mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Id not present in the index
    #[error("unknown symbol {0}")]
    UnknownSymbol(SymbolId),

    /// Children may only be attached to container kinds
    #[error("symbol {id} ({kind:?}) is not a container")]
    NotAContainer { id: SymbolId, kind: SymbolKind },

    /// Attaching would make a symbol its own ancestor
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { child: SymbolId, parent: SymbolId },

    /// The root cannot be detached or removed
    #[error("the project root cannot be detached or removed")]
    RootImmutable,

    /// Every `u32` id has been handed out
    #[error("symbol arena is full ({0} slots)")]
    ArenaFull(usize),
}

/// The documentation tree and its global symbol index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTree {
    slots: Vec<Option<Symbol>>,
}

impl SymbolTree {
    /// Create a tree holding only the project root
    #[must_use]
    pub fn new(project_name: impl Into<String>) -> Self {
        let root = Symbol::new(project_name, SymbolKind::Project);
        Self {
            slots: vec![Some(root)],
        }
    }

    /// Identity of the project root
    #[inline]
    #[must_use]
    pub fn root(&self) -> SymbolId {
        SymbolId::ROOT
    }

    /// Lookup by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable lookup by id
    #[inline]
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Lookup by id
    ///
    /// # Errors
    /// [`TreeError::UnknownSymbol`] if the id is not indexed
    #[inline]
    pub fn symbol(&self, id: SymbolId) -> Result<&Symbol, TreeError> {
        self.get(id).ok_or(TreeError::UnknownSymbol(id))
    }

    /// Mutable lookup by id
    ///
    /// # Errors
    /// [`TreeError::UnknownSymbol`] if the id is not indexed
    #[inline]
    pub fn symbol_mut(&mut self, id: SymbolId) -> Result<&mut Symbol, TreeError> {
        self.get_mut(id).ok_or(TreeError::UnknownSymbol(id))
    }

    /// Whether `id` is indexed
    #[inline]
    #[must_use]
    pub fn contains(&self, id: SymbolId) -> bool {
        self.get(id).is_some()
    }

    /// Number of indexed symbols, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Never true in practice: the root is always indexed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All indexed symbols in id order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Children of the root
    #[must_use]
    pub fn top_level(&self) -> Vec<SymbolId> {
        self.get(SymbolId::ROOT)
            .map(|root| root.children.clone())
            .unwrap_or_default()
    }

    /// First top-level container named exactly `name`
    #[must_use]
    pub fn find_top_level_container(&self, name: &str) -> Option<SymbolId> {
        let root = self.get(SymbolId::ROOT)?;
        root.children.iter().copied().find(|&id| {
            self.get(id)
                .is_some_and(|s| s.kind.is_container() && s.name == name)
        })
    }

    /// Pre-order walk from `from`, following child order
    #[must_use]
    pub fn walk(&self, from: SymbolId) -> Vec<SymbolId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(symbol) = self.get(id) else { continue };
            out.push(id);
            stack.extend(symbol.children.iter().rev().copied());
        }
        out
    }

    /// True if `ancestor` is a strict ancestor of `of`
    #[must_use]
    pub fn is_ancestor(&self, ancestor: SymbolId, of: SymbolId) -> bool {
        let mut cursor = self.get(of).and_then(|s| s.parent);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.get(id).and_then(|s| s.parent);
        }
        false
    }

    /// Index a detached symbol and return its new id
    ///
    /// The symbol is not linked anywhere; follow up with [`attach`](Self::attach).
    ///
    /// # Errors
    /// Fails once the arena has used up every `u32` id
    pub fn register(&mut self, mut symbol: Symbol) -> Result<SymbolId, TreeError> {
        let id = next_id(self.slots.len())?;
        symbol.id = id;
        symbol.parent = None;
        symbol.children.clear();
        symbol.groups.clear();
        self.slots.push(Some(symbol));
        Ok(id)
    }

    /// Index `symbol` and link it under `parent`, upstream style
    ///
    /// # Errors
    /// Fails if `parent` is unknown or not a container
    pub fn insert(&mut self, parent: SymbolId, symbol: Symbol) -> Result<SymbolId, TreeError> {
        self.expect_container(parent)?;
        let id = self.register(symbol)?;
        self.attach(id, parent)?;
        Ok(id)
    }

    /// Unlink `id` from its parent's child sequence and groups
    ///
    /// A group left empty by the removal is deleted. No-op for detached symbols.
    ///
    /// # Errors
    /// Fails for unknown ids and for the root
    pub fn detach(&mut self, id: SymbolId) -> Result<(), TreeError> {
        if id == SymbolId::ROOT {
            return Err(TreeError::RootImmutable);
        }
        let parent = self.symbol(id)?.parent;
        if let Some(parent) = parent {
            let container = self.symbol_mut(parent)?;
            container.children.retain(|&c| c != id);
            remove_from_groups(&mut container.groups, id);
        }
        self.symbol_mut(id)?.parent = None;
        Ok(())
    }

    /// Link `id` as the last child of `parent` and into its kind group
    ///
    /// A symbol that is already linked elsewhere is detached first; attaching
    /// to the current parent is a no-op.
    ///
    /// # Errors
    /// Fails if either id is unknown, `parent` is not a container, or the
    /// link would create a cycle
    pub fn attach(&mut self, id: SymbolId, parent: SymbolId) -> Result<(), TreeError> {
        self.expect_container(parent)?;
        if id == parent || self.is_ancestor(id, parent) {
            return Err(TreeError::WouldCycle { child: id, parent });
        }
        let (kind, current) = {
            let symbol = self.symbol(id)?;
            (symbol.kind, symbol.parent)
        };
        if current == Some(parent) {
            return Ok(());
        }
        if current.is_some() {
            self.detach(id)?;
        }

        let container = self.symbol_mut(parent)?;
        container.children.push(id);
        match container.groups.iter_mut().find(|g| g.kind == kind) {
            Some(group) if !group.contains(id) => group.children.push(id),
            Some(_) => {}
            None => container.groups.push(Group::seeded(kind, id)),
        }
        self.symbol_mut(id)?.parent = Some(parent);
        Ok(())
    }

    /// Remove the first child of `container` standing for `id`
    ///
    /// Matches by identity or alias (see [`Symbol::stands_for`]). The removed
    /// child is also dropped from its kind group and left detached. Returns
    /// the id of the child actually removed.
    ///
    /// # Errors
    /// Fails if `container` is unknown
    pub fn unlink_standing_for(
        &mut self,
        container: SymbolId,
        id: SymbolId,
    ) -> Result<Option<SymbolId>, TreeError> {
        let found = self
            .symbol(container)?
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).is_some_and(|s| s.stands_for(id)));
        let Some(child) = found else {
            return Ok(None);
        };
        self.detach(child)?;
        Ok(Some(child))
    }

    /// Drop `id` and all its descendants from the index
    ///
    /// Returns the number of symbols removed.
    ///
    /// # Errors
    /// Fails for unknown ids and for the root
    pub fn remove_subtree(&mut self, id: SymbolId) -> Result<usize, TreeError> {
        self.detach(id)?;
        let doomed = self.walk(id);
        for &victim in &doomed {
            if let Some(slot) = self.slots.get_mut(victim.index()) {
                *slot = None;
            }
        }
        Ok(doomed.len())
    }

    /// Rename a symbol
    ///
    /// # Errors
    /// Fails if the id is unknown
    pub fn rename(&mut self, id: SymbolId, name: impl Into<String>) -> Result<(), TreeError> {
        self.symbol_mut(id)?.name = name.into();
        Ok(())
    }

    /// Direct access to a container's child sequence
    ///
    /// Callers are responsible for keeping parent links and groups consistent.
    ///
    /// # Errors
    /// Fails if the id is unknown
    pub fn children_mut(&mut self, id: SymbolId) -> Result<&mut Vec<SymbolId>, TreeError> {
        Ok(&mut self.symbol_mut(id)?.children)
    }

    /// Direct access to a container's groups
    ///
    /// Callers are responsible for keeping groups a subset of the children.
    ///
    /// # Errors
    /// Fails if the id is unknown
    pub fn groups_mut(&mut self, id: SymbolId) -> Result<&mut Vec<Group>, TreeError> {
        Ok(&mut self.symbol_mut(id)?.groups)
    }

    /// Overwrite a symbol's parent link
    ///
    /// # Errors
    /// Fails if the id is unknown
    pub fn set_parent(&mut self, id: SymbolId, parent: Option<SymbolId>) -> Result<(), TreeError> {
        self.symbol_mut(id)?.parent = parent;
        Ok(())
    }

    fn expect_container(&self, id: SymbolId) -> Result<(), TreeError> {
        let symbol = self.symbol(id)?;
        if symbol.kind.is_container() {
            Ok(())
        } else {
            Err(TreeError::NotAContainer {
                id,
                kind: symbol.kind,
            })
        }
    }
}

fn remove_from_groups(groups: &mut Vec<Group>, id: SymbolId) {
    for group in groups.iter_mut() {
        group.children.retain(|&c| c != id);
    }
    groups.retain(|g| !g.is_empty());
}

/// Id for the slot at index `len`
fn next_id(len: usize) -> Result<SymbolId, TreeError> {
    u32::try_from(len)
        .map(SymbolId)
        .map_err(|_| TreeError::ArenaFull(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str) -> Symbol {
        Symbol::new(name, SymbolKind::Module).exported()
    }

    fn function(name: &str) -> Symbol {
        Symbol::new(name, SymbolKind::Function).exported()
    }

    #[test]
    fn ids_past_u32_range_are_rejected() {
        let last = usize::try_from(u32::MAX).unwrap();

        assert_eq!(next_id(last), Ok(SymbolId(u32::MAX)));
        if let Some(overflow) = last.checked_add(1) {
            assert_eq!(next_id(overflow), Err(TreeError::ArenaFull(overflow)));
        }
    }

    #[test]
    fn register_assigns_slot_index() {
        let mut tree = SymbolTree::new("docs");
        let id = tree.register(module("detached")).unwrap();

        assert_eq!(id, SymbolId(1));
        assert_eq!(tree.symbol(id).unwrap().parent(), None);
    }

    #[test]
    fn new_tree_has_only_root() {
        let tree = SymbolTree::new("docs");

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.symbol(tree.root()).unwrap().kind, SymbolKind::Project);
        assert!(tree.top_level().is_empty());
    }

    #[test]
    fn insert_links_child_and_group() {
        let mut tree = SymbolTree::new("docs");
        let m = tree.insert(tree.root(), module("mod1")).unwrap();
        let f = tree.insert(m, function("decorate")).unwrap();

        let container = tree.symbol(m).unwrap();
        assert_eq!(container.children(), &[f]);
        assert_eq!(container.group_for(SymbolKind::Function).unwrap().children, vec![f]);
        assert_eq!(tree.symbol(f).unwrap().parent(), Some(m));
    }

    #[test]
    fn insert_rejects_leaf_parent() {
        let mut tree = SymbolTree::new("docs");
        let f = tree.insert(tree.root(), function("f")).unwrap();

        let err = tree.insert(f, function("g")).unwrap_err();
        assert!(matches!(err, TreeError::NotAContainer { .. }));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn detach_deletes_emptied_group() {
        let mut tree = SymbolTree::new("docs");
        let m = tree.insert(tree.root(), module("mod1")).unwrap();
        let f = tree.insert(m, function("f")).unwrap();

        tree.detach(f).unwrap();

        let container = tree.symbol(m).unwrap();
        assert!(container.children().is_empty());
        assert!(container.groups().is_empty());
        assert_eq!(tree.symbol(f).unwrap().parent(), None);
    }

    #[test]
    fn root_cannot_be_detached() {
        let mut tree = SymbolTree::new("docs");
        assert_eq!(tree.detach(tree.root()), Err(TreeError::RootImmutable));
        assert_eq!(tree.remove_subtree(tree.root()), Err(TreeError::RootImmutable));
    }

    #[test]
    fn attach_moves_between_containers() {
        let mut tree = SymbolTree::new("docs");
        let a = tree.insert(tree.root(), module("a")).unwrap();
        let b = tree.insert(tree.root(), module("b")).unwrap();
        let f = tree.insert(a, function("f")).unwrap();

        tree.attach(f, b).unwrap();

        assert!(tree.symbol(a).unwrap().children().is_empty());
        assert_eq!(tree.symbol(b).unwrap().children(), &[f]);
        assert_eq!(tree.symbol(f).unwrap().parent(), Some(b));
    }

    #[test]
    fn attach_to_current_parent_is_noop() {
        let mut tree = SymbolTree::new("docs");
        let a = tree.insert(tree.root(), module("a")).unwrap();
        let f = tree.insert(a, function("f")).unwrap();

        tree.attach(f, a).unwrap();

        assert_eq!(tree.symbol(a).unwrap().children(), &[f]);
        assert_eq!(tree.symbol(a).unwrap().groups()[0].children, vec![f]);
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut tree = SymbolTree::new("docs");
        let outer = tree.insert(tree.root(), module("outer")).unwrap();
        let inner = tree
            .insert(outer, Symbol::new("inner", SymbolKind::Namespace))
            .unwrap();

        let err = tree.attach(outer, inner).unwrap_err();
        assert_eq!(err, TreeError::WouldCycle { child: outer, parent: inner });
    }

    #[test]
    fn unlink_matches_aliases() {
        let mut tree = SymbolTree::new("docs");
        let a = tree.insert(tree.root(), module("a")).unwrap();
        let b = tree.insert(tree.root(), module("b")).unwrap();
        let real = tree.insert(a, function("f")).unwrap();
        let alias = tree.insert(b, function("f").alias_of(real)).unwrap();

        let removed = tree.unlink_standing_for(b, real).unwrap();

        assert_eq!(removed, Some(alias));
        assert!(tree.symbol(b).unwrap().children().is_empty());
        assert_eq!(tree.symbol(alias).unwrap().parent(), None);
        assert_eq!(tree.unlink_standing_for(b, real).unwrap(), None);
    }

    #[test]
    fn remove_subtree_drops_descendants() {
        let mut tree = SymbolTree::new("docs");
        let m = tree.insert(tree.root(), module("m")).unwrap();
        let ns = tree.insert(m, Symbol::new("ns", SymbolKind::Namespace)).unwrap();
        let f = tree.insert(ns, function("f")).unwrap();

        let removed = tree.remove_subtree(ns).unwrap();

        assert_eq!(removed, 2);
        assert!(!tree.contains(ns));
        assert!(!tree.contains(f));
        assert!(tree.symbol(m).unwrap().children().is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut tree = SymbolTree::new("docs");
        let a = tree.insert(tree.root(), module("a")).unwrap();
        tree.remove_subtree(a).unwrap();
        let b = tree.insert(tree.root(), module("b")).unwrap();

        assert_ne!(a, b);
        assert!(!tree.contains(a));
    }

    #[test]
    fn walk_is_preorder_in_child_order() {
        let mut tree = SymbolTree::new("docs");
        let a = tree.insert(tree.root(), module("a")).unwrap();
        let f = tree.insert(a, function("f")).unwrap();
        let b = tree.insert(tree.root(), module("b")).unwrap();

        assert_eq!(tree.walk(tree.root()), vec![tree.root(), a, f, b]);
    }

    proptest::proptest! {
        #[test]
        fn random_moves_keep_links_consistent(
            leaf_moves in proptest::collection::vec((0..8usize, 0..5usize), 0..40),
            container_moves in proptest::collection::vec((0..5usize, 0..5usize), 0..10),
        ) {
            let mut tree = SymbolTree::new("docs");
            let mut containers = vec![tree.root()];
            for i in 0..3 {
                containers.push(tree.insert(tree.root(), module(&format!("m{i}"))).unwrap());
            }
            containers.push(
                tree.insert(containers[1], Symbol::new("ns", SymbolKind::Namespace)).unwrap(),
            );
            let leaves: Vec<SymbolId> = (0..8)
                .map(|i| {
                    let parent = containers[i % containers.len()];
                    tree.insert(parent, function(&format!("f{i}"))).unwrap()
                })
                .collect();

            for (from, to) in container_moves {
                // Cycles and root moves are rejected, everything else must succeed.
                let _ = tree.attach(containers[from], containers[to]);
            }
            for (leaf, target) in leaf_moves {
                tree.attach(leaves[leaf], containers[target]).unwrap();
            }

            proptest::prop_assert_eq!(crate::TreeValidator::structural().validate(&tree), Ok(()));
        }
    }

    #[test]
    fn find_top_level_container_ignores_leaves() {
        let mut tree = SymbolTree::new("docs");
        tree.insert(tree.root(), function("Utils")).unwrap();
        assert_eq!(tree.find_top_level_container("Utils"), None);

        let m = tree.insert(tree.root(), module("Utils")).unwrap();
        assert_eq!(tree.find_top_level_container("Utils"), Some(m));
        assert_eq!(tree.find_top_level_container("utils"), None);
    }
}
