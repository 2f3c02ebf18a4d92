//! Deterministic presentation order

use super::Reorganizer;
use crate::error::ReorganizeError;
use docmod_symbol::{SymbolId, SymbolTree};

impl Reorganizer<'_> {
    /// Sort the whole tree, children before parents
    pub(super) fn sort_all(&mut self) -> Result<(), ReorganizeError> {
        let root = self.tree.root();
        sort_container(self.tree, root)
    }
}

fn sort_container(tree: &mut SymbolTree, container: SymbolId) -> Result<(), ReorganizeError> {
    let children = tree.symbol(container)?.children().to_vec();
    for &child in &children {
        if tree.symbol(child)?.kind.is_container() {
            sort_container(tree, child)?;
        }
    }

    let children = presentation_order(tree, children);
    let mut groups = tree.symbol(container)?.groups().to_vec();
    for group in &mut groups {
        group.children = presentation_order(tree, std::mem::take(&mut group.children));
    }
    groups.sort_by_key(|g| g.kind.sort_rank());

    *tree.children_mut(container)? = children;
    *tree.groups_mut(container)? = groups;
    Ok(())
}

fn presentation_order(tree: &SymbolTree, mut ids: Vec<SymbolId>) -> Vec<SymbolId> {
    ids.sort_by(|a, b| match (tree.get(*a), tree.get(*b)) {
        (Some(x), Some(y)) => x.presentation_cmp(y),
        _ => a.cmp(b),
    });
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmod_symbol::{Symbol, SymbolKind, TreeValidator};

    #[test]
    fn orders_by_kind_then_name_at_every_level() {
        let mut tree = SymbolTree::new("docs");
        let m = tree
            .insert(tree.root(), Symbol::new("m", SymbolKind::Module))
            .unwrap();
        let zeta = tree.insert(m, Symbol::new("zeta", SymbolKind::Function)).unwrap();
        let shape = tree.insert(m, Symbol::new("Shape", SymbolKind::Class)).unwrap();
        let alpha = tree.insert(m, Symbol::new("alpha", SymbolKind::Function)).unwrap();
        let top = tree
            .insert(tree.root(), Symbol::new("a", SymbolKind::Variable))
            .unwrap();

        sort_container(&mut tree, SymbolId::ROOT).unwrap();

        assert_eq!(tree.symbol(tree.root()).unwrap().children(), &[m, top]);
        let module = tree.symbol(m).unwrap();
        assert_eq!(module.children(), &[shape, alpha, zeta]);
        let kinds: Vec<SymbolKind> = module.groups().iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![SymbolKind::Class, SymbolKind::Function]);
        assert_eq!(module.groups()[1].children, vec![alpha, zeta]);
        assert_eq!(TreeValidator::reorganized().validate(&tree), Ok(()));
    }

    #[test]
    fn uppercase_sorts_before_lowercase() {
        let mut tree = SymbolTree::new("docs");
        let lower = tree
            .insert(tree.root(), Symbol::new("apple", SymbolKind::Variable))
            .unwrap();
        let upper = tree
            .insert(tree.root(), Symbol::new("Zebra", SymbolKind::Variable))
            .unwrap();

        sort_container(&mut tree, SymbolId::ROOT).unwrap();

        assert_eq!(tree.symbol(tree.root()).unwrap().children(), &[upper, lower]);
    }

    #[test]
    fn sorting_twice_is_a_fixed_point() {
        let mut tree = SymbolTree::new("docs");
        for name in ["c", "a", "b", "a"] {
            tree.insert(tree.root(), Symbol::new(name, SymbolKind::Variable))
                .unwrap();
        }

        sort_container(&mut tree, SymbolId::ROOT).unwrap();
        let once = tree.clone();
        sort_container(&mut tree, SymbolId::ROOT).unwrap();

        assert_eq!(tree, once);
    }
}
