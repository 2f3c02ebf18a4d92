//! Structural invariant checks for [`SymbolTree`]
//!
//! [`TreeValidator`] reports every way a tree can disagree with itself:
//! broken parent/child links, stale group members, empty containers and
//! sibling orders that are not a fixed point of the presentation comparator.

use crate::symbol::{SymbolId, SymbolKind};
use crate::tree::SymbolTree;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// One broken invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// The root has a parent
    #[error("root {0} has a parent")]
    RootHasParent(SymbolId),

    /// A non-root symbol has no parent
    #[error("symbol {0} has no parent")]
    Orphan(SymbolId),

    /// A link points at an id that is not indexed
    #[error("{from} links to unindexed symbol {to}")]
    DanglingLink { from: SymbolId, to: SymbolId },

    /// Parent pointer and child sequence disagree
    #[error("{child} names {claimed_parent} as parent but is listed under {listed_in:?}")]
    ParentMismatch {
        child: SymbolId,
        claimed_parent: SymbolId,
        listed_in: Option<SymbolId>,
    },

    /// A child appears more than once in a child sequence
    #[error("{child} appears more than once under {container}")]
    DuplicateChild { container: SymbolId, child: SymbolId },

    /// Symbol not reachable from the root
    #[error("symbol {0} is indexed but unreachable from the root")]
    Unreachable(SymbolId),

    /// A group member is not a child of the group's container
    #[error("group {kind:?} of {container} lists non-child {member}")]
    StrayGroupMember {
        container: SymbolId,
        kind: SymbolKind,
        member: SymbolId,
    },

    /// A group member's kind differs from the group's kind
    #[error("group {kind:?} of {container} holds {member} of another kind")]
    MixedGroup {
        container: SymbolId,
        kind: SymbolKind,
        member: SymbolId,
    },

    /// A symbol sits in more than one group, or twice in one
    #[error("{member} is grouped more than once in {container}")]
    DuplicateGroupMember { container: SymbolId, member: SymbolId },

    /// Two groups share a kind
    #[error("{container} has more than one {kind:?} group")]
    DuplicateGroupKind { container: SymbolId, kind: SymbolKind },

    /// A group without members
    #[error("{container} keeps an empty {kind:?} group")]
    EmptyGroup { container: SymbolId, kind: SymbolKind },

    /// A non-root container without children
    #[error("container {0} is empty")]
    EmptyContainer(SymbolId),

    /// Children or group members are not in presentation order
    #[error("children of {0} are not in presentation order")]
    Unsorted(SymbolId),
}

/// Validates tree invariants
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeValidator {
    require_sorted: bool,
    require_non_empty: bool,
}

impl TreeValidator {
    /// Validator for link consistency only
    #[inline]
    #[must_use]
    pub fn structural() -> Self {
        Self::default()
    }

    /// Validator for a fully reorganized tree: links, no empty containers,
    /// presentation order
    #[inline]
    #[must_use]
    pub fn reorganized() -> Self {
        Self {
            require_sorted: true,
            require_non_empty: true,
        }
    }

    /// First violation found, if any
    ///
    /// # Errors
    /// The first broken invariant
    pub fn validate(&self, tree: &SymbolTree) -> Result<(), InvariantViolation> {
        match self.check_all(tree).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every violation found
    #[must_use]
    pub fn check_all(&self, tree: &SymbolTree) -> Vec<InvariantViolation> {
        let mut out = Vec::new();
        let root = tree.root();

        for symbol in tree.iter() {
            let id = symbol.id();
            match symbol.parent() {
                None if id != root => out.push(InvariantViolation::Orphan(id)),
                Some(_) if id == root => out.push(InvariantViolation::RootHasParent(id)),
                Some(parent) => match tree.get(parent) {
                    None => out.push(InvariantViolation::DanglingLink { from: id, to: parent }),
                    Some(p) if !p.children().contains(&id) => {
                        out.push(InvariantViolation::ParentMismatch {
                            child: id,
                            claimed_parent: parent,
                            listed_in: None,
                        });
                    }
                    Some(_) => {}
                },
                None => {}
            }

            let mut seen = HashSet::new();
            for &child in symbol.children() {
                if !seen.insert(child) {
                    out.push(InvariantViolation::DuplicateChild { container: id, child });
                    continue;
                }
                match tree.get(child) {
                    None => out.push(InvariantViolation::DanglingLink { from: id, to: child }),
                    Some(c) if c.parent() != Some(id) => {
                        out.push(InvariantViolation::ParentMismatch {
                            child,
                            claimed_parent: c.parent().unwrap_or(child),
                            listed_in: Some(id),
                        });
                    }
                    Some(_) => {}
                }
            }

            self.check_groups(tree, id, &mut out);

            if self.require_non_empty
                && id != root
                && symbol.kind.is_container()
                && symbol.children().is_empty()
            {
                out.push(InvariantViolation::EmptyContainer(id));
            }

            if self.require_sorted && !is_presentation_sorted(tree, id) {
                out.push(InvariantViolation::Unsorted(id));
            }
        }

        let reachable: HashSet<SymbolId> = tree.walk(root).into_iter().collect();
        for symbol in tree.iter() {
            if !reachable.contains(&symbol.id()) {
                out.push(InvariantViolation::Unreachable(symbol.id()));
            }
        }

        out
    }

    fn check_groups(&self, tree: &SymbolTree, id: SymbolId, out: &mut Vec<InvariantViolation>) {
        let Some(symbol) = tree.get(id) else { return };
        let children: HashSet<SymbolId> = symbol.children().iter().copied().collect();
        let mut kinds = HashSet::new();
        let mut grouped: HashMap<SymbolId, usize> = HashMap::new();

        for group in symbol.groups() {
            if !kinds.insert(group.kind) {
                out.push(InvariantViolation::DuplicateGroupKind {
                    container: id,
                    kind: group.kind,
                });
            }
            if group.is_empty() {
                out.push(InvariantViolation::EmptyGroup {
                    container: id,
                    kind: group.kind,
                });
            }
            for &member in &group.children {
                *grouped.entry(member).or_default() += 1;
                if !children.contains(&member) {
                    out.push(InvariantViolation::StrayGroupMember {
                        container: id,
                        kind: group.kind,
                        member,
                    });
                } else if tree.get(member).is_some_and(|m| m.kind != group.kind) {
                    out.push(InvariantViolation::MixedGroup {
                        container: id,
                        kind: group.kind,
                        member,
                    });
                }
            }
        }

        let mut duplicated: Vec<SymbolId> = grouped
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(member, _)| member)
            .collect();
        duplicated.sort();
        out.extend(
            duplicated
                .into_iter()
                .map(|member| InvariantViolation::DuplicateGroupMember { container: id, member }),
        );
    }
}

fn is_presentation_sorted(tree: &SymbolTree, id: SymbolId) -> bool {
    let Some(symbol) = tree.get(id) else { return true };
    let ordered = |ids: &[SymbolId]| {
        ids.windows(2).all(|pair| match (tree.get(pair[0]), tree.get(pair[1])) {
            (Some(a), Some(b)) => a.presentation_cmp(b) != Ordering::Greater,
            _ => true,
        })
    };
    ordered(symbol.children())
        && symbol.groups().iter().all(|g| ordered(&g.children))
        && symbol
            .groups()
            .windows(2)
            .all(|pair| pair[0].kind.sort_rank() <= pair[1].kind.sort_rank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Group;
    use crate::symbol::Symbol;

    fn sample() -> (SymbolTree, SymbolId, SymbolId) {
        let mut tree = SymbolTree::new("docs");
        let m = tree
            .insert(tree.root(), Symbol::new("m", SymbolKind::Module))
            .unwrap();
        let f = tree.insert(m, Symbol::new("f", SymbolKind::Function)).unwrap();
        (tree, m, f)
    }

    #[test]
    fn well_formed_tree_passes() {
        let (tree, _, _) = sample();
        assert_eq!(TreeValidator::structural().validate(&tree), Ok(()));
        assert_eq!(TreeValidator::reorganized().validate(&tree), Ok(()));
    }

    #[test]
    fn detects_parent_mismatch() {
        let (mut tree, m, f) = sample();
        tree.children_mut(m).unwrap().clear();

        let violations = TreeValidator::structural().check_all(&tree);
        assert!(violations.contains(&InvariantViolation::ParentMismatch {
            child: f,
            claimed_parent: m,
            listed_in: None,
        }));
    }

    #[test]
    fn detects_stray_group_member() {
        let (mut tree, _, f) = sample();
        let root = tree.root();
        tree.groups_mut(root)
            .unwrap()
            .push(Group::seeded(SymbolKind::Function, f));

        let violations = TreeValidator::structural().check_all(&tree);
        assert!(violations.contains(&InvariantViolation::StrayGroupMember {
            container: root,
            kind: SymbolKind::Function,
            member: f,
        }));
    }

    #[test]
    fn detects_duplicate_group_membership() {
        let (mut tree, m, f) = sample();
        tree.groups_mut(m).unwrap()[0].children.push(f);

        let violations = TreeValidator::structural().check_all(&tree);
        assert!(violations
            .contains(&InvariantViolation::DuplicateGroupMember { container: m, member: f }));
    }

    #[test]
    fn detects_empty_container_only_when_required() {
        let (mut tree, m, f) = sample();
        tree.detach(f).unwrap();
        tree.remove_subtree(f).unwrap();

        assert_eq!(TreeValidator::structural().validate(&tree), Ok(()));
        assert_eq!(
            TreeValidator::reorganized().validate(&tree),
            Err(InvariantViolation::EmptyContainer(m))
        );
    }

    #[test]
    fn detects_unsorted_children() {
        let mut tree = SymbolTree::new("docs");
        let m = tree
            .insert(tree.root(), Symbol::new("m", SymbolKind::Module))
            .unwrap();
        tree.insert(m, Symbol::new("zeta", SymbolKind::Function)).unwrap();
        tree.insert(m, Symbol::new("alpha", SymbolKind::Function)).unwrap();

        assert_eq!(
            TreeValidator::reorganized().validate(&tree),
            Err(InvariantViolation::Unsorted(m))
        );
    }

    #[test]
    fn detects_unreachable_cycle() {
        let (mut tree, m, f) = sample();
        let root = tree.root();
        tree.children_mut(root).unwrap().clear();
        tree.groups_mut(root).unwrap().clear();
        tree.set_parent(m, None).unwrap();

        let violations = TreeValidator::structural().check_all(&tree);
        assert!(violations.contains(&InvariantViolation::Orphan(m)));
        assert!(violations.contains(&InvariantViolation::Unreachable(m)));
        assert!(violations.contains(&InvariantViolation::Unreachable(f)));
    }
}
