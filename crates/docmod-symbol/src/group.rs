//! Kind-homogeneous presentation groups

use crate::symbol::{SymbolId, SymbolKind};
use serde::{Deserialize, Serialize};

/// Named bucket of same-kind children inside a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Heading, derived from the kind
    pub title: String,

    /// Kind of every member
    pub kind: SymbolKind,

    /// Members, a subset of the owning container's children
    pub children: Vec<SymbolId>,
}

impl Group {
    /// Create a group seeded with a single member
    #[must_use]
    pub fn seeded(kind: SymbolKind, first: SymbolId) -> Self {
        Self {
            title: kind.group_title().to_string(),
            kind,
            children: vec![first],
        }
    }

    /// Whether `id` is a member
    #[inline]
    #[must_use]
    pub fn contains(&self, id: SymbolId) -> bool {
        self.children.contains(&id)
    }

    /// Number of members
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the group has no members
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
