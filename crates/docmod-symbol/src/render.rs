//! Nested view of the tree for downstream renderers

use crate::comment::Comment;
use crate::symbol::{Signature, SymbolFlags, SymbolId, SymbolKind};
use crate::tree::SymbolTree;
use serde::Serialize;

/// A symbol with its subtree inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSymbol {
    /// Identity
    pub id: SymbolId,
    /// Display name
    pub name: String,
    /// Kind
    pub kind: SymbolKind,
    /// Flags
    pub flags: SymbolFlags,
    /// Documentation, tags already stripped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    /// Aliased identity, for re-exports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<SymbolId>,
    /// Call signatures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<Signature>,
    /// Children in presentation order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedSymbol>,
    /// Kind groups
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<RenderedGroup>,
}

/// A group as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGroup {
    /// Heading
    pub title: String,
    /// Member kind
    pub kind: SymbolKind,
    /// Member identities
    pub children: Vec<SymbolId>,
}

impl SymbolTree {
    /// Nested view rooted at the project
    #[must_use]
    pub fn render(&self) -> RenderedSymbol {
        self.render_from(self.root())
            .unwrap_or_else(|| RenderedSymbol {
                id: self.root(),
                name: String::new(),
                kind: SymbolKind::Project,
                flags: SymbolFlags::default(),
                comment: None,
                alias_of: None,
                signatures: Vec::new(),
                children: Vec::new(),
                groups: Vec::new(),
            })
    }

    /// Nested view rooted at `id`, `None` if the id is not indexed
    #[must_use]
    pub fn render_from(&self, id: SymbolId) -> Option<RenderedSymbol> {
        let symbol = self.get(id)?;
        Some(RenderedSymbol {
            id,
            name: symbol.name.clone(),
            kind: symbol.kind,
            flags: symbol.flags,
            comment: symbol.comment.clone(),
            alias_of: symbol.alias_of,
            signatures: symbol.signatures.clone(),
            children: symbol
                .children()
                .iter()
                .filter_map(|&child| self.render_from(child))
                .collect(),
            groups: symbol
                .groups()
                .iter()
                .map(|g| RenderedGroup {
                    title: g.title.clone(),
                    kind: g.kind,
                    children: g.children.clone(),
                })
                .collect(),
        })
    }

    /// Pretty JSON of [`render`](Self::render)
    ///
    /// # Errors
    /// Propagates serializer failures
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.render())
    }
}
