//! Symbol - one documented entity in the tree
//!
//! Provides [`Symbol`] together with its identity ([`SymbolId`]), its
//! [`SymbolKind`] and the call [`Signature`]s carried by function-like kinds.

use crate::comment::Comment;
use crate::group::Group;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// Stable identity of a symbol inside a [`SymbolTree`](crate::SymbolTree)
///
/// Identities are arena slots. They are never reused, so a pruned symbol's
/// id cannot silently start pointing at something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Identity of the project root
    pub const ROOT: SymbolId = SymbolId(0);

    /// Construct from a raw arena index
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw arena index
    #[inline]
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Symbol kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// The project root
    Project,

    /// Module container (physical file module or logical module)
    Module,

    /// Namespace nested inside a module
    Namespace,

    /// Enumeration
    Enum,

    /// Class
    Class,

    /// Interface
    Interface,

    /// Type alias
    TypeAlias,

    /// Variable or constant
    Variable,

    /// Free function
    Function,

    /// Method on a class or interface
    Method,

    /// Property on a class or interface
    Property,

    /// Getter/setter pair
    Accessor,

    /// Object literal
    ObjectLiteral,
}

impl SymbolKind {
    /// Kinds that own child symbols
    #[inline]
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Project | Self::Module | Self::Namespace)
    }

    /// Kinds whose documentation lives on call signatures
    #[inline]
    #[must_use]
    pub fn is_function_like(self) -> bool {
        matches!(self, Self::Function | Self::Method)
    }

    /// Presentation rank used by the sibling comparator
    #[must_use]
    pub fn sort_rank(self) -> u8 {
        match self {
            Self::Project => 0,
            Self::Module => 1,
            Self::Namespace => 2,
            Self::Enum => 3,
            Self::Class => 4,
            Self::Interface => 5,
            Self::TypeAlias => 6,
            Self::Property => 7,
            Self::Variable => 8,
            Self::Function => 9,
            Self::Accessor => 10,
            Self::Method => 11,
            Self::ObjectLiteral => 12,
        }
    }

    /// Heading of the group holding symbols of this kind
    #[must_use]
    pub fn group_title(self) -> &'static str {
        match self {
            Self::Project => "Projects",
            Self::Module => "Modules",
            Self::Namespace => "Namespaces",
            Self::Enum => "Enumerations",
            Self::Class => "Classes",
            Self::Interface => "Interfaces",
            Self::TypeAlias => "Type aliases",
            Self::Variable => "Variables",
            Self::Function => "Functions",
            Self::Method => "Methods",
            Self::Property => "Properties",
            Self::Accessor => "Accessors",
            Self::ObjectLiteral => "Object literals",
        }
    }
}

/// Symbol flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymbolFlags {
    /// Exported from its source file
    pub exported: bool,
}

/// Call signature of a function-like symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Signature name (usually the function name)
    pub name: String,

    /// Documentation attached to this overload
    pub comment: Option<Comment>,
}

impl Signature {
    /// Create a signature without documentation
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
        }
    }

    /// Attach a comment
    #[inline]
    #[must_use]
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }
}

/// One node of the documentation tree
///
/// Links (`parent`, `children`, `groups`) are identities into the owning
/// [`SymbolTree`](crate::SymbolTree); the tree keeps them consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub(crate) id: SymbolId,
    /// Display name
    pub name: String,
    /// Kind
    pub kind: SymbolKind,
    /// Flags
    pub flags: SymbolFlags,
    /// Attached documentation
    pub comment: Option<Comment>,
    /// Set when this symbol is a re-export standing in for another identity
    pub alias_of: Option<SymbolId>,
    /// Call signatures (function-like kinds only)
    pub signatures: Vec<Signature>,
    pub(crate) parent: Option<SymbolId>,
    pub(crate) children: Vec<SymbolId>,
    pub(crate) groups: Vec<Group>,
}

impl Symbol {
    /// Create a detached symbol; the id is assigned on insertion
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            id: SymbolId::ROOT,
            name: name.into(),
            kind,
            flags: SymbolFlags::default(),
            comment: None,
            alias_of: None,
            signatures: Vec::new(),
            parent: None,
            children: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Set the exported flag
    #[inline]
    #[must_use]
    pub fn exported(mut self) -> Self {
        self.flags.exported = true;
        self
    }

    /// Attach a comment
    #[inline]
    #[must_use]
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Mark as an alias of another symbol
    #[inline]
    #[must_use]
    pub fn alias_of(mut self, target: SymbolId) -> Self {
        self.alias_of = Some(target);
        self
    }

    /// Add a call signature
    #[inline]
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// Owning container, `None` for the root
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<SymbolId> {
        self.parent
    }

    /// Child sequence
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[SymbolId] {
        &self.children
    }

    /// Presentation groups
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Group holding symbols of `kind`, if any
    #[must_use]
    pub fn group_for(&self, kind: SymbolKind) -> Option<&Group> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    /// True if this symbol is an alias
    #[inline]
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }

    /// True if this symbol is `id` or a pointer standing in for `id`
    #[inline]
    #[must_use]
    pub fn stands_for(&self, id: SymbolId) -> bool {
        self.id == id || self.alias_of == Some(id)
    }

    /// Sibling comparator: kind rank, then name, then identity
    #[must_use]
    pub fn presentation_cmp(&self, other: &Symbol) -> Ordering {
        self.kind
            .sort_rank()
            .cmp(&other.kind.sort_rank())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}
