//! Documentation symbol tree
//!
//! Arena-backed model of a documentation tree: symbols grouped into
//! containers, presentation groups, comments with block tags.
//!
//! # Overview
//!
//! The crate provides:
//! - **Symbol**: one documented entity, addressed by a stable [`SymbolId`]
//! - **SymbolTree**: the global symbol index and the parent/child links
//! - **TreeValidator**: invariant checks for parent, child and group links
//!
//! # Example
//!
//! ```rust
//! use docmod_symbol::{Symbol, SymbolKind, SymbolTree, TreeValidator};
//!
//! let mut tree = SymbolTree::new("docs");
//! let module = tree
//!     .insert(tree.root(), Symbol::new("shapes", SymbolKind::Module))
//!     .unwrap();
//! let circle = tree
//!     .insert(module, Symbol::new("Circle", SymbolKind::Class).exported())
//!     .unwrap();
//!
//! assert_eq!(tree.symbol(circle).unwrap().parent(), Some(module));
//! assert!(TreeValidator::structural().validate(&tree).is_ok());
//! ```

#![warn(missing_docs)]

pub mod comment;
pub mod group;
pub mod render;
pub mod symbol;
pub mod tree;
pub mod validation;

// Re-exports
pub use comment::{Comment, CommentTag};
pub use group::Group;
pub use render::{RenderedGroup, RenderedSymbol};
pub use symbol::{Signature, Symbol, SymbolFlags, SymbolId, SymbolKind};
pub use tree::{SymbolTree, TreeError};
pub use validation::{InvariantViolation, TreeValidator};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for tree operations
    pub use crate::{
        Comment, CommentTag, Group, Signature, Symbol, SymbolFlags, SymbolId, SymbolKind,
        SymbolTree, TreeError, TreeValidator,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
