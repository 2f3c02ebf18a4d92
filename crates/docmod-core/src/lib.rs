//! docmod core - logical module reorganization for documentation trees
//!
//! Authors tag declarations with `@module Name` and files with
//! `@moduledefinition Name`; this crate moves every tagged declaration into
//! the logical module it names:
//! - Collects definitions and declarations in one walk, stripping the tags
//! - Resolves each logical name to an existing, promoted or new container
//! - Reparents declarations and keeps kind groups consistent
//! - Prunes containers left empty and sorts the tree deterministically
//!
//! # Example
//!
//! ```rust
//! use docmod_core::{run, ModuleConfig};
//! use docmod_symbol::{Comment, Symbol, SymbolKind, SymbolTree};
//!
//! let mut tree = SymbolTree::new("docs");
//! let file = tree.insert(tree.root(), Symbol::new("src/helpers", SymbolKind::Module))?;
//! tree.insert(
//!     file,
//!     Symbol::new("clamp", SymbolKind::Function)
//!         .exported()
//!         .with_comment(Comment::new("Clamp a value.").with_tag("module", "Utils")),
//! )?;
//!
//! let report = run(&mut tree, &ModuleConfig::default())?;
//!
//! assert_eq!(report.containers_created, vec!["Utils".to_string()]);
//! assert!(tree.find_top_level_container("src/helpers").is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod collect;
pub mod config;
pub mod error;
pub mod registry;
pub mod reorganize;

pub use collect::{collect, Collected};
pub use config::{ModuleConfig, MODULE_DEFINITION_TAG, MODULE_TAG};
pub use error::{ConfigError, ReorganizeError};
pub use registry::{
    DeclarationRegistry, DefinitionRegistry, ModuleDeclaration, ModuleDefinition,
};
pub use reorganize::{reorganize, ReorganizeReport};

use docmod_symbol::SymbolTree;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with docmod
    pub use crate::{
        collect, reorganize, run, Collected, DeclarationRegistry, DefinitionRegistry,
        ModuleConfig, ReorganizeError, ReorganizeReport,
    };
    pub use docmod_symbol::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collect tags from `tree` and reorganize it in one go
///
/// # Errors
/// Rejected configuration, or any [`reorganize`] failure
pub fn run(tree: &mut SymbolTree, config: &ModuleConfig) -> Result<ReorganizeReport, ReorganizeError> {
    config.validate()?;
    let Collected {
        definitions,
        declarations,
    } = collect(tree, config)?;
    reorganize(tree, &definitions, &declarations, config)
}
