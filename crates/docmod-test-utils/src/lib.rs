//! Testing utilities for the docmod workspace
//!
//! Shared tree fixtures, tagged comments and proptest strategies.

#![allow(missing_docs)]

use docmod_symbol::{Comment, Signature, Symbol, SymbolId, SymbolKind, SymbolTree};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

/// Logical module names used by generated trees
pub const LOGICAL_MODULES: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta"];

const LEAF_KINDS: [SymbolKind; 5] = [
    SymbolKind::Class,
    SymbolKind::Interface,
    SymbolKind::Function,
    SymbolKind::Variable,
    SymbolKind::Enum,
];

/// Install a fmt subscriber honoring `RUST_LOG`; safe to call from every test
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Comment carrying only `@module <name>`
pub fn module_tag(name: &str) -> Comment {
    Comment::default().with_tag("module", name)
}

/// Comment carrying a summary and `@moduledefinition <name>`
pub fn definition_tag(summary: &str, name: &str) -> Comment {
    Comment::new(summary).with_tag("moduledefinition", format!("{name}\n"))
}

/// Incremental builder for upstream-shaped trees
#[derive(Debug, Clone)]
pub struct TreeFixture {
    pub tree: SymbolTree,
}

impl Default for TreeFixture {
    fn default() -> Self {
        Self::new("docs")
    }
}

impl TreeFixture {
    pub fn new(project: &str) -> Self {
        Self {
            tree: SymbolTree::new(project),
        }
    }

    pub fn root(&self) -> SymbolId {
        self.tree.root()
    }

    /// Top-level module container
    pub fn module(&mut self, name: &str) -> SymbolId {
        let root = self.tree.root();
        self.add(root, Symbol::new(name, SymbolKind::Module).exported())
    }

    /// Module container carrying a definition tag
    pub fn defining_module(&mut self, name: &str, summary: &str, logical: &str) -> SymbolId {
        let root = self.tree.root();
        self.add(
            root,
            Symbol::new(name, SymbolKind::Module)
                .exported()
                .with_comment(definition_tag(summary, logical)),
        )
    }

    pub fn namespace(&mut self, parent: SymbolId, name: &str) -> SymbolId {
        self.add(parent, Symbol::new(name, SymbolKind::Namespace).exported())
    }

    /// Exported declaration without documentation
    pub fn declaration(&mut self, parent: SymbolId, name: &str, kind: SymbolKind) -> SymbolId {
        self.add(parent, Symbol::new(name, kind).exported())
    }

    /// Exported declaration tagged `@module <module>`
    pub fn tagged(
        &mut self,
        parent: SymbolId,
        name: &str,
        kind: SymbolKind,
        module: &str,
    ) -> SymbolId {
        self.add(
            parent,
            Symbol::new(name, kind)
                .exported()
                .with_comment(module_tag(module)),
        )
    }

    /// Exported function whose only signature is tagged `@module <module>`
    pub fn tagged_function(&mut self, parent: SymbolId, name: &str, module: &str) -> SymbolId {
        self.add(
            parent,
            Symbol::new(name, SymbolKind::Function)
                .exported()
                .with_signature(Signature::new(name).with_comment(module_tag(module))),
        )
    }

    /// Re-export standing in for `target`
    pub fn alias(&mut self, parent: SymbolId, target: SymbolId) -> SymbolId {
        let (name, kind) = {
            let symbol = self.tree.symbol(target).expect("alias target exists");
            (symbol.name.clone(), symbol.kind)
        };
        self.add(parent, Symbol::new(name, kind).exported().alias_of(target))
    }

    pub fn add(&mut self, parent: SymbolId, symbol: Symbol) -> SymbolId {
        self.tree.insert(parent, symbol).expect("fixture parent is a container")
    }

    pub fn into_tree(self) -> SymbolTree {
        self.tree
    }
}

/// One generated leaf: physical file, nesting, kind, tag, export flag, name
#[derive(Debug, Clone)]
struct LeafSpec {
    file: usize,
    nested: bool,
    kind: usize,
    module: Option<usize>,
    exported: bool,
    name: usize,
    aliased_in: Option<usize>,
}

fn leaf_spec(files: usize) -> impl Strategy<Value = LeafSpec> {
    (
        0..files,
        any::<bool>(),
        0..LEAF_KINDS.len(),
        proptest::option::of(0..LOGICAL_MODULES.len()),
        proptest::bool::weighted(0.8),
        0..6usize,
        proptest::option::weighted(0.2, 0..files),
    )
        .prop_map(|(file, nested, kind, module, exported, name, aliased_in)| LeafSpec {
            file,
            nested,
            kind,
            module,
            exported,
            name,
            aliased_in,
        })
}

/// Physical file: optional logical name it is called by, optional definition
#[derive(Debug, Clone)]
struct FileSpec {
    named_as: Option<usize>,
    definition: Option<usize>,
}

fn file_spec() -> impl Strategy<Value = FileSpec> {
    (
        proptest::option::weighted(0.2, 0..LOGICAL_MODULES.len()),
        proptest::option::weighted(0.3, 0..LOGICAL_MODULES.len()),
    )
        .prop_map(|(named_as, definition)| FileSpec {
            named_as,
            definition,
        })
}

/// Upstream-shaped tree with physical files, namespaces, tagged and untagged
/// leaves, aliases and optional definition tags
///
/// Files are mostly named `file*`, but some take a name from
/// [`LOGICAL_MODULES`] so physical and logical names can collide.
pub fn arb_tagged_tree() -> impl Strategy<Value = SymbolTree> {
    (1..5usize)
        .prop_flat_map(|files| {
            (
                Just(files),
                proptest::collection::vec(file_spec(), files),
                proptest::collection::vec(leaf_spec(files), 0..24),
            )
        })
        .prop_map(|(files, specs, leaves)| build_tree(files, &specs, &leaves))
}

fn build_tree(files: usize, specs: &[FileSpec], leaves: &[LeafSpec]) -> SymbolTree {
    let mut fixture = TreeFixture::default();
    let mut modules = Vec::with_capacity(files);
    let mut namespaces = Vec::with_capacity(files);
    for (i, spec) in specs.iter().enumerate().take(files) {
        let name = spec
            .named_as
            .map_or_else(|| format!("file{i}"), |k| LOGICAL_MODULES[k].to_string());
        let module = match spec.definition {
            Some(logical) => {
                fixture.defining_module(&name, &format!("About {name}."), LOGICAL_MODULES[logical])
            }
            None => fixture.module(&name),
        };
        modules.push(module);
        namespaces.push(fixture.namespace(module, &format!("ns{i}")));
    }

    for leaf in leaves {
        let parent = if leaf.nested {
            namespaces[leaf.file]
        } else {
            modules[leaf.file]
        };
        let kind = LEAF_KINDS[leaf.kind];
        let mut symbol = Symbol::new(format!("item{}", leaf.name), kind);
        if leaf.exported {
            symbol = symbol.exported();
        }
        if let Some(module) = leaf.module {
            symbol = symbol.with_comment(module_tag(LOGICAL_MODULES[module]));
        }
        let id = fixture.add(parent, symbol);
        if let Some(file) = leaf.aliased_in {
            fixture.alias(modules[file], id);
        }
    }
    fixture.into_tree()
}
