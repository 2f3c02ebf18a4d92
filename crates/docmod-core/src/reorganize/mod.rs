//! Tree reorganization
//!
//! Consumes the two registries and moves every tagged declaration into its
//! logical module. The pass runs in four steps:
//!
//! 1. **Resolution** (`resolve`): find, promote or synthesize the target
//!    container for each declaration record.
//! 2. **Reparenting** (`reparent`): unlink the declaration from every other
//!    top-level container, link it under the target and fix group membership.
//! 3. **Pruning** (`prune`): send unclaimed leftovers to the root and delete
//!    containers left without children.
//! 4. **Sorting** (`sort`): impose the kind-then-name order on every child
//!    sequence and group, bottom-up.
//!
//! Declaration records are processed in registry order. Resolution queries
//! the live tree, so a container created for one record is found by the next.

mod prune;
mod reparent;
mod resolve;
mod sort;

use crate::config::ModuleConfig;
use crate::error::ReorganizeError;
use crate::registry::{DeclarationRegistry, DefinitionRegistry, ModuleDeclaration};
use docmod_symbol::SymbolTree;
use serde::Serialize;

/// What a reorganization run changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorganizeReport {
    /// Containers synthesized for names nothing else matched
    pub containers_created: Vec<String>,
    /// Definition containers moved to the root and renamed
    pub containers_promoted: Vec<String>,
    /// Declarations whose parent changed
    pub declarations_moved: usize,
    /// Declaration records that could not be applied
    pub declarations_skipped: usize,
    /// Unclaimed symbols moved to the root
    pub relocated_to_root: usize,
    /// Alias symbols removed from the index
    pub aliases_dropped: usize,
    /// Empty containers removed, in removal order
    pub containers_pruned: Vec<String>,
}

impl ReorganizeReport {
    /// True if the run left the tree shape untouched
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.containers_created.is_empty()
            && self.containers_promoted.is_empty()
            && self.declarations_moved == 0
            && self.relocated_to_root == 0
            && self.aliases_dropped == 0
            && self.containers_pruned.is_empty()
    }
}

/// Single-use driver holding the tree for the duration of one run
pub(crate) struct Reorganizer<'t> {
    tree: &'t mut SymbolTree,
    config: &'t ModuleConfig,
    report: ReorganizeReport,
}

impl<'t> Reorganizer<'t> {
    pub(crate) fn new(tree: &'t mut SymbolTree, config: &'t ModuleConfig) -> Self {
        Self {
            tree,
            config,
            report: ReorganizeReport::default(),
        }
    }

    fn apply(
        &mut self,
        declaration: &ModuleDeclaration,
        definitions: &DefinitionRegistry,
    ) -> Result<(), ReorganizeError> {
        let target = self.resolve_container(&declaration.module_name, definitions)?;
        self.reparent(declaration.symbol, target)
    }

    pub(crate) fn finish(self) -> ReorganizeReport {
        self.report
    }
}

/// Move every registered declaration into its logical module
///
/// Leaves the tree pruned and sorted. Running it again with the same
/// registries changes nothing.
///
/// # Errors
/// [`ReorganizeError::UnregisteredDefinition`] when a definition points at a
/// symbol that is no longer indexed, or a [`ReorganizeError::Tree`] when the
/// tree's links are broken. Authoring mistakes never fail the run.
pub fn reorganize(
    tree: &mut SymbolTree,
    definitions: &DefinitionRegistry,
    declarations: &DeclarationRegistry,
    config: &ModuleConfig,
) -> Result<ReorganizeReport, ReorganizeError> {
    let mut reorganizer = Reorganizer::new(tree, config);

    for declaration in declarations.iter() {
        reorganizer.apply(declaration, definitions)?;
    }
    if reorganizer.config.relocate_unclaimed {
        reorganizer.relocate_unclaimed(&declarations.claimed())?;
    }
    reorganizer.prune_empty_containers()?;
    reorganizer.sort_all()?;

    let report = reorganizer.finish();
    tracing::info!(
        created = report.containers_created.len(),
        promoted = report.containers_promoted.len(),
        moved = report.declarations_moved,
        skipped = report.declarations_skipped,
        relocated = report.relocated_to_root,
        aliases_dropped = report.aliases_dropped,
        pruned = report.containers_pruned.len(),
        "reorganization finished"
    );
    Ok(report)
}
