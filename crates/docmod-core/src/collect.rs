//! Collection pass
//!
//! Walks the tree once, records `@moduledefinition` containers and `@module`
//! declarations, and strips the recognized tags so they never reach the
//! renderer.

use crate::config::ModuleConfig;
use crate::error::ReorganizeError;
use crate::registry::{DeclarationRegistry, DefinitionRegistry};
use docmod_symbol::{Comment, Symbol, SymbolKind, SymbolTree};

/// Registries produced by [`collect`]
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// Containers defining a logical module
    pub definitions: DefinitionRegistry,
    /// Declarations assigned to a logical module
    pub declarations: DeclarationRegistry,
}

/// Walk `tree` depth-first and fill both registries
///
/// # Errors
/// Only if the tree's own links are broken
pub fn collect(tree: &mut SymbolTree, config: &ModuleConfig) -> Result<Collected, ReorganizeError> {
    let mut collected = Collected::default();

    for id in tree.walk(tree.root()) {
        let symbol = tree.symbol_mut(id)?;
        if symbol.is_alias() || symbol.kind == SymbolKind::Project {
            continue;
        }

        if symbol.kind.is_container() {
            if let Some((name, comment)) = take_definition(symbol, &config.definition_tag) {
                tracing::debug!(symbol = %id, module = %name, "module definition");
                collected.definitions.add_definition(name, comment, id);
            }
        } else if !config.exported_only || symbol.flags.exported {
            if let Some(name) = take_module_tag(symbol, &config.module_tag) {
                tracing::debug!(symbol = %id, module = %name, "module declaration");
                if let Some(previous) = collected.declarations.add_declaration(name, id) {
                    tracing::debug!(symbol = %id, previous = %previous.module_name, "declaration overwritten");
                }
            }
        }
    }

    tracing::debug!(
        definitions = collected.definitions.len(),
        declarations = collected.declarations.len(),
        "collection finished"
    );
    Ok(collected)
}

/// Logical name from a definition tag: the first line, trimmed
#[must_use]
pub fn definition_name(tag_text: &str) -> Option<String> {
    tag_text
        .split(['\n', '\r'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Logical name from a module tag: the whole text, trimmed
#[must_use]
pub fn module_name(tag_text: &str) -> Option<String> {
    let name = tag_text.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn take_definition(symbol: &mut Symbol, tag: &str) -> Option<(String, Comment)> {
    let comment = symbol.comment.as_mut()?;
    let removed = comment.remove_tag(tag)?;
    let extracted = comment.clone();
    if !extracted.has_description() {
        symbol.comment = None;
    }
    let name = definition_name(&removed.text)?;
    Some((name, extracted))
}

fn take_module_tag(symbol: &mut Symbol, tag: &str) -> Option<String> {
    if symbol.kind.is_function_like() && !symbol.signatures.is_empty() {
        return symbol
            .signatures
            .iter_mut()
            .find_map(|signature| strip_module_tag(&mut signature.comment, tag));
    }
    strip_module_tag(&mut symbol.comment, tag)
}

/// Read and remove the first `tag` from `slot`
///
/// The tag is only removed when its payload is usable. A comment left
/// without descriptive text is dropped from the slot.
pub fn strip_module_tag(slot: &mut Option<Comment>, tag: &str) -> Option<String> {
    let comment = slot.as_mut()?;
    let name = module_name(&comment.tag(tag)?.text)?;
    comment.remove_tag(tag);
    if !comment.has_description() {
        *slot = None;
    }
    Some(name)
}
