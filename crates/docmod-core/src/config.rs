//! Reorganization configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tag assigning a declaration to a logical module
pub const MODULE_TAG: &str = "module";

/// Tag naming the logical module a container defines
pub const MODULE_DEFINITION_TAG: &str = "moduledefinition";

/// Module reorganization settings
///
/// `Default` reproduces the stock behavior: `@module` / `@moduledefinition`,
/// exported declarations only, unclaimed children relocated to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Tag read from declaration and signature comments
    pub module_tag: String,
    /// Tag read from container comments
    pub definition_tag: String,
    /// Ignore tagged declarations that are not exported
    pub exported_only: bool,
    /// Move children nobody claimed out of top-level containers to the root
    pub relocate_unclaimed: bool,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            module_tag: MODULE_TAG.to_string(),
            definition_tag: MODULE_DEFINITION_TAG.to_string(),
            exported_only: true,
            relocate_unclaimed: true,
        }
    }
}

impl ModuleConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different declaration tag
    #[inline]
    #[must_use]
    pub fn with_module_tag(mut self, tag: impl Into<String>) -> Self {
        self.module_tag = tag.into();
        self
    }

    /// With a different definition tag
    #[inline]
    #[must_use]
    pub fn with_definition_tag(mut self, tag: impl Into<String>) -> Self {
        self.definition_tag = tag.into();
        self
    }

    /// With or without the export filter
    #[inline]
    #[must_use]
    pub fn with_exported_only(mut self, exported_only: bool) -> Self {
        self.exported_only = exported_only;
        self
    }

    /// With or without relocation of unclaimed children
    #[inline]
    #[must_use]
    pub fn with_relocate_unclaimed(mut self, relocate: bool) -> Self {
        self.relocate_unclaimed = relocate;
        self
    }

    /// Parse a TOML fragment; missing keys take their defaults
    ///
    /// # Errors
    /// Malformed TOML or a configuration rejected by [`validate`](Self::validate)
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unusable tag names
    ///
    /// # Errors
    /// Blank tag names, or both tags sharing one name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module_tag.trim().is_empty() {
            return Err(ConfigError::BlankTag { field: "module_tag" });
        }
        if self.definition_tag.trim().is_empty() {
            return Err(ConfigError::BlankTag {
                field: "definition_tag",
            });
        }
        if self.module_tag == self.definition_tag {
            return Err(ConfigError::SameTags(self.module_tag.clone()));
        }
        Ok(())
    }
}
