//! Per-module IDE extension configuration.
//!
//! These are plain input values handed to synthesis through
//! [`IdeConfigSource`](crate::graph::IdeConfigSource); the populator copies
//! them into the output model without transformation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// IDE extension configuration of one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeConfig {
    /// Project-level settings (name, natures, build commands, linked resources)
    #[serde(default)]
    pub project: ProjectSettings,
    /// Source language settings, if the module declares any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_settings: Option<SourceSettingsConfig>,
}

impl IdeConfig {
    pub fn new(project: ProjectSettings) -> Self {
        Self {
            project,
            source_settings: None,
        }
    }

    pub fn with_source_settings(mut self, settings: SourceSettingsConfig) -> Self {
        self.source_settings = Some(settings);
        self
    }
}

/// Project-level IDE settings of one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Project name shown by the IDE; falls back to the build module name
    /// when empty
    #[serde(default)]
    pub name: String,
    /// Free-form project comment, surfaced as the model description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Nature identifiers, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub natures: Vec<String>,
    /// Builder invocations, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub build_commands: Vec<BuildCommandConfig>,
    /// Linked resource declarations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_resources: Vec<LinkedResourceConfig>,
}

impl ProjectSettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_natures(mut self, natures: Vec<String>) -> Self {
        self.natures = natures;
        self
    }

    pub fn with_build_commands(mut self, commands: Vec<BuildCommandConfig>) -> Self {
        self.build_commands = commands;
        self
    }

    pub fn with_linked_resources(mut self, resources: Vec<LinkedResourceConfig>) -> Self {
        self.linked_resources = resources;
        self
    }
}

/// One IDE builder invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildCommandConfig {
    pub name: String,
    /// Builder arguments, keyed by argument name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, String>,
}

impl BuildCommandConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }
}

/// A linked resource declaration.
///
/// Either `location` (filesystem path) or `location_uri` (virtual resource)
/// is set, never both; the distinction is the IDE's, not this crate's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedResourceConfig {
    pub name: String,
    /// Resource type code as understood by the IDE
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_uri: Option<String>,
}

/// Source language settings of one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettingsConfig {
    /// Source compatibility level, e.g. "1.8"
    pub source_level: String,
    /// Target bytecode level; defaults to the source level when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level: Option<String>,
}

impl SourceSettingsConfig {
    pub fn new(source_level: impl Into<String>) -> Self {
        Self {
            source_level: source_level.into(),
            target_level: None,
        }
    }

    pub fn with_target_level(mut self, target_level: impl Into<String>) -> Self {
        self.target_level = Some(target_level.into());
        self
    }
}
