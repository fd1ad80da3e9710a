//! Raw classpath entries as produced by a classpath resolver.
//!
//! Entries arrive already resolved; this crate only classifies them into the
//! typed output model. One tagged union covers every entry shape the
//! pipeline can see, including the unsupported `Variable` kind.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A string attribute attached to a classpath entry.
///
/// Values are optional on the wire; classification coerces an absent value
/// to the empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAttribute {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RawAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn without_value(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// An access rule as carried by a raw entry.
///
/// The kind is a string code upstream; classification parses it to an
/// integer and treats a non-numeric code as corrupt data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAccessRule {
    pub kind: String,
    pub pattern: String,
}

impl RawAccessRule {
    pub fn new(kind: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            pattern: pattern.into(),
        }
    }
}

/// Coordinates identifying the published module an external library came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleVersion {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleVersion {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// One resolved classpath entry, before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawClasspathEntry {
    /// An external library file
    Library {
        file: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        javadoc: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        module_version: Option<ModuleVersion>,
        #[serde(default)]
        exported: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<RawAttribute>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        access_rules: Vec<RawAccessRule>,
    },
    /// A dependency on another module, addressed by its full module path
    ModuleDependency {
        module_path: String,
        #[serde(default)]
        exported: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<RawAttribute>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        access_rules: Vec<RawAccessRule>,
    },
    /// A source folder of the module itself
    SourceFolder {
        path: String,
        directory: PathBuf,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        includes: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        excludes: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<RawAttribute>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        access_rules: Vec<RawAccessRule>,
    },
    /// A framework-provided classpath container, referenced by path only
    Container {
        path: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<RawAttribute>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        access_rules: Vec<RawAccessRule>,
    },
    /// The module's default output location
    Output { path: String },
    /// A variable-based entry. Not supported by this pipeline and skipped
    /// during classification, because resolving variable mappings needs
    /// context the pipeline does not have.
    Variable { path: String },
}

impl RawClasspathEntry {
    /// Short name of the entry kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawClasspathEntry::Library { .. } => "library",
            RawClasspathEntry::ModuleDependency { .. } => "module_dependency",
            RawClasspathEntry::SourceFolder { .. } => "source_folder",
            RawClasspathEntry::Container { .. } => "container",
            RawClasspathEntry::Output { .. } => "output",
            RawClasspathEntry::Variable { .. } => "variable",
        }
    }

    /// Convenience constructor for a plain library entry.
    pub fn library(file: impl Into<PathBuf>) -> Self {
        RawClasspathEntry::Library {
            file: file.into(),
            source: None,
            javadoc: None,
            module_version: None,
            exported: false,
            attributes: Vec::new(),
            access_rules: Vec::new(),
        }
    }

    /// Convenience constructor for a module dependency entry.
    pub fn module_dependency(module_path: impl Into<String>) -> Self {
        RawClasspathEntry::ModuleDependency {
            module_path: module_path.into(),
            exported: false,
            attributes: Vec::new(),
            access_rules: Vec::new(),
        }
    }

    /// Convenience constructor for a source folder entry.
    pub fn source_folder(path: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        RawClasspathEntry::SourceFolder {
            path: path.into(),
            directory: directory.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
            output: None,
            attributes: Vec::new(),
            access_rules: Vec::new(),
        }
    }
}
