//! The synthesized IDE project model.
//!
//! Nodes live in a path-indexed arena ([`ProjectModel`]); parent and child
//! links are path references into that index, never owning edges. A model is
//! built once per synthesis run and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Conventional output location used when a module resolves no Output entry.
pub const DEFAULT_OUTPUT_PATH: &str = "bin";

/// A key/value attribute of a classified classpath entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClasspathAttribute {
    pub key: String,
    /// Attribute value; an absent raw value is coerced to `""`
    pub value: String,
}

/// An access rule restricting visibility of an entry's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub kind: i32,
    pub pattern: String,
}

/// An external library on a module's classpath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDependency {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_version: Option<crate::classpath::ModuleVersion>,
    pub exported: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ClasspathAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_rules: Vec<AccessRule>,
}

/// Target of a module dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModuleRef {
    /// The target module exists in the local hierarchy; `path` is its key in
    /// the model's node index
    Resolved { path: String },
    /// The target lives in another build; only its directory is known
    Unresolved { directory: PathBuf },
}

impl ModuleRef {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ModuleRef::Resolved { .. })
    }
}

/// A dependency on another module, local or cross-build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDependency {
    /// The referenced module's address with its single leading separator
    /// stripped
    pub relative_path: String,
    pub target: ModuleRef,
    pub exported: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ClasspathAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_rules: Vec<AccessRule>,
}

/// A source directory of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDirectory {
    pub path: String,
    pub directory: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
    /// Per-folder output override, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ClasspathAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_rules: Vec<AccessRule>,
}

/// A framework-provided classpath container. Contents are never expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClasspathContainer {
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ClasspathAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_rules: Vec<AccessRule>,
}

/// A module's build output location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLocation {
    pub path: String,
}

impl OutputLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for OutputLocation {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_PATH)
    }
}

/// A linked resource of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedResource {
    pub name: String,
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_uri: Option<String>,
}

/// A task of a project, with a back-reference to the owning node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    /// Path of the node this task belongs to
    pub project: String,
    /// Fully qualified task address
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An IDE builder invocation of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCommand {
    pub name: String,
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub arguments: std::collections::BTreeMap<String, String>,
}

/// Source language settings of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    pub source_level: String,
    pub target_level: String,
}

/// One module's synthesized project model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectNode {
    /// Hierarchical address; primary key for all cross-references
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub directory: PathBuf,
    /// Parent node path; `None` for the hierarchy root. Back-reference only,
    /// used for upward navigation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Child node paths in build declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_dependencies: Vec<ExternalDependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub module_dependencies: Vec<ModuleDependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_directories: Vec<SourceDirectory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classpath_containers: Vec<ClasspathContainer>,
    pub output_location: OutputLocation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_resources: Vec<LinkedResource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub natures: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub build_commands: Vec<BuildCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_settings: Option<SourceSettings>,
}

impl ProjectNode {
    /// Creates a bare node with identity and hierarchy fields only; resolved
    /// content is filled in by the populator.
    pub fn new(path: impl Into<String>, name: impl Into<String>, directory: PathBuf) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            description: None,
            directory,
            parent: None,
            children: Vec::new(),
            external_dependencies: Vec::new(),
            module_dependencies: Vec::new(),
            source_directories: Vec::new(),
            classpath_containers: Vec::new(),
            output_location: OutputLocation::default(),
            linked_resources: Vec::new(),
            tasks: Vec::new(),
            natures: Vec::new(),
            build_commands: Vec::new(),
            source_settings: None,
        }
    }
}

/// The result of one synthesis run: a fully populated, path-indexed node tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectModel {
    /// Path of the module the synthesis was requested for
    requested: String,
    /// Path of the overall hierarchy root
    root: String,
    /// The path index; the only legal way to resolve a cross-module reference
    nodes: HashMap<String, ProjectNode>,
}

impl ProjectModel {
    pub(crate) fn new(requested: String, root: String, nodes: HashMap<String, ProjectNode>) -> Self {
        Self {
            requested,
            root,
            nodes,
        }
    }

    /// The node synthesis was requested for. Not necessarily the hierarchy root.
    pub fn requested(&self) -> &ProjectNode {
        &self.nodes[&self.requested]
    }

    /// The hierarchy root node.
    pub fn root(&self) -> &ProjectNode {
        &self.nodes[&self.root]
    }

    /// Looks up a node by module path.
    pub fn node(&self, path: &str) -> Option<&ProjectNode> {
        self.nodes.get(path)
    }

    pub(crate) fn node_mut(&mut self, path: &str) -> Option<&mut ProjectNode> {
        self.nodes.get_mut(path)
    }

    /// Number of nodes in the model.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All module paths in the index.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Collects the subtree under `path` depth-first, parent before children.
    pub fn subtree(&self, path: &str) -> Vec<&ProjectNode> {
        let mut collected = Vec::new();
        if let Some(node) = self.node(path) {
            self.collect_subtree(node, &mut collected);
        }
        collected
    }

    fn collect_subtree<'a>(&'a self, node: &'a ProjectNode, into: &mut Vec<&'a ProjectNode>) {
        into.push(node);
        for child in &node.children {
            if let Some(child_node) = self.node(child) {
                self.collect_subtree(child_node, into);
            }
        }
    }
}
