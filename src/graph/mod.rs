//! The build-side view of a multi-module project.
//!
//! This module provides the input handle for model synthesis:
//! - The module hierarchy (`BuildModule`)
//! - Per-module task descriptions (`TaskInfo`)
//! - Collaborator traits for configuration, classpath and task access

pub mod capabilities;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use capabilities::{
    ClasspathResolver, ExternalProjectResolver, IdeConfigSource, TaskEnumerator,
};

/// One module of the build hierarchy.
///
/// Module paths are `/`-delimited addresses: the root module is `"/"`,
/// its children `"/app"`, `"/lib/core"` and so on. The path is the module's
/// identity everywhere in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildModule {
    /// Hierarchical address of the module
    pub path: String,
    /// Module name as declared by the build
    pub name: String,
    /// Directory the module lives in
    pub directory: PathBuf,
    /// Child modules, in build declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BuildModule>,
}

impl BuildModule {
    pub fn new(path: impl Into<String>, name: impl Into<String>, directory: PathBuf) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            directory,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<BuildModule>) -> Self {
        self.children = children;
        self
    }

    /// Find a module by path anywhere in this subtree.
    pub fn find(&self, path: &str) -> Option<&BuildModule> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(path))
    }

    /// Depth-first iteration over this module and all descendants.
    pub fn iter(&self) -> ModuleIter<'_> {
        ModuleIter { stack: vec![self] }
    }

    /// Number of modules in this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(BuildModule::count).sum::<usize>()
    }
}

/// Depth-first iterator over a module subtree.
pub struct ModuleIter<'a> {
    stack: Vec<&'a BuildModule>,
}

impl<'a> Iterator for ModuleIter<'a> {
    type Item = &'a BuildModule;

    fn next(&mut self) -> Option<Self::Item> {
        let module = self.stack.pop()?;
        // Push in reverse so children come out in declaration order
        for child in module.children.iter().rev() {
            self.stack.push(child);
        }
        Some(module)
    }
}

/// An externally visible task of one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Task name, unique within the module
    pub name: String,
    /// Fully qualified task address
    pub path: String,
    /// Human readable description, if the build declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskInfo {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> BuildModule {
        BuildModule::new("/", "root", PathBuf::from("/work/root")).with_children(vec![
            BuildModule::new("/app", "app", PathBuf::from("/work/root/app")),
            BuildModule::new("/lib", "lib", PathBuf::from("/work/root/lib")).with_children(vec![
                BuildModule::new("/lib/core", "core", PathBuf::from("/work/root/lib/core")),
            ]),
        ])
    }

    #[test]
    fn test_find_by_path() {
        let tree = sample_tree();
        assert_eq!(tree.find("/").unwrap().name, "root");
        assert_eq!(tree.find("/lib/core").unwrap().name, "core");
        assert!(tree.find("/missing").is_none());
    }

    #[test]
    fn test_iter_depth_first_order() {
        let tree = sample_tree();
        let paths: Vec<&str> = tree.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/app", "/lib", "/lib/core"]);
    }

    #[test]
    fn test_count() {
        assert_eq!(sample_tree().count(), 4);
    }

    #[test]
    fn test_task_info_builder() {
        let task = TaskInfo::new("assemble", "/app:assemble").with_description("Builds the app");
        assert_eq!(task.name, "assemble");
        assert_eq!(task.path, "/app:assemble");
        assert_eq!(task.description, Some("Builds the app".to_string()));
    }
}
