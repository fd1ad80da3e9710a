//! TOML build descriptors.
//!
//! A descriptor is a self-contained description of a build: the module
//! hierarchy plus each module's IDE configuration, tasks and classpath
//! entries. Loading one yields the [`BuildModule`] tree together with an
//! in-memory implementation of every capability the synthesizer needs, so
//! host tooling (and the test suite) can drive synthesis without a live
//! build engine.
//!
//! ## Example
//!
//! ```toml
//! [build]
//! name = "demo"
//!
//! [[module]]
//! path = "/"
//! [module.ide.project]
//! name = "demo-root"
//!
//! [[module]]
//! path = "/app"
//! [module.ide.project]
//! name = "demo-app"
//! [[module.classpath]]
//! kind = "module_dependency"
//! module_path = "/lib"
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::classpath::RawClasspathEntry;
use crate::config::IdeConfig;
use crate::error::{ModelError, Result};
use crate::graph::{
    BuildModule, ClasspathResolver, ExternalProjectResolver, IdeConfigSource, TaskEnumerator,
    TaskInfo,
};

#[derive(Debug, Deserialize)]
struct DescriptorFile {
    build: BuildSection,
    #[serde(default, rename = "module")]
    modules: Vec<ModuleSection>,
    /// Cross-build module identifiers and their directories
    #[serde(default)]
    external: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Deserialize)]
struct BuildSection {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ModuleSection {
    path: String,
    name: Option<String>,
    directory: Option<PathBuf>,
    ide: Option<IdeConfig>,
    #[serde(default, rename = "task")]
    tasks: Vec<TaskInfo>,
    #[serde(default)]
    classpath: Vec<RawClasspathEntry>,
    /// Entry list standing in for a merged persisted classpath configuration
    persisted: Option<Vec<RawClasspathEntry>>,
}

/// Per-module data kept after loading.
#[derive(Debug)]
struct ModuleData {
    ide: Option<IdeConfig>,
    tasks: Vec<TaskInfo>,
    classpath: Vec<RawClasspathEntry>,
    persisted: Option<Vec<RawClasspathEntry>>,
}

/// A loaded build descriptor, usable as every synthesis capability.
#[derive(Debug)]
pub struct DescriptorBuild {
    name: String,
    root: BuildModule,
    modules: HashMap<String, ModuleData>,
    external: BTreeMap<String, PathBuf>,
}

/// Loads a build descriptor from a TOML file.
pub fn load(path: &Path) -> Result<DescriptorBuild> {
    let content = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse(&content, base_dir)
}

/// Parses descriptor content; module directories default to `base_dir`
/// joined with the module path.
pub fn parse(content: &str, base_dir: &Path) -> Result<DescriptorBuild> {
    let file: DescriptorFile = toml::from_str(content)
        .map_err(|e| ModelError::Descriptor(format!("invalid descriptor: {}", e)))?;

    if file.modules.is_empty() {
        return Err(ModelError::Descriptor("descriptor has no modules".to_string()));
    }

    let mut data = HashMap::new();
    let mut order = Vec::new();
    for section in &file.modules {
        if data.contains_key(&section.path) {
            return Err(ModelError::Descriptor(format!(
                "duplicate module path: {}",
                section.path
            )));
        }
        order.push(section.path.clone());
        data.insert(
            section.path.clone(),
            ModuleData {
                ide: section.ide.clone(),
                tasks: section.tasks.clone(),
                classpath: section.classpath.clone(),
                persisted: section.persisted.clone(),
            },
        );
    }

    let root = build_tree(&file, base_dir, &order)?;

    Ok(DescriptorBuild {
        name: file.build.name,
        root,
        modules: data,
        external: file.external,
    })
}

/// Assembles the module tree from the flat section list. A module's parent
/// is the longest proper path prefix; every non-root module needs one.
fn build_tree(file: &DescriptorFile, base_dir: &Path, order: &[String]) -> Result<BuildModule> {
    if !order.iter().any(|p| p == "/") {
        return Err(ModelError::Descriptor(
            "descriptor has no root module (\"/\")".to_string(),
        ));
    }

    let mut children_of: HashMap<&str, Vec<&str>> = HashMap::new();
    for path in order {
        if path == "/" {
            continue;
        }
        let parent = parent_path(path);
        if !order.iter().any(|p| p == parent) {
            return Err(ModelError::Descriptor(format!(
                "module {} has no parent module {}",
                path, parent
            )));
        }
        children_of.entry(parent).or_default().push(path);
    }

    let sections: HashMap<&str, &ModuleSection> =
        file.modules.iter().map(|m| (m.path.as_str(), m)).collect();

    Ok(assemble(&sections, &children_of, "/", &file.build.name, base_dir))
}

fn assemble(
    sections: &HashMap<&str, &ModuleSection>,
    children_of: &HashMap<&str, Vec<&str>>,
    path: &str,
    build_name: &str,
    base_dir: &Path,
) -> BuildModule {
    let section = sections[path];
    let name = section.name.clone().unwrap_or_else(|| {
        if path == "/" {
            build_name.to_string()
        } else {
            path.rsplit('/').next().unwrap_or(path).to_string()
        }
    });
    let directory = section
        .directory
        .clone()
        .unwrap_or_else(|| base_dir.join(path.trim_start_matches('/')));

    let children = children_of
        .get(path)
        .map(|paths| {
            paths
                .iter()
                .map(|child| assemble(sections, children_of, child, build_name, base_dir))
                .collect()
        })
        .unwrap_or_default();

    BuildModule::new(path, name, directory).with_children(children)
}

fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "/",
    }
}

impl DescriptorBuild {
    /// Build name from the `[build]` section.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root of the module hierarchy.
    pub fn root(&self) -> &BuildModule {
        &self.root
    }

    fn module(&self, module_path: &str) -> Result<&ModuleData> {
        self.modules
            .get(module_path)
            .ok_or_else(|| ModelError::UnknownModule(module_path.to_string()))
    }
}

impl IdeConfigSource for DescriptorBuild {
    fn ide_config(&self, module_path: &str) -> Result<IdeConfig> {
        self.module(module_path)?
            .ide
            .clone()
            .ok_or_else(|| ModelError::MissingExtensionConfiguration(module_path.to_string()))
    }
}

impl ClasspathResolver for DescriptorBuild {
    fn resolve(&self, module_path: &str, modules_only: bool) -> Result<Vec<RawClasspathEntry>> {
        let entries = self.module(module_path)?.classpath.clone();
        if modules_only {
            Ok(entries
                .into_iter()
                .filter(|entry| {
                    !matches!(
                        entry,
                        RawClasspathEntry::Library { .. } | RawClasspathEntry::Container { .. }
                    )
                })
                .collect())
        } else {
            Ok(entries)
        }
    }

    fn has_persisted(&self, module_path: &str) -> bool {
        self.modules
            .get(module_path)
            .map(|m| m.persisted.is_some())
            .unwrap_or(false)
    }

    /// Persisted entries first, then computed entries whose target is not
    /// already covered (append-if-absent).
    fn merged(&self, module_path: &str, modules_only: bool) -> Result<Vec<RawClasspathEntry>> {
        let module = self.module(module_path)?;
        let mut merged = module.persisted.clone().unwrap_or_default();
        for entry in self.resolve(module_path, modules_only)? {
            let key = entry_key(&entry);
            if !merged.iter().any(|existing| entry_key(existing) == key) {
                merged.push(entry);
            }
        }
        Ok(merged)
    }
}

impl TaskEnumerator for DescriptorBuild {
    fn tasks_for(&self, module_path: &str) -> Vec<TaskInfo> {
        self.modules
            .get(module_path)
            .map(|m| m.tasks.clone())
            .unwrap_or_default()
    }
}

impl ExternalProjectResolver for DescriptorBuild {
    fn project_directory(&self, identifier: &str) -> Result<PathBuf> {
        self.external
            .get(identifier)
            .cloned()
            .ok_or_else(|| ModelError::UnresolvedModuleDependency(identifier.to_string()))
    }
}

/// Identity used for merge dedup: the entry kind plus its addressable target.
fn entry_key(entry: &RawClasspathEntry) -> (&'static str, String) {
    let target = match entry {
        RawClasspathEntry::Library { file, .. } => file.display().to_string(),
        RawClasspathEntry::ModuleDependency { module_path, .. } => module_path.clone(),
        RawClasspathEntry::SourceFolder { path, .. } => path.clone(),
        RawClasspathEntry::Container { path, .. } => path.clone(),
        // At most one output matters downstream
        RawClasspathEntry::Output { .. } => String::new(),
        RawClasspathEntry::Variable { path } => path.clone(),
    };
    (entry.kind_name(), target)
}
