//! Fills resolved content into the built node tree.

use std::collections::HashSet;

use tracing::trace;

use crate::error::{ModelError, Result};
use crate::graph::{ClasspathResolver, ExternalProjectResolver, IdeConfigSource, TaskEnumerator};
use crate::model::{
    BuildCommand, LinkedResource, OutputLocation, ProjectModel, SourceSettings, TaskRef,
};

use super::classify::{classify, Classified, ClassifyContext};
use super::ModelScope;

/// Walks the tree top-down and resolves each node's content exactly once.
pub(crate) struct Populator<'a> {
    config: &'a dyn IdeConfigSource,
    classpath: &'a dyn ClasspathResolver,
    tasks: &'a dyn TaskEnumerator,
    external: &'a dyn ExternalProjectResolver,
    scope: ModelScope,
    /// Frozen snapshot of the index keys, for module-dependency lookup
    local_paths: HashSet<String>,
}

impl<'a> Populator<'a> {
    pub(crate) fn new(
        config: &'a dyn IdeConfigSource,
        classpath: &'a dyn ClasspathResolver,
        tasks: &'a dyn TaskEnumerator,
        external: &'a dyn ExternalProjectResolver,
        scope: ModelScope,
        local_paths: HashSet<String>,
    ) -> Self {
        Self {
            config,
            classpath,
            tasks,
            external,
            scope,
            local_paths,
        }
    }

    /// Populates every node reachable from the hierarchy root. The first
    /// failure aborts the run; no partially filled model is returned.
    pub(crate) fn populate(&self, model: &mut ProjectModel) -> Result<()> {
        let root = model.root().path.clone();
        self.populate_node(model, &root)
    }

    fn populate_node(&self, model: &mut ProjectModel, path: &str) -> Result<()> {
        let ide = self.config.ide_config(path)?;

        // A persisted on-disk classpath takes precedence: the computed
        // dependency set is merged into it by the resolver. The choice is
        // per module.
        let modules_only = self.scope == ModelScope::ModulesOnly;
        let entries = if self.classpath.has_persisted(path) {
            self.classpath.merged(path, modules_only)?
        } else {
            self.classpath.resolve(path, modules_only)?
        };

        let ctx = ClassifyContext {
            module_path: path,
            local_paths: &self.local_paths,
            external: self.external,
        };

        let mut external_dependencies = Vec::new();
        let mut module_dependencies = Vec::new();
        let mut source_directories = Vec::new();
        let mut classpath_containers = Vec::new();
        let mut output_location: Option<OutputLocation> = None;

        for entry in &entries {
            match classify(entry, &ctx)? {
                Some(Classified::External(dep)) => external_dependencies.push(dep),
                Some(Classified::Module(dep)) => module_dependencies.push(dep),
                Some(Classified::Source(dir)) => source_directories.push(dir),
                Some(Classified::Container(container)) => classpath_containers.push(container),
                // Last Output entry wins, matching resolution order
                Some(Classified::Output(output)) => output_location = Some(output),
                None => {}
            }
        }

        let tasks = if self.scope.includes_tasks() {
            self.tasks
                .tasks_for(path)
                .into_iter()
                .map(|task| TaskRef {
                    project: path.to_string(),
                    path: task.path,
                    name: task.name,
                    description: task.description,
                })
                .collect()
        } else {
            Vec::new()
        };

        trace!(
            module = path,
            entries = entries.len(),
            tasks = tasks.len(),
            "populated module"
        );

        let node = model
            .node_mut(path)
            .ok_or_else(|| ModelError::UnknownModule(path.to_string()))?;

        node.external_dependencies = external_dependencies;
        node.module_dependencies = module_dependencies;
        node.source_directories = source_directories;
        node.classpath_containers = classpath_containers;
        node.output_location = output_location.unwrap_or_default();
        node.linked_resources = ide
            .project
            .linked_resources
            .iter()
            .map(|link| LinkedResource {
                name: link.name.clone(),
                resource_type: link.resource_type.clone(),
                location: link.location.clone(),
                location_uri: link.location_uri.clone(),
            })
            .collect();
        node.natures = ide.project.natures.clone();
        node.build_commands = ide
            .project
            .build_commands
            .iter()
            .map(|command| BuildCommand {
                name: command.name.clone(),
                arguments: command.arguments.clone(),
            })
            .collect();
        node.source_settings = ide.source_settings.as_ref().map(|settings| SourceSettings {
            source_level: settings.source_level.clone(),
            target_level: settings
                .target_level
                .clone()
                .unwrap_or_else(|| settings.source_level.clone()),
        });
        node.tasks = tasks;

        let children = node.children.clone();
        for child in children {
            self.populate_node(model, &child)?;
        }
        Ok(())
    }
}
