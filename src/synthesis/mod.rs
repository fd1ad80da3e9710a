//! Project model synthesis.
//!
//! The synthesizer drives the pipeline: build the node hierarchy and its
//! path index, then populate every node with resolved classpath content and
//! IDE metadata. A run either returns a fully populated model or fails on
//! the first error.

mod classify;
mod hierarchy;
mod populate;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use tracing::debug;

use crate::error::{ModelError, Result};
use crate::graph::{
    BuildModule, ClasspathResolver, ExternalProjectResolver, IdeConfigSource, TaskEnumerator,
};
use crate::model::ProjectModel;

use populate::Populator;

/// How much of the model a consumer asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelScope {
    /// Complete model: full classpath and per-module tasks
    Full,
    /// Hierarchy and module-to-module dependencies only; no external
    /// libraries, no tasks
    ModulesOnly,
}

impl ModelScope {
    pub fn includes_tasks(&self) -> bool {
        matches!(self, ModelScope::Full)
    }
}

/// Synthesizes consumer-facing project models from a build hierarchy.
///
/// All collaborators are passed in explicitly; the synthesizer holds no
/// state of its own and runs are independent of each other.
pub struct ModelSynthesizer<'a> {
    config: &'a dyn IdeConfigSource,
    classpath: &'a dyn ClasspathResolver,
    tasks: &'a dyn TaskEnumerator,
    external: &'a dyn ExternalProjectResolver,
}

impl<'a> ModelSynthesizer<'a> {
    pub fn new(
        config: &'a dyn IdeConfigSource,
        classpath: &'a dyn ClasspathResolver,
        tasks: &'a dyn TaskEnumerator,
        external: &'a dyn ExternalProjectResolver,
    ) -> Self {
        Self {
            config,
            classpath,
            tasks,
            external,
        }
    }

    /// Builds the model for `requested_path` within the hierarchy rooted at
    /// `root`.
    ///
    /// The whole hierarchy is traversed and populated even when a sub-module
    /// is requested, so cross-module references resolve against the complete
    /// index; the requested node is recorded as the result root.
    pub fn synthesize(
        &self,
        root: &BuildModule,
        requested_path: &str,
        scope: ModelScope,
    ) -> Result<ProjectModel> {
        if root.find(requested_path).is_none() {
            return Err(ModelError::UnknownModule(requested_path.to_string()));
        }

        let nodes = hierarchy::build(root, self.config)?;
        let local_paths: HashSet<String> = nodes.keys().cloned().collect();

        let mut model = ProjectModel::new(
            requested_path.to_string(),
            root.path.clone(),
            nodes,
        );

        Populator::new(
            self.config,
            self.classpath,
            self.tasks,
            self.external,
            scope,
            local_paths,
        )
        .populate(&mut model)?;

        debug!(
            requested = requested_path,
            modules = model.len(),
            ?scope,
            "synthesized project model"
        );
        Ok(model)
    }
}
