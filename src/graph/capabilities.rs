//! Collaborator traits at the synthesis input boundary.
//!
//! Module metadata is established entirely upstream; synthesis only reads
//! through these capabilities and never mutates build state.

use std::path::PathBuf;

use crate::classpath::RawClasspathEntry;
use crate::config::IdeConfig;
use crate::error::Result;

use super::TaskInfo;

/// Read access to a module's IDE extension configuration.
pub trait IdeConfigSource {
    /// Returns the configuration for the given module.
    ///
    /// Configuration is a precondition: a module without one fails with
    /// [`ModelError::MissingExtensionConfiguration`](crate::ModelError::MissingExtensionConfiguration).
    fn ide_config(&self, module_path: &str) -> Result<IdeConfig>;
}

/// Classpath resolution capability for one module at a time.
///
/// The resolver owns both entry sources a module can have: a freshly
/// computed dependency list and, when an on-disk classpath configuration
/// exists, the result of merging the computed set into it. Which source a
/// module uses is decided per module by `has_persisted`.
pub trait ClasspathResolver {
    /// Resolves the module's classpath into an ordered raw entry list.
    ///
    /// With `modules_only` set, only module-to-module dependencies are
    /// resolved (no external libraries).
    fn resolve(&self, module_path: &str, modules_only: bool) -> Result<Vec<RawClasspathEntry>>;

    /// Whether a persisted on-disk classpath configuration exists for the module.
    fn has_persisted(&self, module_path: &str) -> bool;

    /// Entries read from the persisted configuration after merging in the
    /// computed dependency set. Merge semantics belong to the implementation;
    /// `modules_only` constrains the computed set the same way it does for
    /// `resolve`.
    fn merged(&self, module_path: &str, modules_only: bool) -> Result<Vec<RawClasspathEntry>>;
}

/// Enumerates the externally visible tasks of one module (not its descendants').
pub trait TaskEnumerator {
    /// Returns the module's own tasks in registration order. Side-effect free.
    fn tasks_for(&self, module_path: &str) -> Vec<TaskInfo>;
}

/// Maps a module identifier that is not part of the local hierarchy to its
/// on-disk directory, for dependencies crossing build boundaries.
pub trait ExternalProjectResolver {
    /// Returns the directory of the identified module, or fails if unknown.
    ///
    /// Failure means the dependency is unsatisfiable; callers turn it into
    /// [`ModelError::UnresolvedModuleDependency`](crate::ModelError::UnresolvedModuleDependency).
    fn project_directory(&self, identifier: &str) -> Result<PathBuf>;
}
