pub mod classpath;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod graph;
pub mod model;
pub mod synthesis;

pub use classpath::{ModuleVersion, RawAccessRule, RawAttribute, RawClasspathEntry};
pub use config::{
    BuildCommandConfig, IdeConfig, LinkedResourceConfig, ProjectSettings, SourceSettingsConfig,
};
pub use descriptor::DescriptorBuild;
pub use error::{ModelError, Result};
pub use graph::{
    BuildModule, ClasspathResolver, ExternalProjectResolver, IdeConfigSource, TaskEnumerator,
    TaskInfo,
};
pub use model::{
    AccessRule, BuildCommand, ClasspathAttribute, ClasspathContainer, ExternalDependency,
    LinkedResource, ModuleDependency, ModuleRef, OutputLocation, ProjectModel, ProjectNode,
    SourceDirectory, SourceSettings, TaskRef, DEFAULT_OUTPUT_PATH,
};
pub use synthesis::{ModelScope, ModelSynthesizer};
