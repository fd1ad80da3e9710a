use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unresolved module dependency: {0}")]
    UnresolvedModuleDependency(String),

    #[error("malformed access rule kind {kind:?} in module {module}")]
    MalformedAccessRuleKind { module: String, kind: String },

    #[error("missing IDE configuration for module: {0}")]
    MissingExtensionConfiguration(String),

    #[error("module not found in hierarchy: {0}")]
    UnknownModule(String),

    #[error("descriptor error: {0}")]
    Descriptor(String),

    #[error("classpath resolution failed for {module}: {reason}")]
    ClasspathResolution { module: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
