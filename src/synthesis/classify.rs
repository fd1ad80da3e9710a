//! Classifies raw classpath entries into typed model records.

use std::collections::HashSet;

use crate::classpath::{RawAccessRule, RawAttribute, RawClasspathEntry};
use crate::error::{ModelError, Result};
use crate::graph::ExternalProjectResolver;
use crate::model::{
    AccessRule, ClasspathAttribute, ClasspathContainer, ExternalDependency, ModuleDependency,
    ModuleRef, OutputLocation, SourceDirectory,
};

/// A classified entry, ready to be appended to its typed list.
#[derive(Debug)]
pub(crate) enum Classified {
    External(ExternalDependency),
    Module(ModuleDependency),
    Source(SourceDirectory),
    Container(ClasspathContainer),
    Output(OutputLocation),
}

/// Lookup context for module-dependency resolution.
pub(crate) struct ClassifyContext<'a> {
    /// Path of the module whose classpath is being classified
    pub module_path: &'a str,
    /// Every module path present in the local hierarchy
    pub local_paths: &'a HashSet<String>,
    pub external: &'a dyn ExternalProjectResolver,
}

/// Classifies one raw entry.
///
/// Returns `None` for Variable entries: variable mappings need context this
/// pipeline does not have, so they are skipped rather than resolved. This is
/// a known limitation, not an error.
pub(crate) fn classify(
    entry: &RawClasspathEntry,
    ctx: &ClassifyContext<'_>,
) -> Result<Option<Classified>> {
    let classified = match entry {
        RawClasspathEntry::Library {
            file,
            source,
            javadoc,
            module_version,
            exported,
            attributes,
            access_rules,
        } => Classified::External(ExternalDependency {
            file: file.clone(),
            source: source.clone(),
            javadoc: javadoc.clone(),
            module_version: module_version.clone(),
            exported: *exported,
            attributes: convert_attributes(attributes),
            access_rules: convert_access_rules(access_rules, ctx.module_path)?,
        }),
        RawClasspathEntry::ModuleDependency {
            module_path,
            exported,
            attributes,
            access_rules,
        } => {
            let relative_path = strip_leading_separator(module_path);
            let target = if ctx.local_paths.contains(module_path) {
                ModuleRef::Resolved {
                    path: module_path.clone(),
                }
            } else {
                let directory = ctx.external.project_directory(relative_path).map_err(|_| {
                    ModelError::UnresolvedModuleDependency(relative_path.to_string())
                })?;
                ModuleRef::Unresolved { directory }
            };
            Classified::Module(ModuleDependency {
                relative_path: relative_path.to_string(),
                target,
                exported: *exported,
                attributes: convert_attributes(attributes),
                access_rules: convert_access_rules(access_rules, ctx.module_path)?,
            })
        }
        RawClasspathEntry::SourceFolder {
            path,
            directory,
            includes,
            excludes,
            output,
            attributes,
            access_rules,
        } => Classified::Source(SourceDirectory {
            path: path.clone(),
            directory: directory.clone(),
            includes: includes.clone(),
            excludes: excludes.clone(),
            output: output.clone(),
            attributes: convert_attributes(attributes),
            access_rules: convert_access_rules(access_rules, ctx.module_path)?,
        }),
        RawClasspathEntry::Container {
            path,
            attributes,
            access_rules,
        } => Classified::Container(ClasspathContainer {
            path: path.clone(),
            attributes: convert_attributes(attributes),
            access_rules: convert_access_rules(access_rules, ctx.module_path)?,
        }),
        RawClasspathEntry::Output { path } => Classified::Output(OutputLocation::new(path)),
        RawClasspathEntry::Variable { .. } => return Ok(None),
    };
    Ok(Some(classified))
}

/// Strips exactly one leading `/` from a module address.
fn strip_leading_separator(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

fn convert_attributes(raw: &[RawAttribute]) -> Vec<ClasspathAttribute> {
    raw.iter()
        .map(|attribute| ClasspathAttribute {
            key: attribute.key.clone(),
            value: attribute.value.clone().unwrap_or_default(),
        })
        .collect()
}

fn convert_access_rules(raw: &[RawAccessRule], module_path: &str) -> Result<Vec<AccessRule>> {
    raw.iter()
        .map(|rule| {
            let kind = rule.kind.parse::<i32>().map_err(|_| {
                ModelError::MalformedAccessRuleKind {
                    module: module_path.to_string(),
                    kind: rule.kind.clone(),
                }
            })?;
            Ok(AccessRule {
                kind,
                pattern: rule.pattern.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct FixedResolver {
        directory: Option<PathBuf>,
    }

    impl ExternalProjectResolver for FixedResolver {
        fn project_directory(&self, identifier: &str) -> Result<PathBuf> {
            self.directory.clone().ok_or_else(|| {
                ModelError::UnresolvedModuleDependency(identifier.to_string())
            })
        }
    }

    fn context<'a>(
        local_paths: &'a HashSet<String>,
        external: &'a dyn ExternalProjectResolver,
    ) -> ClassifyContext<'a> {
        ClassifyContext {
            module_path: "/app",
            local_paths,
            external,
        }
    }

    #[test]
    fn test_variable_entries_are_skipped() {
        let local = HashSet::new();
        let resolver = FixedResolver { directory: None };
        let entry = RawClasspathEntry::Variable {
            path: "MAVEN_REPO/junit.jar".to_string(),
        };
        assert!(classify(&entry, &context(&local, &resolver)).unwrap().is_none());
    }

    #[test]
    fn test_library_optional_paths() {
        let local = HashSet::new();
        let resolver = FixedResolver { directory: None };
        let entry = RawClasspathEntry::library("/libs/guava.jar");

        match classify(&entry, &context(&local, &resolver)).unwrap().unwrap() {
            Classified::External(dep) => {
                assert_eq!(dep.file, PathBuf::from("/libs/guava.jar"));
                assert!(dep.source.is_none());
                assert!(dep.javadoc.is_none());
            }
            _ => panic!("expected an external dependency"),
        }
    }

    #[test]
    fn test_module_dependency_binds_locally() {
        let local: HashSet<String> = ["/lib/core".to_string()].into_iter().collect();
        let resolver = FixedResolver { directory: None };
        let entry = RawClasspathEntry::module_dependency("/lib/core");

        match classify(&entry, &context(&local, &resolver)).unwrap().unwrap() {
            Classified::Module(dep) => {
                assert_eq!(dep.relative_path, "lib/core");
                assert_eq!(
                    dep.target,
                    ModuleRef::Resolved {
                        path: "/lib/core".to_string()
                    }
                );
            }
            _ => panic!("expected a module dependency"),
        }
    }

    #[test]
    fn test_module_dependency_falls_back_to_external() {
        let local = HashSet::new();
        let resolver = FixedResolver {
            directory: Some(PathBuf::from("/ext/moduleX")),
        };
        let entry = RawClasspathEntry::module_dependency("/moduleX");

        match classify(&entry, &context(&local, &resolver)).unwrap().unwrap() {
            Classified::Module(dep) => {
                assert_eq!(
                    dep.target,
                    ModuleRef::Unresolved {
                        directory: PathBuf::from("/ext/moduleX")
                    }
                );
            }
            _ => panic!("expected a module dependency"),
        }
    }

    #[test]
    fn test_unresolvable_module_dependency_fails() {
        let local = HashSet::new();
        let resolver = FixedResolver { directory: None };
        let entry = RawClasspathEntry::module_dependency("/nowhere");

        let err = classify(&entry, &context(&local, &resolver)).unwrap_err();
        match err {
            ModelError::UnresolvedModuleDependency(id) => assert_eq!(id, "nowhere"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_access_rule_kind_parsing() {
        let rules = vec![RawAccessRule::new("0", "com/example/**")];
        let converted = convert_access_rules(&rules, "/app").unwrap();
        assert_eq!(converted[0].kind, 0);
        assert_eq!(converted[0].pattern, "com/example/**");

        let bad = vec![RawAccessRule::new("abc", "**")];
        let err = convert_access_rules(&bad, "/app").unwrap_err();
        assert!(matches!(err, ModelError::MalformedAccessRuleKind { .. }));
    }

    #[test]
    fn test_absent_attribute_value_becomes_empty() {
        let attributes = vec![
            RawAttribute::new("javadoc_location", "file:///doc"),
            RawAttribute::without_value("optional"),
        ];
        let converted = convert_attributes(&attributes);
        assert_eq!(converted[0].value, "file:///doc");
        assert_eq!(converted[1].value, "");
    }
}
