//! End-to-end synthesis scenarios.
//!
//! Fixtures are built from TOML build descriptors; every scenario drives the
//! full pipeline through `ModelSynthesizer`.

use std::path::{Path, PathBuf};

use ide_model::{
    descriptor, ModelError, ModelScope, ModelSynthesizer, ModuleRef, ProjectModel,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Parses a descriptor and synthesizes the model for `requested`.
fn synthesize(content: &str, requested: &str, scope: ModelScope) -> ide_model::Result<ProjectModel> {
    let build = descriptor::parse(content, Path::new("/work")).expect("descriptor should parse");
    let synthesizer = ModelSynthesizer::new(&build, &build, &build, &build);
    synthesizer.synthesize(build.root(), requested, scope)
}

/// Root A with children B and C; B depends on its sibling C.
const SIBLING_BUILD: &str = r#"
[build]
name = "sibling"

[[module]]
path = "/"

[module.ide.project]
name = "a"

[[module]]
path = "/b"

[module.ide.project]
name = "b"

[[module.task]]
name = "compile"
path = "/b:compile"

[[module.classpath]]
kind = "module_dependency"
module_path = "/c"

[[module.classpath]]
kind = "source_folder"
path = "src/main/java"
directory = "/work/b/src/main/java"

[[module]]
path = "/c"

[module.ide.project]
name = "c"
natures = ["org.eclipse.jdt.core.javanature"]
"#;

// ============================================================================
// Hierarchy and Index
// ============================================================================

mod hierarchy {
    use super::*;

    #[test]
    fn every_path_maps_to_one_consistent_node() {
        let model = synthesize(SIBLING_BUILD, "/", ModelScope::Full).unwrap();

        assert_eq!(model.len(), 3);
        for path in ["/", "/b", "/c"] {
            let node = model.node(path).expect("node must exist");
            assert_eq!(node.path, path);
            if let Some(parent) = &node.parent {
                assert!(model.node(parent).unwrap().children.contains(&node.path));
            }
            for child in &node.children {
                assert_eq!(model.node(child).unwrap().parent.as_deref(), Some(path));
            }
        }
    }

    #[test]
    fn requested_submodule_still_traverses_full_hierarchy() {
        let model = synthesize(SIBLING_BUILD, "/b", ModelScope::Full).unwrap();

        assert_eq!(model.requested().path, "/b");
        assert_eq!(model.root().path, "/");
        // Ancestors and siblings remain reachable through the index
        assert!(model.node("/").is_some());
        assert!(model.node("/c").is_some());
    }

    #[test]
    fn unknown_requested_module_is_rejected() {
        let err = synthesize(SIBLING_BUILD, "/missing", ModelScope::Full).unwrap_err();
        assert!(matches!(err, ModelError::UnknownModule(_)));
    }

    #[test]
    fn missing_ide_configuration_aborts() {
        let err = synthesize(
            r#"
[build]
name = "bare"

[[module]]
path = "/"
"#,
            "/",
            ModelScope::Full,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::MissingExtensionConfiguration(_)));
    }
}

// ============================================================================
// Classpath Classification
// ============================================================================

mod classification {
    use super::*;

    const MIXED_CLASSPATH: &str = r#"
[build]
name = "mixed"

[[module]]
path = "/"

[module.ide.project]
name = "mixed-root"

[[module.classpath]]
kind = "library"
file = "/libs/first.jar"

[[module.classpath]]
kind = "variable"
path = "MAVEN_REPO/skip-me.jar"

[[module.classpath]]
kind = "library"
file = "/libs/second.jar"
exported = true

[[module.classpath]]
kind = "source_folder"
path = "src/main/java"
directory = "/work/src/main/java"
includes = ["**/*.java"]
excludes = ["**/generated/**"]
output = "out/main"

[[module.classpath]]
kind = "container"
path = "org.eclipse.jdt.launching.JRE_CONTAINER"

[[module.classpath]]
kind = "source_folder"
path = "src/test/java"
directory = "/work/src/test/java"
"#;

    #[test]
    fn counts_and_order_are_preserved_per_variant() {
        let model = synthesize(MIXED_CLASSPATH, "/", ModelScope::Full).unwrap();
        let node = model.requested();

        // The variable entry is skipped, everything else classified
        assert_eq!(node.external_dependencies.len(), 2);
        assert_eq!(node.source_directories.len(), 2);
        assert_eq!(node.classpath_containers.len(), 1);
        assert!(node.module_dependencies.is_empty());

        assert_eq!(node.external_dependencies[0].file, PathBuf::from("/libs/first.jar"));
        assert_eq!(node.external_dependencies[1].file, PathBuf::from("/libs/second.jar"));
        assert!(node.external_dependencies[1].exported);

        assert_eq!(node.source_directories[0].path, "src/main/java");
        assert_eq!(node.source_directories[0].output.as_deref(), Some("out/main"));
        assert_eq!(node.source_directories[1].path, "src/test/java");
    }

    #[test]
    fn output_defaults_when_no_entry_resolves() {
        let model = synthesize(MIXED_CLASSPATH, "/", ModelScope::Full).unwrap();
        assert_eq!(model.requested().output_location.path, "bin");
    }

    #[test]
    fn last_output_entry_wins() {
        let model = synthesize(
            r#"
[build]
name = "outputs"

[[module]]
path = "/"

[module.ide.project]
name = "outputs"

[[module.classpath]]
kind = "output"
path = "bin1"

[[module.classpath]]
kind = "output"
path = "bin2"
"#,
            "/",
            ModelScope::Full,
        )
        .unwrap();
        assert_eq!(model.requested().output_location.path, "bin2");
    }

    #[test]
    fn attributes_and_access_rules_are_extracted() {
        let model = synthesize(
            r#"
[build]
name = "attrs"

[[module]]
path = "/"

[module.ide.project]
name = "attrs"

[[module.classpath]]
kind = "library"
file = "/libs/dep.jar"

[[module.classpath.attributes]]
key = "javadoc_location"
value = "file:///docs/dep"

[[module.classpath.attributes]]
key = "optional"

[[module.classpath.access_rules]]
kind = "0"
pattern = "com/example/**"
"#,
            "/",
            ModelScope::Full,
        )
        .unwrap();

        let dep = &model.requested().external_dependencies[0];
        assert_eq!(dep.attributes[0].key, "javadoc_location");
        assert_eq!(dep.attributes[0].value, "file:///docs/dep");
        // Absent attribute value is coerced to the empty string
        assert_eq!(dep.attributes[1].key, "optional");
        assert_eq!(dep.attributes[1].value, "");
        assert_eq!(dep.access_rules[0].kind, 0);
        assert_eq!(dep.access_rules[0].pattern, "com/example/**");
    }

    #[test]
    fn malformed_access_rule_kind_aborts() {
        let err = synthesize(
            r#"
[build]
name = "corrupt"

[[module]]
path = "/"

[module.ide.project]
name = "corrupt"

[[module.classpath]]
kind = "library"
file = "/libs/dep.jar"

[[module.classpath.access_rules]]
kind = "abc"
pattern = "**"
"#,
            "/",
            ModelScope::Full,
        )
        .unwrap_err();

        match err {
            ModelError::MalformedAccessRuleKind { kind, .. } => assert_eq!(kind, "abc"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

// ============================================================================
// Module Dependency Resolution
// ============================================================================

mod module_dependencies {
    use super::*;

    #[test]
    fn sibling_dependency_binds_to_local_node() {
        let model = synthesize(SIBLING_BUILD, "/", ModelScope::Full).unwrap();

        let b = model.node("/b").unwrap();
        assert_eq!(b.module_dependencies.len(), 1);
        let dep = &b.module_dependencies[0];
        assert_eq!(dep.relative_path, "c");
        assert_eq!(
            dep.target,
            ModuleRef::Resolved {
                path: "/c".to_string()
            }
        );

        // The bound path resolves to the populated sibling node
        let c = match &dep.target {
            ModuleRef::Resolved { path } => model.node(path).unwrap(),
            _ => unreachable!(),
        };
        assert_eq!(c.natures, vec!["org.eclipse.jdt.core.javanature"]);
    }

    #[test]
    fn cross_build_dependency_carries_external_directory() {
        let model = synthesize(
            r#"
[build]
name = "composite"

[external]
moduleX = "/ext/moduleX"

[[module]]
path = "/"

[module.ide.project]
name = "composite"

[[module.classpath]]
kind = "module_dependency"
module_path = "/moduleX"
"#,
            "/",
            ModelScope::Full,
        )
        .unwrap();

        let dep = &model.requested().module_dependencies[0];
        assert_eq!(dep.relative_path, "moduleX");
        assert_eq!(
            dep.target,
            ModuleRef::Unresolved {
                directory: PathBuf::from("/ext/moduleX")
            }
        );
    }

    #[test]
    fn unresolvable_dependency_aborts_the_run() {
        let err = synthesize(
            r#"
[build]
name = "composite"

[[module]]
path = "/"

[module.ide.project]
name = "composite"

[[module.classpath]]
kind = "module_dependency"
module_path = "/nowhere"
"#,
            "/",
            ModelScope::Full,
        )
        .unwrap_err();

        match err {
            ModelError::UnresolvedModuleDependency(id) => assert_eq!(id, "nowhere"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

// ============================================================================
// Metadata, Tasks and Scope
// ============================================================================

mod metadata {
    use super::*;

    const METADATA_BUILD: &str = r#"
[build]
name = "meta"

[[module]]
path = "/"

[module.ide.project]
name = "meta-root"
comment = "root of the metadata build"
natures = ["nature.one", "nature.two"]

[[module.ide.project.build_commands]]
name = "builder.main"

[module.ide.project.build_commands.arguments]
optimize = "true"

[[module.ide.project.linked_resources]]
name = "shared-src"
resource_type = "2"
location = "/shared/src"

[module.ide.source_settings]
source_level = "1.8"

[[module.task]]
name = "assemble"
path = "/:assemble"
description = "Assembles the build"

[[module.task]]
name = "check"
path = "/:check"

[[module.classpath]]
kind = "library"
file = "/libs/api.jar"
"#;

    #[test]
    fn ide_metadata_is_copied_verbatim() {
        let model = synthesize(METADATA_BUILD, "/", ModelScope::Full).unwrap();
        let node = model.requested();

        assert_eq!(node.name, "meta-root");
        assert_eq!(node.description.as_deref(), Some("root of the metadata build"));
        assert_eq!(node.natures, vec!["nature.one", "nature.two"]);
        assert_eq!(node.build_commands[0].name, "builder.main");
        assert_eq!(
            node.build_commands[0].arguments.get("optimize"),
            Some(&"true".to_string())
        );
        assert_eq!(node.linked_resources[0].name, "shared-src");
        assert_eq!(node.linked_resources[0].location.as_deref(), Some("/shared/src"));
        assert!(node.linked_resources[0].location_uri.is_none());

        let settings = node.source_settings.as_ref().unwrap();
        assert_eq!(settings.source_level, "1.8");
        // Target level defaults to the source level
        assert_eq!(settings.target_level, "1.8");
    }

    #[test]
    fn tasks_carry_owner_back_reference() {
        let model = synthesize(METADATA_BUILD, "/", ModelScope::Full).unwrap();
        let node = model.requested();

        assert_eq!(node.tasks.len(), 2);
        assert_eq!(node.tasks[0].name, "assemble");
        assert_eq!(node.tasks[0].project, "/");
        assert_eq!(node.tasks[0].description.as_deref(), Some("Assembles the build"));
        assert_eq!(node.tasks[1].name, "check");
        assert!(node.tasks[1].description.is_none());
    }

    #[test]
    fn modules_only_scope_skips_tasks_and_libraries() {
        let model = synthesize(METADATA_BUILD, "/", ModelScope::ModulesOnly).unwrap();
        let node = model.requested();

        assert!(node.tasks.is_empty());
        assert!(node.external_dependencies.is_empty());
        // Metadata is still populated
        assert_eq!(node.natures.len(), 2);
    }
}

// ============================================================================
// Persisted Classpath Configuration
// ============================================================================

mod persisted {
    use super::*;

    #[test]
    fn persisted_configuration_wins_over_fresh_resolution() {
        let model = synthesize(
            r#"
[build]
name = "persisted"

[[module]]
path = "/"

[module.ide.project]
name = "persisted-root"

[[module.persisted]]
kind = "library"
file = "/libs/pinned.jar"

[[module.persisted]]
kind = "output"
path = "out/persisted"

[[module.classpath]]
kind = "library"
file = "/libs/computed.jar"

[[module]]
path = "/fresh"

[module.ide.project]
name = "fresh"

[[module.classpath]]
kind = "library"
file = "/libs/fresh-only.jar"
"#,
            "/",
            ModelScope::Full,
        )
        .unwrap();

        // Root reads the merged persisted list: pinned first, computed appended
        let root = model.requested();
        let files: Vec<_> = root
            .external_dependencies
            .iter()
            .map(|d| d.file.clone())
            .collect();
        assert_eq!(
            files,
            vec![PathBuf::from("/libs/pinned.jar"), PathBuf::from("/libs/computed.jar")]
        );
        assert_eq!(root.output_location.path, "out/persisted");

        // The sibling without persisted configuration takes the fresh list
        let fresh = model.node("/fresh").unwrap();
        assert_eq!(fresh.external_dependencies.len(), 1);
        assert_eq!(fresh.external_dependencies[0].file, PathBuf::from("/libs/fresh-only.jar"));
    }
}

// ============================================================================
// Stability
// ============================================================================

mod stability {
    use super::*;

    #[test]
    fn synthesis_is_idempotent() {
        let first = synthesize(SIBLING_BUILD, "/", ModelScope::Full).unwrap();
        let second = synthesize(SIBLING_BUILD, "/", ModelScope::Full).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn model_round_trips_through_serde() {
        let model = synthesize(SIBLING_BUILD, "/", ModelScope::Full).unwrap();
        let json = serde_json::to_string(&model).expect("model should serialize");
        let back: ProjectModel = serde_json::from_str(&json).expect("model should deserialize");
        assert_eq!(model, back);
    }

    #[test]
    fn descriptor_loaded_from_disk_drives_synthesis() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("build.toml");
        std::fs::write(&path, SIBLING_BUILD).unwrap();

        let build = descriptor::load(&path).unwrap();
        let synthesizer = ModelSynthesizer::new(&build, &build, &build, &build);
        let model = synthesizer
            .synthesize(build.root(), "/", ModelScope::Full)
            .unwrap();

        assert_eq!(model.len(), 3);
        assert_eq!(
            model.node("/b").unwrap().directory,
            temp_dir.path().join("b")
        );
    }
}
