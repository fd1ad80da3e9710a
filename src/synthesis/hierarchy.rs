//! Builds the project node tree and its path index.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::graph::{BuildModule, IdeConfigSource};
use crate::model::ProjectNode;

/// Builds the full node tree for `root`, returning the path index.
///
/// Recursion is depth-first: a module's children are fully built before the
/// module's own node, which then records their paths and receives each
/// child's parent back-reference. Exactly one node exists per path.
pub(crate) fn build(
    root: &BuildModule,
    config: &dyn IdeConfigSource,
) -> Result<HashMap<String, ProjectNode>> {
    let mut nodes = HashMap::new();
    build_node(root, config, &mut nodes)?;
    debug!(modules = nodes.len(), "built project hierarchy");
    Ok(nodes)
}

fn build_node(
    module: &BuildModule,
    config: &dyn IdeConfigSource,
    nodes: &mut HashMap<String, ProjectNode>,
) -> Result<()> {
    let mut child_paths = Vec::with_capacity(module.children.len());
    for child in &module.children {
        build_node(child, config, nodes)?;
        child_paths.push(child.path.clone());
    }

    let ide = config.ide_config(&module.path)?;
    let name = if ide.project.name.is_empty() {
        module.name.clone()
    } else {
        ide.project.name.clone()
    };

    let mut node = ProjectNode::new(&module.path, name, module.directory.clone());
    node.description = ide.project.comment.clone();
    node.children = child_paths;

    for child in &node.children {
        // Children were inserted by the recursive calls above
        if let Some(child_node) = nodes.get_mut(child) {
            child_node.parent = Some(module.path.clone());
        }
    }

    nodes.insert(module.path.clone(), node);
    Ok(())
}
