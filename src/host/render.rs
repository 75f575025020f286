/// Tree rendering
///
/// The only place hierarchy nodes are turned into something a user sees.

use crate::core::hierarchy::{self, HierarchyNode};
use crate::scripts::ScriptRecord;

/// Whether a row can be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapsible {
    None,
    Expanded,
}

/// Display data for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItemView {
    pub label: String,
    pub description: Option<String>,
    pub tooltip: Option<String>,
    pub icon: &'static str,
    /// "project", "category" or "script"
    pub context_value: &'static str,
    pub collapsible: Collapsible,
}

impl From<&HierarchyNode> for TreeItemView {
    fn from(node: &HierarchyNode) -> Self {
        match node {
            HierarchyNode::Project { name } => TreeItemView {
                label: name.clone(),
                description: None,
                tooltip: None,
                icon: "project",
                context_value: "project",
                collapsible: Collapsible::Expanded,
            },
            HierarchyNode::Category { name, .. } => TreeItemView {
                label: name.clone(),
                description: None,
                tooltip: None,
                icon: "folder",
                context_value: "category",
                collapsible: Collapsible::Expanded,
            },
            HierarchyNode::Script(script) => TreeItemView {
                label: script.name.clone(),
                description: Some(script.command.clone()),
                tooltip: Some(
                    script
                        .description
                        .clone()
                        .unwrap_or_else(|| script.command.clone()),
                ),
                icon: "terminal",
                context_value: "script",
                collapsible: Collapsible::None,
            },
        }
    }
}

/// Render the whole tree, every group expanded, as indented text lines
pub fn render_tree(scripts: &[ScriptRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    for node in hierarchy::roots(scripts) {
        render_node(scripts, &node, 0, &mut lines);
    }
    lines
}

fn render_node(scripts: &[ScriptRecord], node: &HierarchyNode, depth: usize, lines: &mut Vec<String>) {
    let view = TreeItemView::from(node);
    let indent = "  ".repeat(depth);

    match (&view.description, view.collapsible) {
        (Some(command), Collapsible::None) => {
            lines.push(format!("{}{}  {}", indent, view.label, command));
        }
        _ => lines.push(format!("{}{}/", indent, view.label)),
    }

    if view.collapsible == Collapsible::Expanded {
        for child in hierarchy::children(scripts, node) {
            render_node(scripts, &child, depth + 1, lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripts::ConfigSource;
    use std::path::PathBuf;

    fn in_project(project: &str, script: ScriptRecord) -> ScriptRecord {
        script.tagged(&ConfigSource {
            file_path: PathBuf::from(format!("/ws/{}/.scriptsrc", project)),
            project_name: project.to_string(),
            project_path: PathBuf::from(format!("/ws/{}", project)),
        })
    }

    #[test]
    fn test_script_view() {
        let node = HierarchyNode::Script(
            ScriptRecord::new("build", "npm run build").with_description("Compile"),
        );
        let view = TreeItemView::from(&node);

        assert_eq!(view.label, "build");
        assert_eq!(view.description.as_deref(), Some("npm run build"));
        assert_eq!(view.tooltip.as_deref(), Some("Compile"));
        assert_eq!(view.context_value, "script");
        assert_eq!(view.collapsible, Collapsible::None);
    }

    #[test]
    fn test_tooltip_falls_back_to_command() {
        let node = HierarchyNode::Script(ScriptRecord::new("t", "npm test"));
        assert_eq!(TreeItemView::from(&node).tooltip.as_deref(), Some("npm test"));
    }

    #[test]
    fn test_render_flat() {
        let scripts = vec![
            in_project("app", ScriptRecord::new("a", "echo a")),
            in_project("app", ScriptRecord::new("b", "echo b")),
        ];

        assert_eq!(render_tree(&scripts), vec!["a  echo a", "b  echo b"]);
    }

    #[test]
    fn test_render_projects() {
        let scripts = vec![
            in_project("api", ScriptRecord::new("serve", "cargo run").with_category("run")),
            in_project("web", ScriptRecord::new("dev", "vite")),
        ];

        assert_eq!(
            render_tree(&scripts),
            vec!["api/", "  run/", "    serve  cargo run", "web/", "  dev  vite"]
        );
    }
}
