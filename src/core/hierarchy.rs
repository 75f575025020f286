/// Project -> category -> script tree
///
/// Derived from the flat script list on every request, never stored. Levels
/// that would add nothing are collapsed:
///
/// - one project: its categories are the roots
/// - one project with only the "General" category: its scripts are the roots
/// - a project with only "General" expands straight to its scripts
///
/// Projects are always shown once there is more than one.

use crate::scripts::{ScriptRecord, DEFAULT_CATEGORY};
use indexmap::IndexMap;

/// One node of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyNode {
    Project { name: String },
    Category { project: String, name: String },
    Script(ScriptRecord),
}

impl HierarchyNode {
    pub fn label(&self) -> &str {
        match self {
            HierarchyNode::Project { name } => name,
            HierarchyNode::Category { name, .. } => name,
            HierarchyNode::Script(script) => &script.name,
        }
    }

    /// Scripts are leaves, everything else can be expanded
    pub fn is_expandable(&self) -> bool {
        !matches!(self, HierarchyNode::Script(_))
    }
}

/// Root-level nodes for the current script list
pub fn roots(scripts: &[ScriptRecord]) -> Vec<HierarchyNode> {
    let projects = group_by_project(scripts);

    if projects.len() > 1 {
        return projects
            .into_keys()
            .map(|name| HierarchyNode::Project {
                name: name.to_string(),
            })
            .collect();
    }

    match projects.into_iter().next() {
        Some((project, project_scripts)) => project_level(project, &project_scripts),
        None => Vec::new(),
    }
}

/// Children of an expanded node. Scripts have none.
pub fn children(scripts: &[ScriptRecord], node: &HierarchyNode) -> Vec<HierarchyNode> {
    match node {
        HierarchyNode::Project { name } => {
            let project_scripts: Vec<&ScriptRecord> =
                scripts.iter().filter(|s| s.project_key() == name.as_str()).collect();
            project_level(name, &project_scripts)
        }
        HierarchyNode::Category { project, name } => scripts
            .iter()
            .filter(|s| {
                s.project_key() == project.as_str() && s.category_or_default() == name.as_str()
            })
            .cloned()
            .map(HierarchyNode::Script)
            .collect(),
        HierarchyNode::Script(_) => Vec::new(),
    }
}

// What sits under one project: its categories, or its scripts if the only
// category is the default one
fn project_level(project: &str, scripts: &[&ScriptRecord]) -> Vec<HierarchyNode> {
    let categories = group_by_category(scripts);

    if categories.len() == 1 && categories.contains_key(DEFAULT_CATEGORY) {
        return scripts
            .iter()
            .map(|s| HierarchyNode::Script((*s).clone()))
            .collect();
    }

    categories
        .into_keys()
        .map(|name| HierarchyNode::Category {
            project: project.to_string(),
            name: name.to_string(),
        })
        .collect()
}

fn group_by_project(scripts: &[ScriptRecord]) -> IndexMap<&str, Vec<&ScriptRecord>> {
    let mut projects: IndexMap<&str, Vec<&ScriptRecord>> = IndexMap::new();
    for script in scripts {
        projects.entry(script.project_key()).or_default().push(script);
    }
    projects
}

fn group_by_category<'a>(scripts: &[&'a ScriptRecord]) -> IndexMap<&'a str, Vec<&'a ScriptRecord>> {
    let mut categories: IndexMap<&str, Vec<&ScriptRecord>> = IndexMap::new();
    for &script in scripts {
        categories
            .entry(script.category_or_default())
            .or_default()
            .push(script);
    }
    categories
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

    fn labels(nodes: &[HierarchyNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label()).collect()
    }

    #[test]
    fn test_empty() {
        assert!(roots(&[]).is_empty());
    }

    #[test]
    fn test_single_project_general_flattens_to_scripts() {
        let scripts = vec![
            in_project("app", ScriptRecord::new("a", "1")),
            in_project("app", ScriptRecord::new("b", "2")),
            in_project("app", ScriptRecord::new("c", "3").with_category("General")),
        ];

        let nodes = roots(&scripts);

        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| matches!(n, HierarchyNode::Script(_))));
        assert_eq!(labels(&nodes), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_project_two_categories() {
        let scripts = vec![
            in_project("app", ScriptRecord::new("compile", "1").with_category("build")),
            in_project("app", ScriptRecord::new("unit", "2").with_category("test")),
            in_project("app", ScriptRecord::new("bundle", "3").with_category("build")),
        ];

        let nodes = roots(&scripts);
        assert_eq!(labels(&nodes), vec!["build", "test"]);

        let build = children(&scripts, &nodes[0]);
        assert_eq!(labels(&build), vec!["compile", "bundle"]);
        assert!(build.iter().all(|n| !n.is_expandable()));
    }

    #[test]
    fn test_single_non_default_category_is_kept() {
        let scripts = vec![in_project("app", ScriptRecord::new("a", "1").with_category("ci"))];

        let nodes = roots(&scripts);

        assert_eq!(
            nodes,
            vec![HierarchyNode::Category {
                project: "app".to_string(),
                name: "ci".to_string()
            }]
        );
    }

    #[test]
    fn test_general_mixed_with_other_categories() {
        let scripts = vec![
            in_project("app", ScriptRecord::new("a", "1")),
            in_project("app", ScriptRecord::new("b", "2").with_category("deploy")),
        ];

        assert_eq!(labels(&roots(&scripts)), vec!["General", "deploy"]);
    }

    #[test]
    fn test_multiple_projects() {
        let scripts = vec![
            in_project("web", ScriptRecord::new("dev", "vite")),
            in_project("api", ScriptRecord::new("serve", "cargo run").with_category("run")),
            in_project("api", ScriptRecord::new("test", "cargo test").with_category("check")),
            in_project("web", ScriptRecord::new("build", "vite build")),
        ];

        let nodes = roots(&scripts);
        assert_eq!(labels(&nodes), vec!["web", "api"]);

        // web only has General, so it expands to scripts
        let web = children(&scripts, &nodes[0]);
        assert_eq!(labels(&web), vec!["dev", "build"]);
        assert!(web.iter().all(|n| matches!(n, HierarchyNode::Script(_))));

        let api = children(&scripts, &nodes[1]);
        assert_eq!(labels(&api), vec!["run", "check"]);

        let check = children(&scripts, &api[1]);
        assert_eq!(labels(&check), vec!["test"]);
    }

    #[test]
    fn test_same_category_in_two_projects_stays_separate() {
        let scripts = vec![
            in_project("a", ScriptRecord::new("a1", "1").with_category("build")),
            in_project("a", ScriptRecord::new("a2", "1").with_category("lint")),
            in_project("b", ScriptRecord::new("b1", "2").with_category("build")),
            in_project("b", ScriptRecord::new("b2", "2").with_category("lint")),
        ];

        let projects = roots(&scripts);
        let b_categories = children(&scripts, &projects[1]);
        let b_build = children(&scripts, &b_categories[0]);

        assert_eq!(labels(&b_build), vec!["b1"]);
    }

    #[test]
    fn test_script_has_no_children() {
        let script = ScriptRecord::new("a", "1");
        let node = HierarchyNode::Script(script.clone());
        assert!(children(&[script], &node).is_empty());
    }
}
