/// Workspace roots
///
/// A workspace is zero or more root folders. Each root is named after its
/// final path component, which is also the project name discovery tags
/// root-level scripts with.

use crate::error::{Result, ScriptsError};
use std::path::{Path, PathBuf};

/// One workspace folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    pub path: PathBuf,
    pub name: String,
}

impl WorkspaceRoot {
    /// Build a root from a path, making it absolute first
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let absolute_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            let cwd = std::env::current_dir().map_err(|e| ScriptsError::io(path, e))?;
            cwd.join(path)
        };

        let name = Self::folder_name(&absolute_path);

        Ok(Self {
            path: absolute_path,
            name,
        })
    }

    /// The directory name, or the full path for things like `/`
    pub fn folder_name(path: &Path) -> String {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Resolve the workspace from command line arguments
///
/// No arguments means the current directory is the only root.
pub fn resolve_roots(paths: &[PathBuf]) -> Result<Vec<WorkspaceRoot>> {
    if paths.is_empty() {
        let cwd = std::env::current_dir().map_err(|e| ScriptsError::io(".", e))?;
        return Ok(vec![WorkspaceRoot::from_path(cwd)?]);
    }

    paths.iter().map(WorkspaceRoot::from_path).collect()
}
