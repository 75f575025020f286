/// Data models for scripts files
///
/// `ScriptRecord` is what a scripts file declares. Project tags are filled in
/// by discovery and are never written back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Category used when a script doesn't name one
pub const DEFAULT_CATEGORY: &str = "General";

/// A named shell command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub name: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Keys this tool doesn't use, written back as they were read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Directory of the project this script was loaded from
    #[serde(skip)]
    pub project_path: Option<PathBuf>,
    #[serde(skip)]
    pub project_name: Option<String>,
}

impl ScriptRecord {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            description: None,
            category: None,
            extra: Map::new(),
            project_path: None,
            project_name: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Category, falling back to "General"
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Grouping key for the project level. Untagged scripts share the empty key.
    pub fn project_key(&self) -> &str {
        self.project_name.as_deref().unwrap_or("")
    }

    /// Tag this record with the project it came from
    pub fn tagged(mut self, source: &ConfigSource) -> Self {
        self.project_path = Some(source.project_path.clone());
        self.project_name = Some(source.project_name.clone());
        self
    }
}

/// A scripts file found during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub file_path: PathBuf,
    pub project_name: String,
    pub project_path: PathBuf,
}
