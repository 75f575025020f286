/// Script registry
///
/// Holds one discovery snapshot: the tagged scripts, the files they came from
/// and the primary file every write goes to. Mutations are checked against
/// the whole registry, persisted, and only then committed.

use crate::core::discovery::DiscoveryMode;
use crate::error::{Result, ScriptsError};
use crate::host::fs::FileSystem;
use crate::scripts::{save_scripts, ConfigSource, ScriptRecord};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Snapshot of every script known to the workspace
#[derive(Debug, Clone)]
pub struct Registry {
    scripts: Vec<ScriptRecord>,
    /// project name -> scripts file, in discovery order
    sources: IndexMap<String, PathBuf>,
    primary_file: Option<PathBuf>,
    /// scripts file -> entries it holds that aren't valid scripts
    unrecognized: IndexMap<PathBuf, Vec<Value>>,
    mode: DiscoveryMode,
    loaded_at: DateTime<Utc>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::empty(DiscoveryMode::Empty)
    }
}

impl Registry {
    pub(crate) fn empty(mode: DiscoveryMode) -> Self {
        Self {
            scripts: Vec::new(),
            sources: IndexMap::new(),
            primary_file: None,
            unrecognized: IndexMap::new(),
            mode,
            loaded_at: Utc::now(),
        }
    }

    /// Append a loaded file's scripts, tagged with their project
    pub(crate) fn add_source(&mut self, source: &ConfigSource, scripts: Vec<ScriptRecord>) {
        self.scripts
            .extend(scripts.into_iter().map(|script| script.tagged(source)));
        // Same project name twice keeps its first position but points at the later file
        self.sources
            .insert(source.project_name.clone(), source.file_path.clone());
    }

    /// Remember entries of `file` that didn't load, so writing it keeps them
    pub(crate) fn keep_unrecognized(&mut self, file: &Path, entries: Vec<Value>) {
        if !entries.is_empty() {
            self.unrecognized.insert(file.to_path_buf(), entries);
        }
    }

    pub(crate) fn set_primary_file(&mut self, path: PathBuf) {
        self.primary_file = Some(path);
    }

    /// Primary file defaults to the first source added
    pub(crate) fn select_primary_from_sources(&mut self) {
        if let Some((_, path)) = self.sources.first() {
            self.primary_file = Some(path.clone());
        }
    }

    /// All scripts, in discovery order
    pub fn scripts(&self) -> &[ScriptRecord] {
        &self.scripts
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScriptRecord> {
        self.scripts.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn sources(&self) -> &IndexMap<String, PathBuf> {
        &self.sources
    }

    pub fn primary_file(&self) -> Option<&Path> {
        self.primary_file.as_deref()
    }

    /// Entries skipped across all loaded files
    pub fn unrecognized_count(&self) -> usize {
        self.unrecognized.values().map(Vec::len).sum()
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Scripts grouped by category, first appearance order
    pub fn scripts_by_category(&self) -> IndexMap<&str, Vec<&ScriptRecord>> {
        let mut categories: IndexMap<&str, Vec<&ScriptRecord>> = IndexMap::new();

        for script in &self.scripts {
            categories
                .entry(script.category_or_default())
                .or_default()
                .push(script);
        }

        categories
    }

    /// Append a new script and persist
    ///
    /// Names are unique across the whole registry, not per project.
    pub fn add<F: FileSystem + ?Sized>(&mut self, fs: &F, script: ScriptRecord) -> Result<()> {
        if self.contains(&script.name) {
            return Err(ScriptsError::DuplicateName(script.name));
        }

        let mut next = self.scripts.clone();
        next.push(script);
        self.persist(fs, next)
    }

    /// Replace the script called `old_name`, keeping its position
    pub fn update<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        old_name: &str,
        script: ScriptRecord,
    ) -> Result<()> {
        let index = self
            .position(old_name)
            .ok_or_else(|| ScriptsError::NotFound(old_name.to_string()))?;

        if script.name != old_name && self.contains(&script.name) {
            return Err(ScriptsError::DuplicateName(script.name));
        }

        let mut next = self.scripts.clone();
        next[index] = script;
        self.persist(fs, next)
    }

    /// Remove the script called `name`
    pub fn delete<F: FileSystem + ?Sized>(&mut self, fs: &F, name: &str) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| ScriptsError::NotFound(name.to_string()))?;

        let mut next = self.scripts.clone();
        next.remove(index);
        self.persist(fs, next)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.scripts.iter().position(|s| s.name == name)
    }

    // Writes the whole list to the primary file, whichever project the change
    // belongs to, along with the entries of that file that didn't load. The
    // in-memory list only changes once the write succeeded.
    fn persist<F: FileSystem + ?Sized>(&mut self, fs: &F, next: Vec<ScriptRecord>) -> Result<()> {
        let path = self.primary_file.as_deref().ok_or(ScriptsError::NoPrimaryFile)?;
        let kept = self
            .unrecognized
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default();
        save_scripts(fs, path, &next, kept)?;
        self.scripts = next;
        Ok(())
    }
}
