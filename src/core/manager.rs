/// Scripts manager
///
/// Owns the current registry snapshot. A reload discovers everything again
/// and swaps the whole snapshot in one assignment; mutations go through the
/// registry, then trigger a reload so tags and sources are re-derived from
/// disk. Taking `&mut self` for both keeps them from ever overlapping.

use crate::core::discovery::Discovery;
use crate::core::hierarchy::{self, HierarchyNode};
use crate::core::registry::Registry;
use crate::core::searcher::{Pick, ScriptMatch, Searcher};
use crate::error::{Result, ScriptsError};
use crate::host::executor::CommandExecutor;
use crate::host::fs::{FileSystem, OsFileSystem};
use crate::host::workspace::WorkspaceRoot;
use crate::scripts::persistence::default_file_content;
use crate::scripts::ScriptRecord;
use crate::settings::DiscoverySettings;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ScriptsManager<F: FileSystem = OsFileSystem> {
    fs: F,
    roots: Vec<WorkspaceRoot>,
    settings: DiscoverySettings,
    registry: Registry,
    searcher: Searcher,
}

impl<F: FileSystem> ScriptsManager<F> {
    /// Create a manager and run the first discovery pass
    pub fn new(fs: F, roots: Vec<WorkspaceRoot>, settings: DiscoverySettings) -> Self {
        let mut manager = Self {
            fs,
            roots,
            settings,
            registry: Registry::default(),
            searcher: Searcher::new(),
        };
        manager.reload();
        manager
    }

    /// Discover again and replace the snapshot
    pub fn reload(&mut self) {
        let registry = Discovery::new(&self.fs, &self.settings).discover(&self.roots);
        self.registry = registry;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn scripts(&self) -> &[ScriptRecord] {
        self.registry.scripts()
    }

    /// The file every write goes to
    pub fn primary_file(&self) -> Option<&Path> {
        self.registry.primary_file()
    }

    pub fn roots(&self) -> &[WorkspaceRoot] {
        &self.roots
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    pub fn tree_roots(&self) -> Vec<HierarchyNode> {
        hierarchy::roots(self.registry.scripts())
    }

    pub fn tree_children(&self, node: &HierarchyNode) -> Vec<HierarchyNode> {
        hierarchy::children(self.registry.scripts(), node)
    }

    pub fn add(&mut self, script: ScriptRecord) -> Result<()> {
        let name = script.name.clone();
        self.registry.add(&self.fs, script)?;
        info!(name = %name, "added script");
        self.reload();
        Ok(())
    }

    pub fn update(&mut self, old_name: &str, script: ScriptRecord) -> Result<()> {
        let name = script.name.clone();
        self.registry.update(&self.fs, old_name, script)?;
        info!(old = old_name, name = %name, "updated script");
        self.reload();
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.registry.delete(&self.fs, name)?;
        info!(name, "deleted script");
        self.reload();
        Ok(())
    }

    /// Write an example scripts file to the first root
    pub fn create_default_file(&mut self) -> Result<PathBuf> {
        let root = self.roots.first().ok_or(ScriptsError::NoWorkspace)?;
        let path = root.path.join(&self.settings.file_name);

        if self.fs.exists(&path) {
            return Err(ScriptsError::FileAlreadyExists(path));
        }

        self.fs.write_text(&path, &default_file_content()?)?;
        info!(path = %path.display(), "created scripts file");

        self.reload();
        Ok(path)
    }

    /// Ranked fuzzy matches for `query`
    pub fn find(&self, query: &str, limit: usize) -> Vec<ScriptMatch<'_>> {
        self.searcher.search(self.registry.scripts(), query, limit)
    }

    /// Exact name, a lone fuzzy name match, or candidates to choose from
    pub fn pick(&self, query: &str) -> Pick<'_> {
        self.searcher.pick(self.registry.scripts(), query)
    }

    /// Hand a script to the executor. Its outcome isn't tracked.
    pub fn run(&self, executor: &dyn CommandExecutor, name: &str) -> Result<()> {
        let script = self
            .registry
            .get(name)
            .ok_or_else(|| ScriptsError::NotFound(name.to_string()))?;

        let label = format!("Script: {}", script.name);
        executor.execute(&label, &script.command, script.project_path.as_deref())
    }
}
