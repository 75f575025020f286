/// Scripts file discovery
///
/// Finds scripts files across the workspace roots and builds a fresh
/// `Registry` from them. The layout decides the strategy:
///
/// - exactly one root has a scripts file: use only that file, subdirectories
///   are not looked at even if they have their own
/// - no root has one: every root's immediate subdirectories are projects
/// - several roots have one: load them all, no subdirectory scan

use crate::core::registry::Registry;
use crate::host::fs::FileSystem;
use crate::host::workspace::WorkspaceRoot;
use crate::scripts::{parse_scripts_file, ConfigSource};
use crate::settings::DiscoverySettings;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which branch produced a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// Nothing to scan, or nothing found
    Empty,
    SingleRoot,
    Nested,
    MultiRoot,
}

impl DiscoveryMode {
    pub fn name(&self) -> &str {
        match self {
            DiscoveryMode::Empty => "empty",
            DiscoveryMode::SingleRoot => "single-root",
            DiscoveryMode::Nested => "nested",
            DiscoveryMode::MultiRoot => "multi-root",
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Walks workspace roots looking for scripts files
pub struct Discovery<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    settings: &'a DiscoverySettings,
}

impl<'a, F: FileSystem + ?Sized> Discovery<'a, F> {
    pub fn new(fs: &'a F, settings: &'a DiscoverySettings) -> Self {
        Self { fs, settings }
    }

    /// Run one full discovery pass. Per-file failures are logged and skipped.
    pub fn discover(&self, roots: &[WorkspaceRoot]) -> Registry {
        if roots.is_empty() {
            return Registry::empty(DiscoveryMode::Empty);
        }

        let root_hits: Vec<ConfigSource> = roots
            .iter()
            .filter_map(|root| {
                let file_path = root.path.join(&self.settings.file_name);
                self.fs.exists(&file_path).then(|| ConfigSource {
                    file_path,
                    project_name: root.name.clone(),
                    project_path: root.path.clone(),
                })
            })
            .collect();

        let registry = match root_hits.as_slice() {
            [single] => self.load_single_root(single),
            [] => self.load_nested(roots),
            hits => self.load_multi_root(hits),
        };

        info!(
            mode = %registry.mode(),
            scripts = registry.len(),
            sources = registry.sources().len(),
            "discovery finished"
        );
        registry
    }

    fn load_single_root(&self, source: &ConfigSource) -> Registry {
        let mut registry = Registry::empty(DiscoveryMode::SingleRoot);
        // Primary even if unreadable, so the next write can replace it
        registry.set_primary_file(source.file_path.clone());
        self.load_source(&mut registry, source);
        registry
    }

    fn load_nested(&self, roots: &[WorkspaceRoot]) -> Registry {
        let mut registry = Registry::empty(DiscoveryMode::Nested);

        for root in roots {
            for source in self.subdirectory_sources(&root.path) {
                self.load_source(&mut registry, &source);
            }
        }

        if registry.sources().is_empty() {
            return Registry::empty(DiscoveryMode::Empty);
        }

        registry.select_primary_from_sources();
        registry
    }

    fn load_multi_root(&self, sources: &[ConfigSource]) -> Registry {
        let mut registry = Registry::empty(DiscoveryMode::MultiRoot);

        for source in sources {
            self.load_source(&mut registry, source);
        }

        registry.select_primary_from_sources();
        registry
    }

    /// Immediate subdirectories of `root` that have a scripts file, in listing order
    fn subdirectory_sources(&self, root: &Path) -> Vec<ConfigSource> {
        let entries = match self.fs.list_directory(root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "failed to scan subdirectories");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|entry| entry.is_directory && !self.is_skipped(&entry.name))
            .filter_map(|entry| {
                let project_path = root.join(&entry.name);
                let file_path = project_path.join(&self.settings.file_name);
                self.fs.exists(&file_path).then(|| ConfigSource {
                    file_path,
                    project_name: entry.name,
                    project_path,
                })
            })
            .collect()
    }

    fn is_skipped(&self, dir_name: &str) -> bool {
        dir_name.starts_with('.') || self.settings.skip_dirs.iter().any(|d| d == dir_name)
    }

    // A read failure drops this file only; a parse failure still counts as a source
    fn load_source(&self, registry: &mut Registry, source: &ConfigSource) {
        match self.fs.read_text(&source.file_path) {
            Ok(content) => {
                let parsed = parse_scripts_file(&content);
                debug!(
                    project = %source.project_name,
                    path = %source.file_path.display(),
                    count = parsed.scripts.len(),
                    "loaded scripts file"
                );
                if !parsed.unrecognized.is_empty() {
                    warn!(
                        path = %source.file_path.display(),
                        skipped = parsed.unrecognized.len(),
                        "some entries are not valid scripts and were not loaded"
                    );
                }
                registry.add_source(source, parsed.scripts);
                registry.keep_unrecognized(&source.file_path, parsed.unrecognized);
            }
            Err(e) => {
                warn!(
                    project = %source.project_name,
                    error = %e,
                    "failed to read scripts file"
                );
            }
        }
    }
}
