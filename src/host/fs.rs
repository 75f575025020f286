/// File I/O used by discovery and persistence
///
/// Everything that touches the disk goes through `FileSystem` so the core
/// can be driven against an in-memory tree in tests.

use crate::error::{Result, ScriptsError};
use std::fs;
use std::path::Path;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_directory: bool,
}

/// File operations the core depends on
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn read_text(&self, path: &Path) -> Result<String>;

    fn write_text(&self, path: &Path, contents: &str) -> Result<()>;

    /// Immediate children of `path`, in whatever order the platform returns them
    fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| ScriptsError::io(path, e))
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|e| ScriptsError::io(path, e))
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path).map_err(|e| ScriptsError::io(path, e))? {
            let entry = entry.map_err(|e| ScriptsError::io(path, e))?;
            // Follows symlinks, so a linked project directory still counts
            let is_directory = entry.path().is_dir();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFileSystem;

#[cfg(test)]
mod memory {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::PathBuf;

    /// In-memory tree for tests. Counts writes so tests can assert none happened.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryFileSystem {
        files: RefCell<BTreeMap<PathBuf, String>>,
        dirs: RefCell<BTreeSet<PathBuf>>,
        unreadable: RefCell<BTreeSet<PathBuf>>,
        writes: Cell<usize>,
    }

    impl MemoryFileSystem {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn add_dir(&self, path: impl Into<PathBuf>) {
            let path = path.into();
            let mut dirs = self.dirs.borrow_mut();
            for ancestor in path.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(ancestor.to_path_buf());
            }
        }

        pub(crate) fn add_file(&self, path: impl Into<PathBuf>, contents: &str) {
            let path = path.into();
            if let Some(parent) = path.parent() {
                self.add_dir(parent);
            }
            self.files.borrow_mut().insert(path, contents.to_string());
        }

        /// The file exists but every read fails
        pub(crate) fn add_unreadable(&self, path: impl Into<PathBuf>) {
            let path = path.into();
            self.add_file(path.clone(), "");
            self.unreadable.borrow_mut().insert(path);
        }

        pub(crate) fn contents(&self, path: &Path) -> Option<String> {
            self.files.borrow().get(path).cloned()
        }

        pub(crate) fn write_count(&self) -> usize {
            self.writes.get()
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
        }

        fn read_text(&self, path: &Path) -> Result<String> {
            if self.unreadable.borrow().contains(path) {
                return Err(ScriptsError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable"),
                ));
            }
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                ScriptsError::io(path, std::io::Error::from(std::io::ErrorKind::NotFound))
            })
        }

        fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
            self.writes.set(self.writes.get() + 1);
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>> {
            if !self.dirs.borrow().contains(path) {
                return Err(ScriptsError::io(
                    path,
                    std::io::Error::from(std::io::ErrorKind::NotFound),
                ));
            }

            let dirs = self
                .dirs
                .borrow()
                .iter()
                .filter(|d| d.parent() == Some(path))
                .map(|d| DirEntry {
                    name: d.file_name().unwrap_or_default().to_string_lossy().into_owned(),
                    is_directory: true,
                })
                .collect::<Vec<_>>();
            let files = self
                .files
                .borrow()
                .keys()
                .filter(|f| f.parent() == Some(path))
                .map(|f| DirEntry {
                    name: f.file_name().unwrap_or_default().to_string_lossy().into_owned(),
                    is_directory: false,
                })
                .collect::<Vec<_>>();

            Ok(dirs.into_iter().chain(files).collect())
        }
    }
}
