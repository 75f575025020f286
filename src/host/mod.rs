/// Host integration
///
/// Filesystem, workspace roots, shell execution, file watching and
/// rendering. The core only talks to these through their types and traits.

pub mod executor;
pub mod fs;
pub mod render;
pub mod watcher;
pub mod workspace;

pub use executor::{CommandExecutor, Shell, ShellProgram, TerminalExecutor};
pub use fs::{DirEntry, FileSystem, OsFileSystem};
pub use watcher::{reload_channel, ReloadQueue, ReloadRequest, ReloadSignal, ScriptsWatcher};
pub use workspace::{resolve_roots, WorkspaceRoot};
