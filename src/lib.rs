/// scripts-runner library
///
/// Finds per-project scripts files across a workspace, merges them into one
/// registry and shows them as a project -> category -> script tree.

pub mod core;
pub mod error;
pub mod host;
pub mod scripts;
pub mod settings;

// Re-exports for convenience
pub use crate::core::ScriptsManager;
pub use error::{Result, ScriptsError};
pub use scripts::ScriptRecord;
pub use settings::Settings;
