/// Scripts file handling
///
/// Models, parsing and persistence for the per-project scripts file.

pub mod models;
pub mod parser;
pub mod persistence;

pub use models::{ConfigSource, ScriptRecord, DEFAULT_CATEGORY};
pub use parser::{parse_scripts, parse_scripts_file, ParsedScripts};
pub use persistence::save_scripts;
