/// Core functionality modules
///
/// Discovery, the script registry, the project/category tree and the
/// manager that ties them together.

pub mod discovery;
pub mod hierarchy;
pub mod manager;
pub mod registry;
pub mod searcher;

pub use discovery::{Discovery, DiscoveryMode};
pub use hierarchy::HierarchyNode;
pub use manager::ScriptsManager;
pub use registry::Registry;
pub use searcher::{Pick, ScriptMatch, Searcher};
