pub mod builder;
pub mod materialize;
pub mod router;
mod tree;

pub use builder::build_tree;
pub use materialize::materialize;
pub use router::{route, DispatchOutcome};
pub use tree::{ItemId, MenuEntry, MenuItem, MenuTree, ID_FIRST, SEPARATOR_TEXT};
