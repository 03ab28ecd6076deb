//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod inspect;
pub mod render;

// Re-export main command functions
pub use inspect::{inspect_tree, inspect_tree_file};
pub use render::{execute_render, validate_args, RenderArgs};
