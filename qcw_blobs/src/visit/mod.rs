//! Traversal of workspace and bar chart trees.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children in order. An override that does not call the
//! `walk_*` function itself does not descend into that subtree.
//!
//! The workspace traits extend the bar chart traits, so one visitor walks
//! from the workspace root down to every line.
//!
//! An `Err` from any method stops the walk and is returned to the caller.

mod barchart;
mod barchart_mut;
mod workspace;
mod workspace_mut;

pub use barchart::*;
pub use barchart_mut::*;
pub use workspace::*;
pub use workspace_mut::*;
