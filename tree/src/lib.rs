//! Generic in-memory trees built from flat parent-referencing records.
//!
//! A [`TreeNode`] owns its value and its children. Trees are usually
//! reconstructed from a flat list with [`build_tree`] or [`build_forest`],
//! walked with [`visit_nodes`] / [`visit_values`], queried with
//! [`find_nodes`], [`find_values`] and [`count_children`], and turned back
//! into flat lists with [`flatten`] or [`flatten_with`].

mod build;
mod error;
mod flatten;
mod node;
mod query;
mod visit;

pub use self::build::*;
pub use self::error::*;
pub use self::flatten::*;
pub use self::node::*;
pub use self::query::*;
pub use self::visit::*;
