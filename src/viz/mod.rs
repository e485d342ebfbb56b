//! Recursion tree visualization
//!
//! Exercise programs can dump the shape of a recursion as a flat, count-prefixed pre-order list of values. This
//! module turns that list back into a tree and renders it as Graphviz DOT text (`dot -Tpng` makes the image).
//!
//! ## Modules
//!
//! - `tree` - the encoding, decoding and `TreeNode`
//! - `dot` - `DotGraph` builder and rendering

pub mod dot;
pub mod tree;

pub use dot::{DotGraph, render_dot, render_encoded};
pub use tree::{Atom, TreeError, TreeNode, decode, decode_all, encode};
