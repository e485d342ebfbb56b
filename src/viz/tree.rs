//! Count-prefixed pre-order tree encoding.
//!
//! A node is written as its label, its child count, then each child in turn:
//!
//! ```text
//! fib(4)  ->  ["fib(4)", 2, "fib(3)", 2, "fib(2)", 0, "fib(1)", 0, "fib(2)", 0]
//! ```

use std::fmt;

use thiserror::Error;

/// One slot of the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Int(i64),
    Str(String),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(n) => write!(f, "{}", n),
            Atom::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Atom {
    fn from(n: i64) -> Self {
        Atom::Int(n)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom::Str(s.to_string())
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Atom::Str(s)
    }
}

/// A decoded tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: Atom,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(label: impl Into<Atom>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<Atom>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }
        count
    }
}

// Recursion traces can be arbitrarily deep, so subtrees are torn down from a heap stack.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Errors from decoding a malformed encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("encoding ended early: expected a value at position {position}")]
    UnexpectedEnd { position: usize },

    #[error("expected a non-negative child count at position {position}, found `{found}`")]
    InvalidCount { position: usize, found: String },

    #[error("{count} unused value(s) after the root node")]
    TrailingAtoms { count: usize },
}

/// Decode one node (with its subtree) from the front of `atoms`.
///
/// ## Returns
/// - the decoded node and the part of `atoms` it did not consume.
pub fn decode(atoms: &[Atom]) -> Result<(TreeNode, &[Atom]), TreeError> {
    let (node, next) = decode_at(atoms, 0)?;
    Ok((node, &atoms[next..]))
}

/// Decode a whole encoding that holds exactly one tree.
pub fn decode_all(atoms: &[Atom]) -> Result<TreeNode, TreeError> {
    let (node, rest) = decode(atoms)?;
    if !rest.is_empty() {
        return Err(TreeError::TrailingAtoms { count: rest.len() });
    }
    Ok(node)
}

/// A node whose children are still being decoded.
struct Frame {
    label: Atom,
    remaining: usize,
    children: Vec<TreeNode>,
}

/// Decode the node starting at `pos`, returning it with the position just past its subtree.
///
/// Open nodes live on an explicit stack, so the depth of the tree is bounded by memory rather than by the call
/// stack.
fn decode_at(atoms: &[Atom], pos: usize) -> Result<(TreeNode, usize), TreeError> {
    let mut open: Vec<Frame> = Vec::new();
    let mut next = pos;

    loop {
        let (label, count) = read_header(atoms, next)?;
        next += 2;

        let mut finished = if count == 0 {
            TreeNode::leaf(label)
        } else {
            // A count can't exceed what is left; bound the allocation by it
            let capacity = count.min(atoms.len().saturating_sub(next));
            open.push(Frame {
                label,
                remaining: count,
                children: Vec::with_capacity(capacity),
            });
            continue;
        };

        // Hand the finished node to its parent, closing every parent it completes
        loop {
            let Some(mut parent) = open.pop() else {
                return Ok((finished, next));
            };
            parent.children.push(finished);
            parent.remaining -= 1;
            if parent.remaining > 0 {
                open.push(parent);
                break;
            }
            finished = TreeNode::with_children(parent.label, parent.children);
        }
    }
}

/// Read the label and child count of the node at `pos`.
fn read_header(atoms: &[Atom], pos: usize) -> Result<(Atom, usize), TreeError> {
    let label = atoms
        .get(pos)
        .cloned()
        .ok_or(TreeError::UnexpectedEnd { position: pos })?;

    let count = match atoms.get(pos + 1) {
        Some(Atom::Int(n)) => usize::try_from(*n).map_err(|_| TreeError::InvalidCount {
            position: pos + 1,
            found: n.to_string(),
        })?,
        Some(other) => {
            return Err(TreeError::InvalidCount {
                position: pos + 1,
                found: other.to_string(),
            });
        }
        None => return Err(TreeError::UnexpectedEnd { position: pos + 1 }),
    };

    Ok((label, count))
}

/// Encode a tree in count-prefixed pre-order.
pub fn encode(node: &TreeNode) -> Vec<Atom> {
    let mut atoms = Vec::with_capacity(node.size() * 2);
    let mut pending = vec![node];
    while let Some(node) = pending.pop() {
        atoms.push(node.label.clone());
        atoms.push(Atom::Int(node.children.len() as i64));
        // Reversed so the first child comes off the stack first
        pending.extend(node.children.iter().rev());
    }
    atoms
}
