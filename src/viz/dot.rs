//! Graphviz DOT output for recursion trees.

use std::fmt::Write;

use super::tree::{Atom, TreeError, TreeNode, decode_all};

/// Default background, a pale yellow.
pub const DEFAULT_BACKGROUND: &str = "#fff3af";

/// Builder for a directed graph.
///
/// Node ids are handed out in insertion order starting at 1. Each render owns its builder, so two renders never
/// share a counter.
#[derive(Debug, Clone)]
pub struct DotGraph {
    background: String,
    nodes: Vec<(usize, String)>,
    edges: Vec<(usize, usize)>,
    next_id: usize,
}

impl Default for DotGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DotGraph {
    pub fn new() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, label: impl Into<String>) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push((id, label.into()));
        id
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.edges.push((from, to));
    }

    /// Add `node` and its subtree, returning the id of `node`.
    ///
    /// Ids follow pre-order. Each edge is added once the child's own subtree is complete.
    pub fn add_tree(&mut self, node: &TreeNode) -> usize {
        let root = self.add_node(node.label.to_string());
        // (node, its id, index of the next child to visit)
        let mut path = vec![(node, root, 0usize)];

        while let Some(top) = path.last_mut() {
            let (current, id) = (top.0, top.1);
            match current.children.get(top.2) {
                Some(child) => {
                    top.2 += 1;
                    let child_id = self.add_node(child.label.to_string());
                    path.push((child, child_id, 0));
                }
                None => {
                    path.pop();
                    if let Some(&(_, parent, _)) = path.last() {
                        self.add_edge(parent, id);
                    }
                }
            }
        }

        root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "digraph {{");
        let _ = writeln!(out, "    bgcolor=\"{}\";", escape_label(&self.background));
        for (id, label) in &self.nodes {
            let _ = writeln!(out, "    {} [label=\"{}\"];", id, escape_label(label));
        }
        for (from, to) in &self.edges {
            let _ = writeln!(out, "    {} -> {};", from, to);
        }
        out.push_str("}\n");
        out
    }
}

/// Escape a label for a double-quoted DOT string. Newlines become DOT line breaks.
fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a tree as DOT text.
pub fn render_dot(tree: &TreeNode) -> String {
    let mut graph = DotGraph::new();
    graph.add_tree(tree);
    graph.to_dot()
}

/// Decode a count-prefixed pre-order encoding and render it as DOT text.
pub fn render_encoded(atoms: &[Atom]) -> Result<String, TreeError> {
    decode_all(atoms).map(|tree| render_dot(&tree))
}
