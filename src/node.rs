//! Compressed trie storage
//!
//! A [`Node`] owns at most one outgoing [`Edge`] per first character, and an
//! edge owns its target node outright, so the structure is always a tree.
//! Nodes are never removed; edges only ever get shorter when a shared prefix
//! is split out.

use std::collections::BTreeMap;

/// A trie node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Outgoing edges keyed by the first character of their label
    pub edges: BTreeMap<char, Edge>,
    /// A registered path ends here
    pub is_leaf: bool,
}

impl Node {
    /// Create a node without edges
    pub fn new(is_leaf: bool) -> Self {
        Self {
            edges: BTreeMap::new(),
            is_leaf,
        }
    }

    /// Edge leaving this node whose label starts with `transition`
    pub fn transition(&self, transition: char) -> Option<&Edge> {
        self.edges.get(&transition)
    }

    /// Attach a subtree under a new edge
    ///
    /// An existing edge with the same first character is replaced. Empty
    /// labels are ignored.
    pub fn add_edge(&mut self, label: String, target: Node) {
        if let Some(first) = label.chars().next() {
            self.edges.insert(first, Edge { label, target });
        }
    }

    /// Number of nodes in this subtree, this one included
    pub fn size(&self) -> usize {
        1 + self
            .edges
            .values()
            .map(|edge| edge.target.size())
            .sum::<usize>()
    }
}

/// A labelled edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Substring consumed when following this edge, never empty
    pub label: String,
    /// Subtree reached through this edge
    pub target: Node,
}

impl Edge {
    /// Create an edge to a fresh leaf
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Node::new(true),
        }
    }

    /// Cut the label at byte offset `at`.
    ///
    /// The label keeps `[0, at)`; a fresh node (leaf or not, as asked) becomes
    /// the target, and the old target moves under it behind the removed tail.
    /// `at` must be a char boundary strictly inside the label.
    pub fn split(&mut self, at: usize, is_leaf: bool) {
        let tail = self.label.split_off(at);
        let previous = std::mem::replace(&mut self.target, Node::new(is_leaf));
        self.target.add_edge(tail, previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_edge_targets_leaf() {
        let edge = Edge::new("users");
        assert_eq!(edge.label, "users");
        assert!(edge.target.is_leaf);
        assert!(edge.target.edges.is_empty());
    }

    #[test]
    fn test_add_edge_keyed_by_first_char() {
        let mut node = Node::new(false);
        node.add_edge("team".to_string(), Node::new(true));
        node.add_edge("ok".to_string(), Node::new(true));
        node.add_edge(String::new(), Node::new(true));

        assert_eq!(node.edges.len(), 2);
        assert_eq!(node.transition('t').map(|e| e.label.as_str()), Some("team"));
        assert!(node.transition('x').is_none());
    }

    #[test]
    fn test_split_keeps_subtree() {
        let mut edge = Edge::new("tester");
        edge.target.add_edge("s".to_string(), Node::new(true));

        edge.split(4, false);

        assert_eq!(edge.label, "test");
        assert!(!edge.target.is_leaf);
        let tail = edge.target.transition('e').unwrap();
        assert_eq!(tail.label, "er");
        assert!(tail.target.is_leaf);
        assert!(tail.target.transition('s').is_some());
    }

    #[test]
    fn test_size() {
        let mut root = Node::new(false);
        root.add_edge("a".to_string(), Node::new(true));
        let mut edge = Edge::new("bcd");
        edge.split(1, true);
        root.edges.insert('b', edge);

        assert_eq!(root.size(), 4);
    }
}
