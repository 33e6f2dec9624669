//! Documents carried by fragments
//!
//! A fragment's content arrives either as a set of statements (Turtle,
//! N-Triples, N-Quads) or as a single JSON tree (JSON-LD). Both shapes expose
//! the same capabilities through [`FragmentShape`], so the rewriting engine
//! never needs to know which one it is working on.

use std::collections::HashMap;

use super::graph::GraphDocument;
use super::tree::TreeDocument;

/// Mapping from an identifier to the identifier replacing it
pub type IdentifierRewrites = HashMap<String, String>;

/// Capabilities every document shape offers to the rewriting engine
pub trait FragmentShape {
    /// The identifier the fragment is about, if one can be located
    fn primary_identifier(&self) -> Option<&str>;

    /// Other identifiers that take part in the fragment's structure:
    /// the event stream's own identifier and the targets of outgoing relations
    fn linked_identifiers(&self) -> Vec<&str>;

    /// Replace every structural reference found in `rewrites` in one pass
    ///
    /// Returns the number of references replaced.
    fn rewrite_identifiers(&mut self, rewrites: &IdentifierRewrites) -> usize;
}

/// Content of a fragment, in one of the two supported shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Unordered subject-predicate-object(-graph) statements
    Graph(GraphDocument),
    /// A JSON-LD object tree
    Tree(TreeDocument),
}

impl Document {
    /// Short name of the shape, for logging
    pub fn shape(&self) -> &'static str {
        match self {
            Document::Graph(_) => "graph",
            Document::Tree(_) => "tree",
        }
    }
}

impl FragmentShape for Document {
    fn primary_identifier(&self) -> Option<&str> {
        match self {
            Document::Graph(graph) => graph.primary_identifier(),
            Document::Tree(tree) => tree.primary_identifier(),
        }
    }

    fn linked_identifiers(&self) -> Vec<&str> {
        match self {
            Document::Graph(graph) => graph.linked_identifiers(),
            Document::Tree(tree) => tree.linked_identifiers(),
        }
    }

    fn rewrite_identifiers(&mut self, rewrites: &IdentifierRewrites) -> usize {
        match self {
            Document::Graph(graph) => graph.rewrite_identifiers(rewrites),
            Document::Tree(tree) => tree.rewrite_identifiers(rewrites),
        }
    }
}

impl From<GraphDocument> for Document {
    fn from(graph: GraphDocument) -> Self {
        Document::Graph(graph)
    }
}

impl From<TreeDocument> for Document {
    fn from(tree: TreeDocument) -> Self {
        Document::Tree(tree)
    }
}
