//! Arena-backed node tree produced by the parser
//!
//! Nodes live in a single `Vec` owned by [`Tree`] and are addressed by
//! [`NodeId`]. Ids never move or dangle: nodes are only ever appended and the
//! whole arena is dropped together, so a `NodeId` obtained earlier stays valid
//! no matter how many children are added afterwards.

pub mod node;

use indexmap::IndexMap;

pub use node::{NodeMut, NodeRef};

/// Name given to the implicit top-level node
pub const ROOT_NAME: &str = "root";

/// Stable handle to a node inside a [`Tree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) attributes: IndexMap<String, String>,
    /// Same-named children, each group in insertion order
    pub(crate) groups: IndexMap<String, Vec<NodeId>>,
    /// All children in document order
    pub(crate) order: Vec<NodeId>,
}

impl NodeData {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            attributes: IndexMap::new(),
            groups: IndexMap::new(),
            order: Vec::new(),
        }
    }
}

/// A parsed document: an owned arena of nodes with a single root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only an empty node named `root`
    pub fn new() -> Self {
        Self::with_root_name(ROOT_NAME)
    }

    pub fn with_root_name(name: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::new(name.into(), None)],
        }
    }

    pub const fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, self.root_id())
    }

    pub fn root_mut(&mut self) -> NodeMut<'_> {
        let id = self.root_id();
        NodeMut::new(self, id)
    }

    /// Look up a node by id. `None` if the id is out of range; an in-range id
    /// taken from another tree resolves to whatever node sits at that index.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_>> {
        if id.0 < self.nodes.len() {
            Some(NodeMut::new(self, id))
        } else {
            None
        }
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but its root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    // Ids are only minted by `push_child` and `root_id`, both in bounds.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    #[allow(clippy::indexing_slicing)]
    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, name: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(name.clone(), Some(parent)));

        let data = self.data_mut(parent);
        data.groups.entry(name).or_default().push(id);
        data.order.push(id);
        id
    }

    pub(crate) fn first_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.data(parent)
            .groups
            .get(name)
            .and_then(|group| group.first())
            .copied()
    }

    pub(crate) fn set_attribute(&mut self, id: NodeId, key: String, value: String) {
        self.data_mut(id).attributes.insert(key, value);
    }
}
