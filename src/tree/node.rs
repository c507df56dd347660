//! Borrowed views onto nodes of a [`Tree`]

use std::fmt;

use super::{NodeData, NodeId, Tree};

/// Read-only view of a node
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) const fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn data(&self) -> &'a NodeData {
        self.tree.data(self.id)
    }

    fn at(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef::new(self.tree, id)
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Tag name of this node
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Names from the root down to this node, joined with `/`
    pub fn path(&self) -> String {
        let mut names = vec![self.name()];
        let mut current = self.parent();
        while let Some(node) = current {
            names.push(node.name());
            current = node.parent();
        }
        names.reverse();
        names.join("/")
    }

    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.data().attributes.get(key).map(String::as_str)
    }

    /// Stored value for `key`, or `default` when the key is absent
    pub fn get_attribute_or_default(&self, key: &str, default: &str) -> String {
        self.attribute(key).unwrap_or(default).to_string()
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.data().attributes.contains_key(key)
    }

    pub fn attribute_count(&self) -> usize {
        self.data().attributes.len()
    }

    /// Attributes in the order their keys were first set
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.data()
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True iff at least one child named `key` exists
    pub fn has_child(&self, key: &str) -> bool {
        self.data()
            .groups
            .get(key)
            .is_some_and(|group| !group.is_empty())
    }

    /// First child named `key`, if any. Never creates anything.
    pub fn find_child(&self, key: &str) -> Option<NodeRef<'a>> {
        self.tree.first_child(self.id, key).map(|id| self.at(id))
    }

    /// Every child named `key`, in the order they were added
    pub fn get_children(&self, key: &str) -> Vec<NodeRef<'a>> {
        let tree = self.tree;
        self.data()
            .groups
            .get(key)
            .map(|group| group.iter().map(|&id| NodeRef::new(tree, id)).collect())
            .unwrap_or_default()
    }

    /// All children in document order, regardless of name
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.data().order.iter().map(move |&id| NodeRef::new(tree, id))
    }

    pub fn child_count(&self) -> usize {
        self.data().order.len()
    }

    /// Distinct child names, in order of first appearance
    pub fn child_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.data().groups.keys().map(String::as_str)
    }

    /// Follow a `/`-separated chain of child names using first-child lookups.
    /// Empty segments are ignored, so `""` resolves to this node.
    pub fn lookup(&self, path: &str) -> Option<NodeRef<'a>> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(*self, |node, segment| node.find_child(segment))
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// Mutable view of a node
pub struct NodeMut<'a> {
    tree: &'a mut Tree,
    id: NodeId,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.tree.data(self.id).name
    }

    /// Reborrow as a read-only view
    pub fn view(&self) -> NodeRef<'_> {
        NodeRef::new(&*self.tree, self.id)
    }

    pub fn into_view(self) -> NodeRef<'a> {
        NodeRef::new(self.tree, self.id)
    }

    /// Append a new empty child. Never merges with an existing child of the
    /// same name; the new node goes to the end of that name's group.
    pub fn add_child(&mut self, name: impl Into<String>) -> NodeMut<'_> {
        let id = self.tree.push_child(self.id, name.into());
        NodeMut::new(&mut *self.tree, id)
    }

    /// Insert or overwrite an attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tree.set_attribute(self.id, key.into(), value.into());
    }

    pub fn get_attribute_or_default(&self, key: &str, default: &str) -> String {
        self.view().get_attribute_or_default(key, default)
    }

    pub fn has_child(&self, key: &str) -> bool {
        self.view().has_child(key)
    }

    /// First child named `key`.
    ///
    /// **Creates an empty child when none exists.** This makes reading a
    /// section with all-default values painless, but it mutates the tree on
    /// a miss: calling it on a missing key makes `has_child(key)` true
    /// afterwards. Use [`NodeRef::find_child`] for a lookup without side
    /// effects.
    pub fn get_child(&mut self, key: &str) -> NodeMut<'_> {
        let id = match self.tree.first_child(self.id, key) {
            Some(id) => id,
            None => self.tree.push_child(self.id, key.to_string()),
        };
        NodeMut::new(&mut *self.tree, id)
    }

    pub fn get_children(&self, key: &str) -> Vec<NodeRef<'_>> {
        self.view().get_children(key)
    }
}

impl fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeMut")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}
