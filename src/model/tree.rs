//! The spatial partition tree.
//!
//! An ordered binary tree over window ids: every internal node is a split
//! with exactly two children and no window, every leaf holds exactly one
//! window. The depth-first left-then-right traversal of the leaves is the
//! deterministic window order layout strategies consume. The tree reflects
//! insertion history; it is never rebalanced.

use std::fmt;

use slotmap::SlotMap;

use crate::sys::app::WindowId;

slotmap::new_key_type! {
    /// A node somewhere in the partition tree.
    pub struct NodeId;
}

/// Either a split (two children) or a leaf (one window). Parent keys are
/// back-references for upward traversal only; ownership flows root to
/// children through the arena.
#[derive(Default, Debug, PartialEq)]
struct Node {
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    window: Option<WindowId>,
}

impl Node {
    fn leaf(window: WindowId) -> Node {
        Node {
            window: Some(window),
            ..Node::default()
        }
    }
}

#[derive(Default)]
pub struct PartitionTree {
    map: SlotMap<NodeId, Node>,
    root: Option<NodeId>,
}

impl PartitionTree {
    pub fn new() -> PartitionTree { PartitionTree::default() }

    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Number of windows in the tree.
    pub fn len(&self) -> usize { self.map.iter().filter(|(_, n)| n.window.is_some()).count() }

    pub fn contains(&self, window: WindowId) -> bool { self.find_leaf(window).is_some() }

    /// Window ids in depth-first left-to-right order.
    pub fn windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        Leaves {
            stack: self.root.into_iter().collect(),
            map: &self.map,
        }
    }

    /// Appends `window` at the end of the traversal order: the rightmost
    /// leaf is split, keeping itself on the left and the new window on the
    /// right. With a leaf root, the root itself becomes the split.
    pub fn insert_at_end(&mut self, window: WindowId) {
        debug_assert!(!self.contains(window), "window already in tree: {window:?}");
        let Some(root) = self.root else {
            self.root = Some(self.map.insert(Node::leaf(window)));
            return;
        };
        let mut node = root;
        while let Some(right) = self.map[node].right {
            node = right;
        }
        self.split_leaf(node, window);
    }

    /// Inserts `window` next to `at` by splitting the leaf that holds it.
    /// Returns false when `at` is not in the tree.
    pub fn insert_at(&mut self, window: WindowId, at: WindowId) -> bool {
        debug_assert!(!self.contains(window), "window already in tree: {window:?}");
        let Some(leaf) = self.find_leaf(at) else {
            return false;
        };
        self.split_leaf(leaf, window);
        true
    }

    /// Removes the leaf holding `window` and collapses its parent: the
    /// sibling subtree takes the parent's former position in the
    /// grandparent, keeping its own structure. Removing an id that is not
    /// in the tree is a contract violation.
    pub fn remove(&mut self, window: WindowId) -> bool {
        let Some(leaf) = self.find_leaf(window) else {
            debug_assert!(false, "remove of window not in tree: {window:?}");
            return false;
        };
        let Some(parent) = self.map[leaf].parent else {
            self.map.remove(leaf);
            self.root = None;
            return true;
        };

        let parent_node = &self.map[parent];
        let sibling = if parent_node.left == Some(leaf) {
            parent_node.right
        } else {
            parent_node.left
        }
        .expect("split node must have two children");
        let grandparent = parent_node.parent;

        self.map[sibling].parent = grandparent;
        match grandparent {
            Some(grandparent) => {
                let node = &mut self.map[grandparent];
                if node.left == Some(parent) {
                    node.left = Some(sibling);
                } else {
                    node.right = Some(sibling);
                }
            }
            None => self.root = Some(sibling),
        }
        self.map.remove(leaf);
        self.map.remove(parent);
        true
    }

    fn find_leaf(&self, window: WindowId) -> Option<NodeId> {
        self.map.iter().find_map(|(id, n)| (n.window == Some(window)).then_some(id))
    }

    fn split_leaf(&mut self, leaf: NodeId, window: WindowId) {
        let parent = self.map[leaf].parent;
        let new_leaf = self.map.insert(Node::leaf(window));
        let split = self.map.insert(Node {
            parent,
            left: Some(leaf),
            right: Some(new_leaf),
            window: None,
        });
        self.map[leaf].parent = Some(split);
        self.map[new_leaf].parent = Some(split);
        match parent {
            Some(parent) => {
                let node = &mut self.map[parent];
                if node.left == Some(leaf) {
                    node.left = Some(split);
                } else {
                    debug_assert_eq!(node.right, Some(leaf));
                    node.right = Some(split);
                }
            }
            None => self.root = Some(split),
        }
    }

    fn ascii(&self, id: NodeId) -> ascii_tree::Tree {
        let node = &self.map[id];
        match node.window {
            Some(window) => ascii_tree::Tree::Leaf(vec![format!("{window:?}")]),
            None => ascii_tree::Tree::Node(
                "split".to_owned(),
                [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .map(|child| self.ascii(child))
                    .collect(),
            ),
        }
    }

    #[cfg(test)]
    #[track_caller]
    pub(crate) fn validate(&self) {
        let mut leaves = 0;
        let mut splits = 0;
        for (id, node) in self.map.iter() {
            match node.window {
                Some(_) => {
                    assert!(
                        node.left.is_none() && node.right.is_none(),
                        "leaf {id:?} has children"
                    );
                    leaves += 1;
                }
                None => {
                    assert!(
                        node.left.is_some() && node.right.is_some(),
                        "split {id:?} is missing a child"
                    );
                    splits += 1;
                }
            }
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(self.map[child].parent, Some(id), "bad parent link on {child:?}");
            }
            if node.parent.is_none() {
                assert_eq!(self.root, Some(id), "detached node {id:?}");
            }
        }
        if !self.is_empty() {
            assert_eq!(leaves, splits + 1, "leaf/split count out of balance");
        }
    }
}

impl fmt::Display for PartitionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return f.write_str("(empty)");
        };
        let mut rendered = String::new();
        ascii_tree::write_tree(&mut rendered, &self.ascii(root)).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl fmt::Debug for PartitionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartitionTree[{:?}]", self.windows().collect::<Vec<_>>())
    }
}

struct Leaves<'a> {
    stack: Vec<NodeId>,
    map: &'a SlotMap<NodeId, Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = WindowId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = &self.map[id];
            if let Some(window) = node.window {
                return Some(window);
            }
            // Right below left so the left subtree pops first.
            if let Some(right) = node.right {
                self.stack.push(right);
            }
            if let Some(left) = node.left {
                self.stack.push(left);
            }
        }
        None
    }
}
