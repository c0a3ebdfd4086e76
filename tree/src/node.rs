#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value and its ordered children.
///
/// Leaves always carry an empty `children` vector. When serialized, empty
/// children are omitted, and a missing `children` field deserializes as a
/// leaf, so both spellings of "no children" compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeNode<T> {
    pub value: T,
    #[cfg_attr(
        feature = "serde",
        serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn new(value: T, children: Vec<TreeNode<T>>) -> Self {
        Self { value, children }
    }

    pub fn leaf(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeNode<T>) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this tree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Number of levels in this tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub fn as_ref_tree(&self) -> TreeNode<&T> {
        TreeNode {
            value: &self.value,
            children: self.children.iter().map(TreeNode::as_ref_tree).collect(),
        }
    }

    /// Convert every value, keeping the shape of the tree.
    pub fn map<U, F>(self, mut map: F) -> TreeNode<U>
    where
        F: FnMut(T) -> U,
    {
        fn map_inner<T, U, F>(node: TreeNode<T>, map: &mut F) -> TreeNode<U>
        where
            F: FnMut(T) -> U,
        {
            let TreeNode { value, children } = node;
            TreeNode {
                value: map(value),
                children: children
                    .into_iter()
                    .map(|child| map_inner(child, map))
                    .collect(),
            }
        }

        map_inner(self, &mut map)
    }

    pub fn map_ref<U, F>(&self, mut map: F) -> TreeNode<U>
    where
        F: FnMut(&T) -> U,
    {
        fn map_inner<T, U, F>(node: &TreeNode<T>, map: &mut F) -> TreeNode<U>
        where
            F: FnMut(&T) -> U,
        {
            TreeNode {
                value: map(&node.value),
                children: node
                    .children
                    .iter()
                    .map(|child| map_inner(child, map))
                    .collect(),
            }
        }

        map_inner(self, &mut map)
    }
}

impl<T> From<T> for TreeNode<T> {
    fn from(value: T) -> Self {
        TreeNode::leaf(value)
    }
}
