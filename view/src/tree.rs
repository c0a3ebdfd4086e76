use std::fmt::Display;

use canopy_tree::TreeNode;
use serde::{Deserialize, Serialize};
use termtree::Tree as DisplayTree;

use crate::Render;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewTree {
    Branch { label: String, nodes: Vec<ViewTree> },
    Leaf { label: String },
}

impl ViewTree {
    pub fn label(&self) -> &str {
        match self {
            ViewTree::Branch { label, .. } => label,
            ViewTree::Leaf { label } => label,
        }
    }

    pub fn from_node<T>(node: &TreeNode<T>) -> Self
    where
        T: Render,
    {
        Self::from_node_with(node, |value| value.render())
    }

    /// Label each node with `render`; nodes without children become leaves.
    pub fn from_node_with<T, F>(node: &TreeNode<T>, mut render: F) -> Self
    where
        F: FnMut(&T) -> String,
    {
        fn build<T, F>(node: &TreeNode<T>, render: &mut F) -> ViewTree
        where
            F: FnMut(&T) -> String,
        {
            let label = render(&node.value);
            if node.is_leaf() {
                ViewTree::Leaf { label }
            } else {
                ViewTree::Branch {
                    label,
                    nodes: node.children.iter().map(|child| build(child, render)).collect(),
                }
            }
        }

        build(node, &mut render)
    }

    /// Gather several trees under one synthetic label.
    pub fn forest<T, F>(label: impl Into<String>, roots: &[TreeNode<T>], mut render: F) -> Self
    where
        F: FnMut(&T) -> String,
    {
        ViewTree::Branch {
            label: label.into(),
            nodes: roots
                .iter()
                .map(|root| Self::from_node_with(root, &mut render))
                .collect(),
        }
    }
}

impl Display for ViewTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DisplayTree::<String>::from(self.clone()).fmt(f)
    }
}

impl<T> From<&TreeNode<T>> for ViewTree
where
    T: Render,
{
    fn from(node: &TreeNode<T>) -> Self {
        ViewTree::from_node(node)
    }
}

impl From<ViewTree> for DisplayTree<String> {
    fn from(value: ViewTree) -> Self {
        match value {
            ViewTree::Branch { label, nodes } => DisplayTree::new(label).with_leaves(nodes),
            ViewTree::Leaf { label } => DisplayTree::new(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode<u32> {
        TreeNode::new(
            1,
            vec![
                TreeNode::new(2, vec![TreeNode::leaf(4)]),
                TreeNode::leaf(3),
            ],
        )
    }

    #[test]
    fn leaves_and_branches_follow_children() {
        let view = ViewTree::from(&sample());
        assert_eq!(
            view,
            ViewTree::Branch {
                label: "1".into(),
                nodes: vec![
                    ViewTree::Branch {
                        label: "2".into(),
                        nodes: vec![ViewTree::Leaf { label: "4".into() }],
                    },
                    ViewTree::Leaf { label: "3".into() },
                ],
            }
        );
    }

    #[test]
    fn display_draws_the_tree() {
        let view = ViewTree::from_node_with(&sample(), |value| format!("node {value}"));
        let rendered = view.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "node 1");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("node 2"));
        assert!(lines[2].ends_with("node 4"));
        assert!(lines[3].ends_with("node 3"));
    }

    #[test]
    fn forest_wraps_roots() {
        let roots = vec![TreeNode::leaf("a"), TreeNode::leaf("b")];
        let view = ViewTree::forest("roots", &roots, |value| value.render());
        assert_eq!(view.label(), "roots");
        match view {
            ViewTree::Branch { nodes, .. } => {
                let labels: Vec<&str> = nodes.iter().map(ViewTree::label).collect();
                assert_eq!(labels, vec!["a", "b"]);
            }
            ViewTree::Leaf { .. } => panic!("expected a branch"),
        }
    }

    #[test]
    fn serializes_with_serde() {
        let json = serde_json::to_string(&ViewTree::Leaf { label: "x".into() }).unwrap();
        assert_eq!(json, r#"{"Leaf":{"label":"x"}}"#);
    }
}
