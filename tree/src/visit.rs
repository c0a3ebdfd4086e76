use crate::TreeNode;

/// Visits whole nodes, along with the nodes on the path from the root.
///
/// `ancestors` runs from the root down to the immediate parent and is empty
/// for the root. `index` is the node's position among its siblings (0 for
/// the root).
pub trait NodeVisitor<'t, T> {
    fn visit_node(&mut self, node: &'t TreeNode<T>, ancestors: &[&'t TreeNode<T>], index: usize);
}

/// Visits bare values, along with the values on the path from the root.
pub trait ValueVisitor<'t, T> {
    fn visit_value(&mut self, value: &'t T, ancestors: &[&'t T], index: usize);
}

impl<'t, T, F> NodeVisitor<'t, T> for F
where
    F: FnMut(&'t TreeNode<T>, &[&'t TreeNode<T>], usize),
{
    fn visit_node(&mut self, node: &'t TreeNode<T>, ancestors: &[&'t TreeNode<T>], index: usize) {
        self(node, ancestors, index)
    }
}

impl<'t, T, F> ValueVisitor<'t, T> for F
where
    F: FnMut(&'t T, &[&'t T], usize),
{
    fn visit_value(&mut self, value: &'t T, ancestors: &[&'t T], index: usize) {
        self(value, ancestors, index)
    }
}

/// A visitor tagged with the shape it wants to see.
pub enum Visitor<'v, 't, T> {
    Node(&'v mut dyn NodeVisitor<'t, T>),
    Value(&'v mut dyn ValueVisitor<'t, T>),
}

/// Pre-order walk of `root`, dispatching on the visitor's shape once.
pub fn visit<'t, T>(root: &'t TreeNode<T>, visitor: Visitor<'_, 't, T>) {
    match visitor {
        Visitor::Node(visitor) => visit_nodes(root, visitor),
        Visitor::Value(visitor) => visit_values(root, visitor),
    }
}

/// Pre-order walk of `root`, handing each node to `visitor`.
///
/// Every reachable node is visited; there is no early exit. Children are
/// visited in stored order, after their parent.
pub fn visit_nodes<'t, T, V>(root: &'t TreeNode<T>, visitor: &mut V)
where
    V: NodeVisitor<'t, T> + ?Sized,
{
    fn walk<'t, T, V>(
        node: &'t TreeNode<T>,
        ancestors: &mut Vec<&'t TreeNode<T>>,
        index: usize,
        visitor: &mut V,
    ) where
        V: NodeVisitor<'t, T> + ?Sized,
    {
        visitor.visit_node(node, ancestors, index);

        ancestors.push(node);
        for (index, child) in node.children.iter().enumerate() {
            walk(child, ancestors, index, visitor);
        }
        ancestors.pop();
    }

    walk(root, &mut Vec::new(), 0, visitor);
}

/// Pre-order walk of `root`, handing each value to `visitor`.
pub fn visit_values<'t, T, V>(root: &'t TreeNode<T>, visitor: &mut V)
where
    V: ValueVisitor<'t, T> + ?Sized,
{
    fn walk<'t, T, V>(node: &'t TreeNode<T>, ancestors: &mut Vec<&'t T>, index: usize, visitor: &mut V)
    where
        V: ValueVisitor<'t, T> + ?Sized,
    {
        visitor.visit_value(&node.value, ancestors, index);

        ancestors.push(&node.value);
        for (index, child) in node.children.iter().enumerate() {
            walk(child, ancestors, index, visitor);
        }
        ancestors.pop();
    }

    walk(root, &mut Vec::new(), 0, visitor);
}
