use crate::{NodeVisitor, TreeNode, ValueVisitor, visit_nodes, visit_values};

struct FindNodes<'t, T, P> {
    predicate: P,
    found: Vec<&'t TreeNode<T>>,
}

impl<'t, T, P> NodeVisitor<'t, T> for FindNodes<'t, T, P>
where
    P: FnMut(&T) -> bool,
{
    fn visit_node(&mut self, node: &'t TreeNode<T>, _ancestors: &[&'t TreeNode<T>], _index: usize) {
        if (self.predicate)(&node.value) {
            self.found.push(node);
        }
    }
}

struct FindValues<'t, T, P> {
    predicate: P,
    found: Vec<&'t T>,
}

impl<'t, T, P> ValueVisitor<'t, T> for FindValues<'t, T, P>
where
    P: FnMut(&T) -> bool,
{
    fn visit_value(&mut self, value: &'t T, _ancestors: &[&'t T], _index: usize) {
        if (self.predicate)(value) {
            self.found.push(value);
        }
    }
}

/// Every node (root included) whose value matches, in pre-order.
pub fn find_nodes<T, P>(root: &TreeNode<T>, predicate: P) -> Vec<&TreeNode<T>>
where
    P: FnMut(&T) -> bool,
{
    let mut find = FindNodes {
        predicate,
        found: Vec::new(),
    };
    visit_nodes(root, &mut find);
    find.found
}

/// Every value (root included) that matches, in pre-order.
pub fn find_values<T, P>(root: &TreeNode<T>, predicate: P) -> Vec<&T>
where
    P: FnMut(&T) -> bool,
{
    let mut find = FindValues {
        predicate,
        found: Vec::new(),
    };
    visit_values(root, &mut find);
    find.found
}

/// Number of strict descendants of `root`.
pub fn count_children<T>(root: &TreeNode<T>) -> usize {
    count_children_by(root, |_| true)
}

/// Number of strict descendants of `root` reachable through matching nodes.
///
/// A child that fails `filter` is not counted and neither is anything below
/// it, even descendants that would match.
pub fn count_children_by<T, F>(root: &TreeNode<T>, mut filter: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    fn count<T, F>(node: &TreeNode<T>, filter: &mut F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut total = 0;
        for child in &node.children {
            if filter(&child.value) {
                total += 1 + count(child, filter);
            }
        }
        total
    }

    count(root, &mut filter)
}
