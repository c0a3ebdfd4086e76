use std::fmt;

use crate::{TreeNode, ValueVisitor, visit_values};

/// An ancestor's value together with the state its own transform produced.
pub struct Ancestor<'a, T, S> {
    pub value: &'a T,
    pub state: &'a S,
}

impl<T, S> fmt::Debug for Ancestor<'_, T, S>
where
    T: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ancestor")
            .field("value", self.value)
            .field("state", self.state)
            .finish()
    }
}

impl<T, S> Clone for Ancestor<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for Ancestor<'_, T, S> {}

struct Flatten<F, K> {
    transform: F,
    output: Vec<K>,
}

impl<'t, T, K, F> ValueVisitor<'t, T> for Flatten<F, K>
where
    F: FnMut(&T, &[&T], usize) -> K,
{
    fn visit_value(&mut self, value: &'t T, ancestors: &[&'t T], index: usize) {
        self.output.push((self.transform)(value, ancestors, index));
    }
}

/// Transform every value in pre-order and collect the results.
///
/// `transform` receives the value, the ancestor values from the root down to
/// the parent, and the value's index among its siblings.
pub fn flatten<T, K, F>(root: &TreeNode<T>, transform: F) -> Vec<K>
where
    F: FnMut(&T, &[&T], usize) -> K,
{
    let mut flatten = Flatten {
        transform,
        output: Vec::new(),
    };
    visit_values(root, &mut flatten);
    flatten.output
}

struct FlattenWith<F, S, K> {
    transform: F,
    // State of the most recent node seen at each depth; in pre-order the
    // first `ancestors.len()` entries always belong to the current path.
    states: Vec<S>,
    output: Vec<K>,
}

impl<'t, T, S, K, F> ValueVisitor<'t, T> for FlattenWith<F, S, K>
where
    F: FnMut(&T, &[Ancestor<'_, T, S>], usize) -> (S, K),
{
    fn visit_value(&mut self, value: &'t T, ancestors: &[&'t T], index: usize) {
        self.states.truncate(ancestors.len());
        let chain: Vec<Ancestor<'_, T, S>> = ancestors
            .iter()
            .zip(&self.states)
            .map(|(value, state)| Ancestor {
                value: *value,
                state,
            })
            .collect();
        let (state, output) = (self.transform)(value, &chain, index);
        self.states.push(state);
        self.output.push(output);
    }
}

/// Like [`flatten`], but each transform also returns a state that is handed
/// to every descendant through its ancestor chain.
///
/// Transforms run strictly in pre-order, so a node always sees the states
/// its ancestors' own transforms returned. Renumbering is the typical use:
/// the state is the node's new id and a child reads its new parent id from
/// `ancestors.last()`.
pub fn flatten_with<T, S, K, F>(root: &TreeNode<T>, transform: F) -> Vec<K>
where
    F: FnMut(&T, &[Ancestor<'_, T, S>], usize) -> (S, K),
{
    let mut flatten = FlattenWith {
        transform,
        states: Vec::new(),
        output: Vec::new(),
    };
    visit_values(root, &mut flatten);
    flatten.output
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::build_tree;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Record {
        id: u32,
        parent_id: Option<u32>,
        name: &'static str,
    }

    fn record(id: u32, parent_id: Option<u32>, name: &'static str) -> Record {
        Record {
            id,
            parent_id,
            name,
        }
    }

    fn records() -> Vec<Record> {
        vec![
            record(1, None, "root"),
            record(2, Some(1), "child 1"),
            record(3, Some(1), "child 2"),
            record(4, Some(2), "child 1.1"),
            record(5, Some(2), "child 1.2"),
            record(6, Some(3), "child 2.1"),
            record(9, Some(4), "child 1.1.2"),
            record(8, Some(4), "child 1.1.1"),
        ]
    }

    fn tree() -> TreeNode<Record> {
        build_tree(&records(), &None, |r| Some(r.id), |r| r.parent_id, Record::clone).unwrap()
    }

    #[test]
    fn identity_flatten_returns_every_record_in_pre_order() {
        let flat = flatten(&tree(), |value, _, _| value.clone());
        let ids: Vec<u32> = flat.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 9, 8, 5, 3, 6]);

        let mut flat = flat;
        let mut expected = records();
        flat.sort_by_key(|r| r.id);
        expected.sort_by_key(|r| r.id);
        assert_eq!(flat, expected);
    }

    #[test]
    fn flatten_sees_ancestors_and_index() {
        let flat = flatten(&tree(), |value, ancestors, index| {
            let path: Vec<&str> = ancestors.iter().map(|a| a.name).collect();
            (value.id, path.join("/"), index)
        });
        assert_eq!(flat[0], (1, String::new(), 0));
        assert_eq!(flat[1], (2, "root".to_string(), 0));
        assert_eq!(flat[3], (9, "root/child 1/child 1.1".to_string(), 0));
        assert_eq!(flat[4], (8, "root/child 1/child 1.1".to_string(), 1));
        assert_eq!(flat[6], (3, "root".to_string(), 1));
    }

    #[test]
    fn flatten_of_leaf() {
        let flat = flatten(&TreeNode::leaf(5), |value, ancestors, index| {
            (*value, ancestors.len(), index)
        });
        assert_eq!(flat, vec![(5, 0, 0)]);
    }

    #[test]
    fn flatten_can_collect_errors() {
        let result: Result<Vec<u32>, String> = flatten(&tree(), |value, _, _| {
            if value.id == 9 {
                Err(format!("bad record {}", value.id))
            } else {
                Ok(value.id)
            }
        })
        .into_iter()
        .collect();
        assert_eq!(result, Err("bad record 9".to_string()));
    }

    #[test]
    fn children_read_the_new_id_their_parent_computed() {
        let mut next_id = 100;
        let flat = flatten_with(&tree(), |value, ancestors: &[Ancestor<'_, Record, u32>], _| {
            next_id += 1;
            let new_parent_id = ancestors.last().map(|parent| *parent.state);
            (next_id, (value.id, next_id, new_parent_id))
        });

        let new_ids: HashMap<u32, u32> = flat.iter().map(|(old, new, _)| (*old, *new)).collect();
        for (old_id, _, new_parent_id) in &flat {
            let old_parent_id = records()
                .into_iter()
                .find(|r| r.id == *old_id)
                .and_then(|r| r.parent_id);
            assert_eq!(*new_parent_id, old_parent_id.map(|id| new_ids[&id]));
        }

        assert_eq!(flat[0], (1, 101, None));
        assert_eq!(flat[1], (2, 102, Some(101)));
        assert_eq!(flat[2], (4, 103, Some(102)));
        assert_eq!(flat[5], (5, 106, Some(102)));
        assert_eq!(flat[6], (3, 107, Some(101)));
        assert_eq!(flat[7], (6, 108, Some(107)));
    }

    #[test]
    fn siblings_do_not_see_each_others_state() {
        let flat = flatten_with(&tree(), |value, ancestors: &[Ancestor<'_, Record, String>], _| {
            let path = match ancestors.last() {
                Some(parent) => format!("{}/{}", parent.state, value.id),
                None => value.id.to_string(),
            };
            let depth = ancestors.len();
            (path.clone(), (path, depth))
        });
        let paths: Vec<&str> = flat.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["1", "1/2", "1/2/4", "1/2/4/9", "1/2/4/8", "1/2/5", "1/3", "1/3/6"]
        );
        assert!(flat.iter().all(|(path, depth)| path.matches('/').count() == *depth));
    }

    #[test]
    fn ancestor_values_come_with_state() {
        let flat = flatten_with(&tree(), |value, ancestors: &[Ancestor<'_, Record, usize>], index| {
            let chain: Vec<(u32, usize)> = ancestors
                .iter()
                .map(|ancestor| (ancestor.value.id, *ancestor.state))
                .collect();
            (index, (value.id, chain))
        });
        assert_eq!(flat[4], (8, vec![(1, 0), (2, 0), (4, 0)]));
        assert_eq!(flat[7], (6, vec![(1, 0), (3, 1)]));
    }
}
