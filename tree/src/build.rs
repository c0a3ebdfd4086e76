use std::hash::Hash;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::{TreeError, TreeNode};

/// Build every tree rooted at a record whose parent id equals `parent`.
///
/// Roots and children keep the order of `records`. Each call rescans the
/// whole slice, so this is quadratic in the number of records; see
/// [`build_forest_indexed`] for larger inputs.
///
/// Records must not form parent cycles (including a record that is its own
/// parent): such input recurses without bound. Ids are not required to be
/// unique; a duplicated id attaches its children under every record that
/// carries it.
pub fn build_forest<R, K, T, I, P, V>(
    records: &[R],
    parent: &K,
    id_of: I,
    parent_id_of: P,
    to_value: V,
) -> Vec<TreeNode<T>>
where
    K: PartialEq,
    I: Fn(&R) -> K,
    P: Fn(&R) -> K,
    V: Fn(&R) -> T,
{
    fn build<R, K, T, I, P, V>(
        records: &[R],
        parent: &K,
        id_of: &I,
        parent_id_of: &P,
        to_value: &V,
    ) -> Vec<TreeNode<T>>
    where
        K: PartialEq,
        I: Fn(&R) -> K,
        P: Fn(&R) -> K,
        V: Fn(&R) -> T,
    {
        records
            .iter()
            .filter(|&record| parent_id_of(record) == *parent)
            .map(|record| TreeNode {
                value: to_value(record),
                children: build(records, &id_of(record), id_of, parent_id_of, to_value),
            })
            .collect()
    }

    let forest = build(records, parent, &id_of, &parent_id_of, &to_value);
    debug!(records = records.len(), roots = forest.len(), "built forest");
    forest
}

/// Build the first tree rooted at a record whose parent id equals `parent`.
///
/// Additional roots are dropped; use [`build_forest`] when several roots are
/// legitimate.
pub fn build_tree<R, K, T, I, P, V>(
    records: &[R],
    parent: &K,
    id_of: I,
    parent_id_of: P,
    to_value: V,
) -> Result<TreeNode<T>, TreeError>
where
    K: PartialEq,
    I: Fn(&R) -> K,
    P: Fn(&R) -> K,
    V: Fn(&R) -> T,
{
    first_root(build_forest(records, parent, id_of, parent_id_of, to_value))
}

/// Same output as [`build_forest`], computed from a one-pass index of
/// records by parent id.
pub fn build_forest_indexed<R, K, T, I, P, V>(
    records: &[R],
    parent: &K,
    id_of: I,
    parent_id_of: P,
    to_value: V,
) -> Vec<TreeNode<T>>
where
    K: Hash + Eq,
    I: Fn(&R) -> K,
    P: Fn(&R) -> K,
    V: Fn(&R) -> T,
{
    let index = ParentIndex::new(records, &id_of, &parent_id_of);
    let forest = index.build(parent, &to_value);
    debug!(records = records.len(), roots = forest.len(), "built indexed forest");
    forest
}

pub fn build_tree_indexed<R, K, T, I, P, V>(
    records: &[R],
    parent: &K,
    id_of: I,
    parent_id_of: P,
    to_value: V,
) -> Result<TreeNode<T>, TreeError>
where
    K: Hash + Eq,
    I: Fn(&R) -> K,
    P: Fn(&R) -> K,
    V: Fn(&R) -> T,
{
    first_root(build_forest_indexed(
        records,
        parent,
        id_of,
        parent_id_of,
        to_value,
    ))
}

fn first_root<T>(forest: Vec<TreeNode<T>>) -> Result<TreeNode<T>, TreeError> {
    if forest.len() > 1 {
        debug!(ignored = forest.len() - 1, "dropping extra roots");
    }
    forest.into_iter().next().ok_or(TreeError::NoRoot)
}

/// Records grouped by parent id, in input order, with each record's own id.
struct ParentIndex<'r, R, K> {
    children: IndexMap<K, Vec<(&'r R, K)>>,
}

impl<'r, R, K> ParentIndex<'r, R, K>
where
    K: Hash + Eq,
{
    fn new<I, P>(records: &'r [R], id_of: &I, parent_id_of: &P) -> Self
    where
        I: Fn(&R) -> K,
        P: Fn(&R) -> K,
    {
        let mut children: IndexMap<K, Vec<(&'r R, K)>> = IndexMap::new();
        let mut seen: IndexMap<K, usize> = IndexMap::new();
        for record in records {
            *seen.entry(id_of(record)).or_default() += 1;
            children
                .entry(parent_id_of(record))
                .or_default()
                .push((record, id_of(record)));
        }

        let duplicates = seen.values().filter(|count| **count > 1).count();
        if duplicates > 0 {
            warn!(duplicates, "records share ids; their children will be attached more than once");
        }
        trace!(parents = children.len(), "indexed records by parent id");

        Self { children }
    }

    fn build<T, V>(&self, parent: &K, to_value: &V) -> Vec<TreeNode<T>>
    where
        V: Fn(&R) -> T,
    {
        let Some(children) = self.children.get(parent) else {
            return Vec::new();
        };
        children
            .iter()
            .map(|(record, id)| TreeNode {
                value: to_value(*record),
                children: self.build(id, to_value),
            })
            .collect()
    }
}
