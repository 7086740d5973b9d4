extern crate std;

use std::{collections::BTreeMap, prelude::v1::*};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{LlrbMap, LlrbTree, Node};

/// Returns the elements of `tree` in order.
pub fn in_order<T: Clone>(tree: &LlrbTree<T>) -> Vec<T> {
    fn walk<T: Clone>(node: Option<&Node<T>>, out: &mut Vec<T>) {
        if let Some(node) = node {
            walk(node.left(), out);
            out.push(node.item().clone());
            walk(node.right(), out);
        }
    }

    let mut out = Vec::with_capacity(tree.len());
    walk(tree.root(), &mut out);
    out
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

impl ItemValue {
    // Indexes pick one of the keys already present so that hits are frequent.
    fn resolve(self, keys: &[u32]) -> u32 {
        match self {
            ItemValue::Index(idx) => {
                if keys.is_empty() {
                    idx as u32
                } else {
                    keys[idx % keys.len()]
                }
            }
            ItemValue::Random(v) => v,
        }
    }
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    InsertNoReplace(ItemValue),
    Get(ItemValue),
    Delete(ItemValue),
    Min,
    DeleteMin,
    Max,
    DeleteMax,
}

impl Op {
    fn finalize(self, keys: &[u32]) -> FinalOp {
        match self {
            Op::Insert(item) => FinalOp::Insert(item.resolve(keys)),
            Op::InsertNoReplace(item) => FinalOp::InsertNoReplace(item.resolve(keys)),
            Op::Get(item) => FinalOp::Get(item.resolve(keys)),
            Op::Delete(item) => FinalOp::Delete(item.resolve(keys)),
            Op::Min => FinalOp::Min,
            Op::DeleteMin => FinalOp::DeleteMin,
            Op::Max => FinalOp::Max,
            Op::DeleteMax => FinalOp::DeleteMax,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    InsertNoReplace(u32),
    Get(u32),
    Delete(u32),
    Min,
    DeleteMin,
    Max,
    DeleteMax,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::InsertNoReplace),
        value_strategy().prop_map(Op::Get),
        value_strategy().prop_map(Op::Delete),
        Just(Op::Min),
        Just(Op::DeleteMin),
        Just(Op::Max),
        Just(Op::DeleteMax),
    ]
}

/// Runs `ops` against a tree and a `BTreeMap` multiset, asserting that both agree after every
/// step and that the tree invariants hold throughout.
pub fn run_multiset_equivalence(ops: Vec<Op>) {
    let mut multiset: BTreeMap<u32, usize> = BTreeMap::new();
    let mut tree: LlrbTree<u32> = LlrbTree::new();

    fn take_one(m: &mut BTreeMap<u32, usize>, key: u32) -> Option<u32> {
        let n = m.get_mut(&key)?;
        *n -= 1;
        if *n == 0 {
            m.remove(&key);
        }
        Some(key)
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let keys: Vec<u32> = multiset.keys().copied().collect();
        let final_op = op.finalize(&keys);

        match final_op {
            FinalOp::Insert(value) => {
                let from_model = if multiset.contains_key(&value) {
                    Some(value)
                } else {
                    multiset.insert(value, 1);
                    None
                };
                let from_tree = tree.replace_or_insert(value);

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::InsertNoReplace(value) => {
                *multiset.entry(value).or_insert(0) += 1;
                tree.insert_no_replace(value);
            }

            FinalOp::Get(value) => {
                let from_model = multiset.contains_key(&value).then_some(value);
                let from_tree = tree.get(&value).copied();

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
                assert_eq!(from_model.is_some(), tree.has(&value));
            }

            FinalOp::Delete(value) => {
                let from_model = take_one(&mut multiset, value);
                let from_tree = tree.delete(&value);

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Min => {
                let from_model = multiset.keys().next();
                let from_tree = tree.min();

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::DeleteMin => {
                let first = multiset.keys().next().copied();
                let from_model = first.and_then(|key| take_one(&mut multiset, key));
                let from_tree = tree.delete_min();

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Max => {
                let from_model = multiset.keys().next_back();
                let from_tree = tree.max();

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::DeleteMax => {
                let last = multiset.keys().next_back().copied();
                let from_model = last.and_then(|key| take_one(&mut multiset, key));
                let from_tree = tree.delete_max();

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }
        }

        tree.assert_invariants();
        assert_eq!(multiset.values().sum::<usize>(), tree.len());

        let expected: Vec<u32> = multiset
            .iter()
            .flat_map(|(&key, &n)| std::iter::repeat(key).take(n))
            .collect();
        assert_eq!(expected, in_order(&tree), "FinalOp #{op_id}: {final_op:?}");
    }
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum MapOp {
    Insert(ItemValue, u32),
    Get(ItemValue),
    Remove(ItemValue),
    First,
    PopFirst,
    Last,
    PopLast,
}

pub fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    proptest::prop_oneof![
        (value_strategy(), 0u32..1000).prop_map(|(k, v)| MapOp::Insert(k, v)),
        value_strategy().prop_map(MapOp::Get),
        value_strategy().prop_map(MapOp::Remove),
        Just(MapOp::First),
        Just(MapOp::PopFirst),
        Just(MapOp::Last),
        Just(MapOp::PopLast),
    ]
}

/// Runs `ops` against an [`LlrbMap`] and a `BTreeMap`, asserting that both agree.
pub fn run_map_equivalence(ops: Vec<MapOp>) {
    let mut btree: BTreeMap<u32, u32> = BTreeMap::new();
    let mut llrb: LlrbMap<u32, u32> = LlrbMap::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        let keys: Vec<u32> = btree.keys().copied().collect();

        match op {
            MapOp::Insert(key, value) => {
                let key = key.resolve(&keys);
                assert_eq!(
                    btree.insert(key, value),
                    llrb.insert(key, value),
                    "MapOp #{op_id}: {op:?}"
                );
            }

            MapOp::Get(key) => {
                let key = key.resolve(&keys);
                assert_eq!(btree.get(&key), llrb.get(&key), "MapOp #{op_id}: {op:?}");
            }

            MapOp::Remove(key) => {
                let key = key.resolve(&keys);
                assert_eq!(
                    btree.remove(&key),
                    llrb.remove(&key),
                    "MapOp #{op_id}: {op:?}"
                );
            }

            MapOp::First => {
                assert_eq!(
                    btree.first_key_value(),
                    llrb.first_key_value(),
                    "MapOp #{op_id}: {op:?}"
                );
            }

            MapOp::PopFirst => {
                assert_eq!(btree.pop_first(), llrb.pop_first(), "MapOp #{op_id}: {op:?}");
            }

            MapOp::Last => {
                assert_eq!(
                    btree.last_key_value(),
                    llrb.last_key_value(),
                    "MapOp #{op_id}: {op:?}"
                );
            }

            MapOp::PopLast => {
                assert_eq!(btree.pop_last(), llrb.pop_last(), "MapOp #{op_id}: {op:?}");
            }
        }

        llrb.assert_invariants();
        assert_eq!(btree.len(), llrb.len());
    }

    // Drain both to compare the full contents.
    while let Some(from_btree) = btree.pop_first() {
        assert_eq!(Some(from_btree), llrb.pop_first());
    }
    assert!(llrb.is_empty());
}
