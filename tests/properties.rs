//! Property tests for the containers and the top-k selector.

use std::collections::HashMap;

use proptest::prelude::*;
use webrank::{top_k_sort, ArrayHeap, ChainedHashMap, ChainedHashSet, DoubleLinkedList, Error};

#[derive(Debug, Clone)]
enum HeapOp {
    Insert(i32),
    RemoveMin,
}

fn heap_op_strategy() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        3 => any::<i32>().prop_map(HeapOp::Insert),
        1 => Just(HeapOp::RemoveMin),
    ]
}

proptest! {
    /// Property: len equals the number of distinct keys, and get returns the last put
    #[test]
    fn prop_map_matches_std_hashmap(pairs in prop::collection::vec((0u16..64, any::<i64>()), 0..300)) {
        let mut map = ChainedHashMap::<u16, i64>::new();
        let mut model = HashMap::new();
        for (k, v) in &pairs {
            prop_assert_eq!(map.put(*k, *v), model.insert(*k, *v));
        }
        prop_assert_eq!(map.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Ok(v));
        }
        prop_assert_eq!(map.iter().count(), model.len());
    }

    /// Property: removing a present key shrinks len by one; removing it again fails
    #[test]
    fn prop_map_remove_present_key(keys in prop::collection::hash_set(any::<u32>(), 1..200), pick in any::<prop::sample::Index>()) {
        let keys: Vec<u32> = keys.into_iter().collect();
        let mut map: ChainedHashMap<u32, u32> = keys.iter().map(|k| (*k, k.wrapping_mul(3))).collect();
        let victim = keys[pick.index(keys.len())];

        let before = map.len();
        prop_assert_eq!(map.remove(&victim), Ok(victim.wrapping_mul(3)));
        prop_assert_eq!(map.len(), before - 1);
        prop_assert!(!map.contains_key(&victim));
        prop_assert_eq!(map.remove(&victim), Err(Error::KeyNotFound));
        for k in keys.iter().filter(|k| **k != victim) {
            prop_assert!(map.contains_key(k));
        }
    }

    /// Property: a set holds every added element exactly once
    #[test]
    fn prop_set_deduplicates(items in prop::collection::vec(0u8..50, 0..200)) {
        let set: ChainedHashSet<u8> = items.iter().copied().collect();
        let mut seen: Vec<u8> = set.iter().copied().collect();
        seen.sort_unstable();
        let mut expected = items.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(seen, expected);
    }

    /// Property: remove_min never returns something larger than what remains
    #[test]
    fn prop_heap_remove_min_is_minimum(ops in prop::collection::vec(heap_op_strategy(), 0..200)) {
        let mut heap = ArrayHeap::new();
        let mut model: Vec<i32> = Vec::new();
        for op in ops {
            match op {
                HeapOp::Insert(x) => {
                    heap.insert(x).unwrap();
                    model.push(x);
                }
                HeapOp::RemoveMin => match heap.remove_min() {
                    Ok(min) => {
                        let pos = model.iter().position(|x| *x == min).unwrap();
                        model.swap_remove(pos);
                        prop_assert!(model.iter().all(|x| min <= *x));
                    }
                    Err(e) => {
                        prop_assert_eq!(e, Error::EmptyContainer);
                        prop_assert!(model.is_empty());
                    }
                },
            }
            prop_assert_eq!(heap.len(), model.len());
        }
    }

    /// Property: top_k_sort returns the k largest, ascending, and leaves input untouched
    #[test]
    fn prop_top_k_matches_sorted_suffix(input in prop::collection::vec(any::<i32>(), 0..150), k in 0usize..200) {
        let snapshot = input.clone();
        let top: Vec<i32> = top_k_sort(k, &input).unwrap().into_iter().collect();

        let mut sorted = input.clone();
        sorted.sort_unstable();
        let take = k.min(sorted.len());
        prop_assert_eq!(&top[..], &sorted[sorted.len() - take..]);
        prop_assert_eq!(input, snapshot);
    }

    /// Property: delete(i) exactly undoes insert(i, x)
    #[test]
    fn prop_list_delete_inverts_insert(items in prop::collection::vec(any::<i16>(), 0..60), x in any::<i16>(), at in any::<prop::sample::Index>()) {
        let mut list: DoubleLinkedList<i16> = items.iter().copied().collect();
        let index = at.index(items.len() + 1);

        list.insert(index, x).unwrap();
        prop_assert_eq!(list.len(), items.len() + 1);
        prop_assert_eq!(list.get(index), Ok(&x));

        prop_assert_eq!(list.delete(index), Ok(x));
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), items);
    }

    /// Property: get(i) agrees with a Vec for every index, from either end
    #[test]
    fn prop_list_get_matches_vec(items in prop::collection::vec(any::<u8>(), 0..80)) {
        let list: DoubleLinkedList<u8> = items.iter().copied().collect();
        for (i, item) in items.iter().enumerate() {
            prop_assert_eq!(list.get(i), Ok(item));
        }
        prop_assert_eq!(
            list.get(items.len()),
            Err(Error::IndexOutOfRange { index: items.len(), len: items.len() })
        );
        let reversed: Vec<u8> = list.iter().rev().copied().collect();
        prop_assert_eq!(reversed, items.iter().rev().copied().collect::<Vec<_>>());
    }
}
