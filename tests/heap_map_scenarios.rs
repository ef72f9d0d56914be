// ==============================================
// HEAP MAP BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end scenarios through the public API only.

use heapmap::prelude::*;

fn rendered(entries: &[Entry<String, i64>]) -> Vec<String> {
    entries.iter().map(ToString::to_string).collect()
}

// ==============================================
// Reference Scenarios
// ==============================================

mod reference {
    use super::*;

    #[test]
    fn accumulate_top_and_fill_to_capacity() {
        let heap: HeapMap = HeapMap::new(5);
        heap.insert("a".into(), 3).unwrap();
        heap.insert("b".into(), 5).unwrap();
        heap.insert("a".into(), 2).unwrap();

        assert_eq!(heap.priority("a"), Ok(5));
        assert_eq!(heap.top().unwrap().to_string(), "(b, 5)");
        assert_eq!(rendered(&heap.top_nodes(2)), ["(b, 5)", "(a, 5)"]);
        // Repeating the query gives the same answer
        assert_eq!(rendered(&heap.top_nodes(2)), ["(b, 5)", "(a, 5)"]);

        heap.insert("c".into(), 1).unwrap();
        heap.insert("d".into(), 1).unwrap();
        assert_eq!(heap.len(), 4);
        assert_eq!(
            heap.insert("e".into(), 1),
            Err(HeapMapError::HeapFull { capacity: 5 })
        );
        assert_eq!(heap.len(), 4);
        assert!(!heap.contains("e"));
    }

    #[test]
    fn empty_structure() {
        let heap: HeapMap = HeapMap::new(5);
        assert_eq!(heap.top(), Err(HeapMapError::Empty));
        assert!(heap.top_nodes(3).is_empty());
        assert_eq!(heap.priority("a"), Err(HeapMapError::KeyNotFound));
    }
}

// ==============================================
// Failed Operations Leave State Unchanged
// ==============================================

mod failures_are_side_effect_free {
    use super::*;

    #[test]
    fn heap_full_keeps_contents_and_order() {
        let heap: HeapMap = HeapMap::new(4);
        for (key, p) in [("x", 4), ("y", 9), ("z", 1)] {
            heap.insert(key.into(), p).unwrap();
        }
        let top_before = heap.top_nodes(3);
        // top_nodes may reshuffle the array, so snapshot the layout after it
        let layout_before = heap.entries();

        assert_eq!(
            heap.insert("w".into(), 100),
            Err(HeapMapError::HeapFull { capacity: 4 })
        );

        assert_eq!(heap.entries(), layout_before);
        assert_eq!(heap.top_nodes(3), top_before);
        assert!(!heap.contains("w"));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn top_nodes_keeps_contents_but_not_necessarily_layout() {
        let heap: HeapMap = HeapMap::new(4);
        for (key, p) in [("x", 4), ("y", 9), ("z", 1)] {
            heap.insert(key.into(), p).unwrap();
        }
        let mut before = rendered(&heap.entries());
        let _ = heap.top_nodes(3);
        let mut after = rendered(&heap.entries());

        before.sort();
        after.sort();
        assert_eq!(after, before);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn lookups_on_missing_keys_do_not_create_them() {
        let heap: HeapMap = HeapMap::new(4);
        assert!(heap.priority("ghost").is_err());
        assert!(heap.is_empty());
        heap.insert("ghost".into(), 0).unwrap();
        assert_eq!(heap.priority("ghost"), Ok(0));
    }
}

// ==============================================
// Top-K Ordering
// ==============================================

mod top_k {
    use super::*;

    #[test]
    fn top_nodes_is_sorted_and_bounded() {
        let heap: HeapMap<u32, i64> = HeapMap::new(1_001);
        for key in 0..1_000u32 {
            // Scrambled, heavily tied priorities
            heap.insert(key, i64::from((key * 7_919) % 101)).unwrap();
        }

        let top = heap.top_nodes(50);
        assert_eq!(top.len(), 50);
        assert!(top.windows(2).all(|w| w[0].priority() >= w[1].priority()));
        assert_eq!(top[0].priority(), 100);

        let all = heap.top_nodes(5_000);
        assert_eq!(all.len(), 1_000);
        assert_eq!(&all[..50], &top[..]);
        assert_eq!(heap.len(), 1_000);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn raising_a_buried_key_promotes_it() {
        let heap: HeapMap<u32, i64> = HeapMap::new(128);
        for key in 0..100u32 {
            heap.insert(key, 10).unwrap();
        }
        heap.insert(42, 1).unwrap();
        assert_eq!(heap.top().unwrap().into_parts(), (42, 11));
        heap.insert(42, -5).unwrap();
        assert_eq!(heap.top().unwrap().priority(), 10);
        assert!(heap.top_nodes(100).iter().all(|e| *e.key() != 42 || e.priority() == 6));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn oldest_first_ranks_earlier_keys_above_later_ties() {
        let heap: HeapMap<&str, u8> = HeapMapBuilder::new(8)
            .tie_break(TieBreak::OldestFirst)
            .build();
        for key in ["one", "two", "three"] {
            heap.insert(key, 1).unwrap();
        }
        let keys: Vec<&str> = heap.top_nodes(3).iter().map(|e| *e.key()).collect();
        assert_eq!(keys, ["one", "two", "three"]);
    }

    #[test]
    fn newest_first_ranks_later_keys_above_earlier_ties() {
        let heap: HeapMap<&str, u8> = HeapMapBuilder::new(8).build();
        for key in ["one", "two", "three"] {
            heap.insert(key, 1).unwrap();
        }
        let keys: Vec<&str> = heap.top_nodes(3).iter().map(|e| *e.key()).collect();
        assert_eq!(keys, ["three", "two", "one"]);
    }
}

// ==============================================
// Trait Object Usage
// ==============================================

mod trait_object {
    use std::sync::Arc;

    use super::*;

    fn bump_all(index: &dyn PriorityIndex<String, i64>, keys: &[&str]) -> Result<(), HeapMapError> {
        for key in keys {
            index.insert((*key).to_string(), 1)?;
        }
        Ok(())
    }

    #[test]
    fn errors_propagate_through_trait_object() {
        let index: Arc<dyn PriorityIndex<String, i64> + Send + Sync> =
            Arc::new(HeapMap::<String, i64>::new(3));
        assert_eq!(bump_all(index.as_ref(), &["a", "b", "a"]), Ok(()));
        assert_eq!(
            bump_all(index.as_ref(), &["c"]),
            Err(HeapMapError::HeapFull { capacity: 3 })
        );
        assert_eq!(index.priority(&"a".to_string()), Ok(2));
        assert_eq!(index.len(), 2);
    }
}
