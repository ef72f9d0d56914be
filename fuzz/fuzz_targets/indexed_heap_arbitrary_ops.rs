#![no_main]

use heapmap::{HeapMapError, IndexedMaxHeap, TieBreak};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on IndexedMaxHeap
//
// Byte layout:
// - data[0]: capacity (0..=63)
// - data[1]: tie-break (even = newest first, odd = oldest first)
// - then 3-byte chunks: [op, key, delta]
//
// Checks after every operation:
// - heap invariants hold
// - len never exceeds max_len
// - priorities match a naive model
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 64);
    let tie_break = if data[1] % 2 == 0 {
        TieBreak::NewestFirst
    } else {
        TieBreak::OldestFirst
    };
    let mut heap: IndexedMaxHeap<u8, i16> = IndexedMaxHeap::with_tie_break(capacity, tie_break);
    let mut model: Vec<(u8, i16)> = Vec::new();

    for chunk in data[2..].chunks(3) {
        if chunk.len() < 3 {
            break;
        }
        let key = chunk[1] % 32;
        let delta = i16::from(chunk[2] as i8);

        match chunk[0] % 4 {
            0 | 1 => {
                let known = model.iter().position(|(k, _)| *k == key);
                let result = heap.insert(key, delta);
                match known {
                    Some(i) => {
                        assert!(result.is_ok());
                        model[i].1 = model[i].1.wrapping_add(delta);
                    },
                    None if model.len() == heap.max_len() => {
                        assert_eq!(result, Err(HeapMapError::HeapFull { capacity }));
                    },
                    None => {
                        assert!(result.is_ok());
                        model.push((key, delta));
                    },
                }
            },
            2 => {
                let n = usize::from(chunk[1] % 16);
                let top = heap.top_nodes(n);
                assert_eq!(top.len(), n.min(model.len()));
                for pair in top.windows(2) {
                    assert!(pair[0].priority() >= pair[1].priority());
                }
            },
            3 => {
                let expected = model.iter().find(|(k, _)| *k == key).map(|(_, p)| *p);
                assert_eq!(heap.priority(&key).ok(), expected);
                match heap.top() {
                    Ok(top) => {
                        let max = model.iter().map(|(_, p)| *p).max();
                        assert_eq!(Some(top.priority()), max);
                    },
                    Err(err) => {
                        assert_eq!(err, HeapMapError::Empty);
                        assert!(model.is_empty());
                    },
                }
            },
            _ => unreachable!(),
        }

        assert!(heap.check_invariants().is_ok());
        assert!(heap.len() <= heap.max_len());
        assert_eq!(heap.len(), model.len());
    }
});
