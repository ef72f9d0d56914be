use std::thread;

use heapmap::builder::HeapMapBuilder;
use heapmap::{HeapMap, HeapMapError};

const FEEDS: [&str; 3] = [
    "rust heap lock rust tokio rust heap",
    "lock free heap rust arena rust",
    "heap heap priority heap lock",
];

fn main() {
    let terms: HeapMap<String, u32> = HeapMapBuilder::new(8).build();

    let workers: Vec<_> = FEEDS
        .iter()
        .map(|feed| {
            let terms = terms.clone();
            thread::spawn(move || {
                let mut dropped = 0;
                for word in feed.split_whitespace() {
                    match terms.insert(word.to_string(), 1) {
                        Ok(()) => {},
                        Err(HeapMapError::HeapFull { .. }) => dropped += 1,
                        Err(err) => panic!("unexpected error: {}", err),
                    }
                }
                dropped
            })
        })
        .collect();

    let dropped: usize = workers.into_iter().map(|w| w.join().unwrap_or(0)).sum();

    for (rank, entry) in terms.top_nodes(3).iter().enumerate() {
        println!("#{} {}", rank + 1, entry);
    }
    println!("distinct terms: {}, dropped: {}", terms.len(), dropped);
}

// Expected output:
// #1 (heap, 6)
// #2 (rust, 5)
// #3 (lock, 3)
// distinct terms: 7, dropped: 0
//
// Explanation: capacity 8 holds 7 distinct terms, exactly what the feeds use.
