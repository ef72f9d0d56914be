use heapmap::HeapMap;

fn main() {
    // Capacity 5 leaves room for 4 keys
    let heap: HeapMap = HeapMap::new(5);

    heap.insert("a".to_string(), 3).unwrap();
    heap.insert("b".to_string(), 5).unwrap();
    heap.insert("a".to_string(), 2).unwrap();

    println!("priority(a) = {:?}", heap.priority("a"));
    println!("top = {}", heap.top().unwrap());

    let top: Vec<String> = heap.top_nodes(2).iter().map(|e| e.to_string()).collect();
    println!("top 2 = {}", top.join(" "));

    heap.insert("c".to_string(), 1).unwrap();
    heap.insert("d".to_string(), 1).unwrap();
    match heap.insert("e".to_string(), 1) {
        Ok(()) => println!("inserted e"),
        Err(err) => println!("insert e failed: {}", err),
    }
}

// Expected output:
// priority(a) = Ok(5)
// top = (b, 5)
// top 2 = (b, 5) (a, 5)
// insert e failed: heap full (capacity 5)
//
// Explanation: "a" accumulates 3 + 2; on the tie with "b" the newer key ranks
// first. The fifth distinct key does not fit.
