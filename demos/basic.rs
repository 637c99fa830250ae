use countmin_topk::{CountMinSketch, TopK};

fn main() -> Result<(), countmin_topk::Error> {
    // A sketch with 100 counters per row and 5 rows.
    let mut sketch = CountMinSketch::new(100, 5)?;
    for word in ["apple", "banana", "apple", "cherry", "banana", "banana"] {
        sketch.add(word);
    }
    println!("Estimated frequencies:");
    for word in ["apple", "banana", "cherry", "orange"] {
        println!("{}: {}", word, sketch.estimate(word));
    }

    // Track the 3 most frequent items; the sketch is sized from k.
    let mut topk = TopK::new(3)?;
    let stream = [
        ("frequent item", 5),
        ("less frequent item", 3),
        ("rare item", 1),
        ("newcomer", 2),
    ];
    for (item, count) in stream {
        for _ in 0..count {
            if let Some(evicted) = topk.add(item) {
                println!("'{}' evicted '{}'", item, evicted);
            }
        }
    }

    println!("\nTop items and their frequencies:");
    for node in topk.list() {
        println!("{}: {}", node.key, node.frequency);
    }

    let item = "frequent item";
    println!("\nCount for '{}': {}", item, topk.query(item));
    println!("Is '{}' in top-k? {}",
        item,
        if topk.contains(item) { "yes" } else { "no" });
    Ok(())
}
