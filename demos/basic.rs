use tracing_subscriber::EnvFilter;
use webrank::{top_k_sort, ArrayHeap, ChainedHashMap, ChainedHashSet, DoubleLinkedList};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=webrank=trace でresizeも見える
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("webrank=info".parse()?))
        .init();

    // word count
    let text = "rust is fast rust is safe rust is fun";
    let mut counts: ChainedHashMap<&str, usize> = ChainedHashMap::new();
    for word in text.split_whitespace() {
        let count = *counts.get_or(word, &0);
        counts.put(word, count + 1);
    }
    println!("counts: {:?} (table size {})", counts, counts.table_size());
    println!("rust -> {}", counts.get("rust")?);

    // set
    let unique: ChainedHashSet<&str> = text.split_whitespace().collect();
    println!("unique words: {}", unique.len());

    // list
    let mut list: DoubleLinkedList<&str> = ["b", "d"].into_iter().collect();
    list.insert(0, "a")?;
    list.insert(2, "c")?;
    list.add("e");
    println!("list: {:?}, index_of(c) = {:?}", list, list.index_of(&"c"));
    println!("deleted {}", list.delete(1)?);

    // heap
    let mut heap = ArrayHeap::try_from_iter([0.7, 0.1, 0.4, 0.9])?;
    heap.insert(0.05)?;
    println!("min = {}", heap.remove_min()?);
    if let Err(e) = heap.insert(f64::NAN) {
        println!("rejected: {}", e);
    }

    // top-k
    let scores = [3.2, 9.1, 0.4, 7.7, 5.0];
    println!("top 3: {:?}", top_k_sort(3, &scores)?);

    Ok(())
}
