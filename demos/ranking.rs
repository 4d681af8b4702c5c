use tracing_subscriber::EnvFilter;
use webrank::{top_k_sort, Corpus, DoubleLinkedList, PageRankAnalyzer, PageRankConfig, TfIdfAnalyzer, Webpage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("webrank=info".parse()?))
        .init();

    let corpus: Corpus = [
        ("https://a.example/rust", "rust ownership borrow checker traits rust", vec!["https://a.example/go"]),
        ("https://a.example/go", "go goroutines channels garbage collector", vec!["https://a.example/rust", "https://a.example/java"]),
        ("https://a.example/java", "java jvm garbage collector classes", vec!["https://a.example/rust"]),
        ("https://a.example/zig", "zig comptime allocators", vec!["https://elsewhere.example/"]),
    ]
    .into_iter()
    .map(|(uri, text, links)| {
        Webpage::new(
            uri.to_string(),
            text.split_whitespace(),
            links.into_iter().map(str::to_string),
        )
    })
    .collect();

    let mut tfidf = TfIdfAnalyzer::new(&corpus)?;
    let page_rank = PageRankAnalyzer::with_config(&corpus, &PageRankConfig::default())?;
    println!(
        "page rank: {} iterations, converged = {}",
        page_rank.iterations(),
        page_rank.converged()
    );

    // relevance × page rank で並べる
    let query: DoubleLinkedList<String> = "garbage collector rust"
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let mut scored = Vec::new();
    for page in &corpus {
        let relevance = tfidf.compute_relevance(&query, page.uri())?;
        let rank = page_rank.compute_page_rank(page.uri())?;
        scored.push((relevance * rank, page.uri().clone()));
    }

    let best = top_k_sort(3, &scored)?;
    for (score, uri) in best.iter().rev() {
        println!("{:.6}  {}", score, uri);
    }

    Ok(())
}
