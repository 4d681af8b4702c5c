//! Scenario tests for the TF-IDF and PageRank analyzers.

use webrank::{Corpus, DoubleLinkedList, Error, PageRankAnalyzer, PageRankConfig, TfIdfAnalyzer, Webpage};

fn words(text: &str) -> DoubleLinkedList<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn page(uri: &str, text: &str, links: &[&str]) -> Webpage {
    Webpage::new(
        uri.to_string(),
        text.split_whitespace(),
        links.iter().map(|l| l.to_string()),
    )
}

fn library() -> Corpus {
    [
        page("rust", "ownership borrowing lifetimes traits cargo crates", &["java", "go"]),
        page("java", "classes interfaces garbage collection jvm", &["rust"]),
        page("go", "goroutines channels garbage collection", &["rust", "java"]),
        page("haskell", "monads functors purity laziness", &[]),
    ]
    .into_iter()
    .collect()
}

#[test]
fn relevance_against_own_text_beats_unrelated_page() {
    let mut analyzer = TfIdfAnalyzer::new(&library()).unwrap();
    let query = words("monads functors purity laziness");

    let own = analyzer.compute_relevance(&query, "haskell").unwrap();
    let unrelated = analyzer.compute_relevance(&query, "rust").unwrap();

    assert!((own - 1.0).abs() < 1e-12, "own = {}", own);
    assert_eq!(unrelated, 0.0);
    assert!(own > unrelated);
}

#[test]
fn shared_words_give_partial_relevance() {
    let mut analyzer = TfIdfAnalyzer::new(&library()).unwrap();
    let query = words("garbage collection channels");
    let go = analyzer.compute_relevance(&query, "go").unwrap();
    let java = analyzer.compute_relevance(&query, "java").unwrap();
    assert!(go > java);
    assert!(java > 0.0);
    assert!(go < 1.0);
}

#[test]
fn relevance_is_idempotent() {
    let mut analyzer = TfIdfAnalyzer::new(&library()).unwrap();
    let query = words("ownership traits garbage");
    let first = analyzer.compute_relevance(&query, "rust").unwrap();
    analyzer.compute_relevance(&words("jvm"), "java").unwrap();
    let second = analyzer.compute_relevance(&query, "rust").unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn long_query_relevance_is_bit_identical_across_calls() {
    // 30 pages over a 50-word vocabulary
    let corpus: Corpus = (0..30)
        .map(|i| {
            let text: Vec<String> = (0..60).map(|j| format!("w{}", (i * 7 + j * j) % 50)).collect();
            Webpage::new(format!("p{}", i), text, Vec::<String>::new())
        })
        .collect();
    let mut analyzer = TfIdfAnalyzer::new(&corpus).unwrap();

    // 40 distinct words, each twice
    let query: Vec<String> = (0..80).map(|j| format!("w{}", (j * 3) % 40)).collect();
    let other = words("w1 w2 w3");

    for i in 0..30 {
        let uri = format!("p{}", i);
        let first = analyzer.compute_relevance(&query, &uri).unwrap();
        for _ in 0..50 {
            analyzer.compute_relevance(&other, &uri).unwrap();
            let again = analyzer.compute_relevance(&query, &uri).unwrap();
            assert_eq!(again.to_bits(), first.to_bits(), "{}: {} vs {}", uri, first, again);
        }
    }
}

#[test]
fn page_rank_is_idempotent_and_sums_to_one() {
    let analyzer = PageRankAnalyzer::with_config(&library(), &PageRankConfig::default()).unwrap();
    let total: f64 = analyzer.page_ranks().values().sum();
    assert!((total - 1.0).abs() < 1e-9);

    for uri in ["rust", "java", "go", "haskell"] {
        let a = analyzer.compute_page_rank(uri).unwrap();
        let b = analyzer.compute_page_rank(uri).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
    assert!(analyzer.compute_page_rank("rust").unwrap() > analyzer.compute_page_rank("haskell").unwrap());
}

#[test]
fn two_node_cycle_converges_to_half() {
    let corpus: Corpus = [page("a", "", &["b"]), page("b", "", &["a"])].into_iter().collect();
    let analyzer = PageRankAnalyzer::new(&corpus, 0.85, 1e-10, 100).unwrap();
    assert!(analyzer.converged());
    assert!((analyzer.compute_page_rank("a").unwrap() - 0.5).abs() < 1e-9);
    assert!((analyzer.compute_page_rank("b").unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn sink_keeps_total_mass() {
    let corpus: Corpus = [
        page("a", "", &["b", "c"]),
        page("b", "", &["c"]),
        page("c", "", &[]),
        page("d", "", &["outside"]),
    ]
    .into_iter()
    .collect();
    for limit in 1..25 {
        let analyzer = PageRankAnalyzer::new(&corpus, 0.85, 0.0, limit).unwrap();
        let total: f64 = analyzer.page_ranks().values().sum();
        assert!((total - 1.0).abs() < 1e-12, "limit {}: total {}", limit, total);
        assert_eq!(analyzer.iterations(), limit);
    }
}

#[test]
fn unknown_uri_fails_for_both_analyzers() {
    let corpus = library();
    let mut tfidf = TfIdfAnalyzer::new(&corpus).unwrap();
    let ranks = PageRankAnalyzer::with_config(&corpus, &PageRankConfig::default()).unwrap();
    assert_eq!(tfidf.compute_relevance(&words("cargo"), "python"), Err(Error::KeyNotFound));
    assert_eq!(ranks.compute_page_rank("python"), Err(Error::KeyNotFound));
}

#[test]
fn uris_need_not_be_strings() {
    let corpus: Corpus<u32> = [
        Webpage::new(1u32, ["alpha", "beta"], [2u32]),
        Webpage::new(2u32, ["beta", "gamma"], [1u32]),
    ]
    .into_iter()
    .collect();
    let mut tfidf = TfIdfAnalyzer::new(&corpus).unwrap();
    assert!(tfidf.compute_relevance(&words("alpha"), &1u32).unwrap() > 0.0);
    let ranks = PageRankAnalyzer::new(&corpus, 0.85, 1e-10, 100).unwrap();
    assert!((ranks.compute_page_rank(&2u32).unwrap() - 0.5).abs() < 1e-9);
}
