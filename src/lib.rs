/// This crate is a Document Ranking Engine built on hand-rolled containers.
pub mod analyzer;
pub mod config;
pub mod error;
pub mod utils;

/// Error taxonomy shared by every container and analyzer.
/// - `InvalidArgument`: a violated precondition (NaN heap item, bad decay factor)
/// - `KeyNotFound` / `ElementNotFound`: lookup or removal of something absent
/// - `IndexOutOfRange`: sequence access outside its bounds
/// - `EmptyContainer`: removal or peek on an empty sequence or heap
pub use error::{Error, Result};

/// PageRank parameters (decay, epsilon, iteration limit) with validated defaults.
///
/// # Serialization
/// Supported.
pub use config::PageRankConfig;

/// Chained Hash Map
/// A hash map that resolves collisions by chaining pairs in per-bucket stores.
/// The bucket table starts at 10 entries and doubles once the integer load
/// factor exceeds 1; rehashing moves pairs without cloning them.
///
/// Lookups accept any borrowed form of the key, as `std::collections::HashMap` does.
/// Iteration order is bucket-major and otherwise unspecified.
///
/// # Serialization
/// Supported, as a plain map. The bucket layout is rebuilt on deserialization.
pub use utils::datastruct::map::ChainedHashMap;

/// Chained Hash Set
/// A set backed by `ChainedHashMap<T, ()>`.
///
/// # Serialization
/// Supported, as a sequence.
pub use utils::datastruct::set::ChainedHashSet;

/// Double Linked List
/// A doubly linked sequence whose nodes live in a generational arena.
/// Both ends are O(1); indexed access walks from the nearer end.
///
/// # Serialization
/// Supported, as a sequence.
pub use utils::datastruct::list::DoubleLinkedList;

/// Array Heap
/// A 4-ary min-heap over a growable array. Items must be comparable with
/// themselves, so `NaN` is rejected on insert.
pub use utils::datastruct::heap::ArrayHeap;

/// Top-K selection
/// Returns the `k` largest elements of a borrowed sequence in ascending order.
pub use utils::sort::top_k_sort;

/// Webpage and Corpus
/// The document model consumed by the analyzers: a URI, its word sequence and
/// its outbound links. Pages compare and hash by URI only, so a `Corpus` (a
/// `ChainedHashSet<Webpage<U>>`) holds one page per URI.
pub use analyzer::webpage::{Corpus, Webpage};

/// TF-IDF Analyzer
/// Scores how relevant a document is to a query by the cosine similarity of
/// their TF-IDF vectors. IDF and document vectors are computed once per corpus;
/// per-document vectors are built in parallel.
pub use analyzer::tfidf::TfIdfAnalyzer;

/// PageRank Analyzer
/// Runs power iteration over the corpus link graph and keeps the final rank
/// table. Sink pages spread their rank over every page.
pub use analyzer::pagerank::PageRankAnalyzer;
