pub mod pagerank;
pub mod tfidf;
pub mod webpage;
