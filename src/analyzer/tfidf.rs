use std::borrow::Borrow;
use std::hash::Hash;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::analyzer::webpage::{Corpus, Webpage};
use crate::error::Result;
use crate::utils::datastruct::map::ChainedHashMap;
use crate::utils::datastruct::set::ChainedHashSet;
use crate::utils::math::{cosine, l2_norm, sparse_dot};

/// Sparse TF-IDF vector, word -> weight.
pub type TermVector = ChainedHashMap<String, f64>;

/// TfIdfAnalyzer
/// クエリと各ドキュメントの関連度をTF-IDFのコサイン類似度で求める
///
/// IDF scores and the per-document vectors are fixed at construction; only
/// `query_vector` changes afterwards, once per `compute_relevance` call.
///
/// # Examples
/// ```
/// use webrank::{Corpus, TfIdfAnalyzer, Webpage};
///
/// let mut corpus: Corpus = Corpus::new();
/// corpus.add(Webpage::new("a".to_string(), ["rust", "heap"], vec![]));
/// corpus.add(Webpage::new("b".to_string(), ["java", "list"], vec![]));
///
/// let mut analyzer = TfIdfAnalyzer::new(&corpus).unwrap();
/// let query: Vec<String> = vec!["rust".into()];
/// assert!(analyzer.compute_relevance(&query, "a").unwrap() > 0.0);
/// assert_eq!(analyzer.compute_relevance(&query, "b").unwrap(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TfIdfAnalyzer<U = String> {
    idf_scores: TermVector,
    document_vectors: ChainedHashMap<U, TermVector>,
    document_norms: ChainedHashMap<U, f64>,
    query_vector: TermVector,
}

impl<U> TfIdfAnalyzer<U>
where
    U: Eq + Hash + Clone + Send + Sync,
{
    /// Build IDF scores and every document's TF-IDF vector for `pages`.
    pub fn new(pages: &Corpus<U>) -> Result<Self> {
        let idf_scores = Self::compute_idf_scores(pages);
        let document_vectors = Self::compute_all_document_tfidf_vectors(pages, &idf_scores)?;
        let document_norms = document_vectors
            .iter()
            .map(|(uri, vector)| (uri.clone(), l2_norm(vector.values())))
            .collect();

        info!(
            documents = pages.len(),
            vocabulary = idf_scores.len(),
            "tf-idf analyzer ready"
        );

        Ok(TfIdfAnalyzer {
            idf_scores,
            document_vectors,
            document_norms,
            query_vector: TermVector::new(),
        })
    }

    /// word -> `ln(N / df)`, df は単語を含むドキュメント数
    fn compute_idf_scores(pages: &Corpus<U>) -> TermVector {
        let mut document_frequency: ChainedHashMap<&str, f64> = ChainedHashMap::new();
        for page in pages {
            // ドキュメント内の重複は1回と数える
            let unique: ChainedHashSet<&str> = page.words().iter().map(String::as_str).collect();
            for word in unique {
                match document_frequency.get_mut(word) {
                    Ok(count) => *count += 1.0,
                    Err(_) => {
                        document_frequency.put(word, 1.0);
                    }
                }
            }
        }

        let total = pages.len() as f64;
        let idf: TermVector = document_frequency
            .into_iter()
            .map(|(word, df)| (word.to_string(), (total / df).ln()))
            .collect();
        debug!(vocabulary = idf.len(), "computed idf scores");
        idf
    }

    fn compute_all_document_tfidf_vectors(
        pages: &Corpus<U>,
        idf_scores: &TermVector,
    ) -> Result<ChainedHashMap<U, TermVector>> {
        let pages: Vec<&Webpage<U>> = pages.iter().collect();
        let vectors = pages
            .par_iter()
            .map(|page| -> Result<(U, TermVector)> {
                let vector = compute_tf_scores(page.words())
                    .into_iter()
                    .map(|(word, tf)| -> Result<(String, f64)> {
                        let idf = *idf_scores.get(&word)?;
                        Ok((word, idf * tf))
                    })
                    .collect::<Result<_>>()?;
                Ok((page.uri().clone(), vector))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(vectors.into_iter().collect())
    }

    /// Cosine similarity between `query` and the document at `uri`.
    ///
    /// Query words the corpus never saw weigh zero: they lengthen nothing and
    /// match nothing. Only words in the query feed the dot product, while the
    /// document norm covers its whole vector. Either norm being zero gives 0.0.
    ///
    /// The query's TF-IDF vector replaces `query_vector`.
    ///
    /// # Errors
    /// * `Error::KeyNotFound` - `uri` がコーパスに無い
    pub fn compute_relevance<'a, I, Q>(&mut self, query: I, uri: &Q) -> Result<f64>
    where
        I: IntoIterator<Item = &'a String>,
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let document_vector = self.document_vectors.get(uri)?;
        let document_norm = *self.document_norms.get(uri)?;

        // 和はクエリの初出順で取る。mapの走査順はhasherのseedごとに変わる
        let query_terms: Vec<(String, f64)> = compute_tf_scores(query)
            .into_iter()
            .map(|(word, tf)| {
                let idf = *self.idf_scores.get_or(&word, &0.0);
                (word, tf * idf)
            })
            .collect();
        let query_norm = l2_norm(query_terms.iter().map(|(_, weight)| weight));
        let dot = sparse_dot(
            query_terms.iter().map(|(word, weight)| (word, weight)),
            document_vector,
        );

        self.query_vector = query_terms.into_iter().collect();
        Ok(cosine(dot, query_norm, document_norm))
    }
}

impl<U> TfIdfAnalyzer<U> {
    pub fn idf_scores(&self) -> &TermVector {
        &self.idf_scores
    }

    pub fn document_tfidf_vectors(&self) -> &ChainedHashMap<U, TermVector> {
        &self.document_vectors
    }

    /// The TF-IDF vector of the last query passed to `compute_relevance`.
    pub fn query_vector(&self) -> &TermVector {
        &self.query_vector
    }
}

impl<U> TfIdfAnalyzer<U>
where
    U: Eq + Hash,
{
    pub fn document_vector<Q>(&self, uri: &Q) -> Result<&TermVector>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.document_vectors.get(uri)
    }
}

/// word -> 出現回数 / 単語列の長さ
/// 並びは各単語の初出順
fn compute_tf_scores<'a, I>(words: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut position: ChainedHashMap<&str, usize> = ChainedHashMap::new();
    let mut counts: Vec<(&str, f64)> = Vec::new();
    let mut total = 0usize;
    for word in words {
        total += 1;
        match position.get(word.as_str()).ok().copied() {
            Some(idx) => counts[idx].1 += 1.0,
            None => {
                position.put(word.as_str(), counts.len());
                counts.push((word.as_str(), 1.0));
            }
        }
    }

    let total = total as f64;
    counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count / total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::datastruct::list::DoubleLinkedList;

    fn words(text: &str) -> DoubleLinkedList<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn corpus() -> Corpus {
        [
            ("a", "the cat sat on the mat"),
            ("b", "the dog sat on the log"),
            ("c", "cats and dogs"),
        ]
        .into_iter()
        .map(|(uri, text)| Webpage::new(uri.to_string(), text.split_whitespace(), vec![]))
        .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn tf_counts_raw_occurrences() {
        let tf = compute_tf_scores(&words("b a c a"));
        assert_eq!(
            tf,
            vec![("b".to_string(), 0.25), ("a".to_string(), 0.5), ("c".to_string(), 0.25)]
        );
        assert!(compute_tf_scores(&words("")).is_empty());
    }

    #[test]
    fn idf_uses_document_frequency() {
        let analyzer = TfIdfAnalyzer::new(&corpus()).unwrap();
        let idf = analyzer.idf_scores();
        // "the" appears twice in a and b, but df is 2
        assert!(close(*idf.get("the").unwrap(), (3.0f64 / 2.0).ln()));
        assert!(close(*idf.get("cat").unwrap(), 3.0f64.ln()));
        assert_eq!(idf.len(), 10);
    }

    #[test]
    fn document_vectors_are_tf_times_idf() {
        let analyzer = TfIdfAnalyzer::new(&corpus()).unwrap();
        let a = analyzer.document_vector("a").unwrap();
        assert!(close(*a.get("the").unwrap(), (2.0 / 6.0) * (1.5f64).ln()));
        assert!(close(*a.get("mat").unwrap(), (1.0 / 6.0) * 3.0f64.ln()));
        assert_eq!(analyzer.document_tfidf_vectors().len(), 3);
    }

    #[test]
    fn relevance_prefers_matching_document() {
        let mut analyzer = TfIdfAnalyzer::new(&corpus()).unwrap();
        let query = words("cat mat");
        let a = analyzer.compute_relevance(&query, "a").unwrap();
        let b = analyzer.compute_relevance(&query, "b").unwrap();
        assert!(a > 0.0);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn unseen_query_words_weigh_zero() {
        let mut analyzer = TfIdfAnalyzer::new(&corpus()).unwrap();
        let score = analyzer.compute_relevance(&words("zebra"), "a").unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(analyzer.query_vector().get("zebra"), Ok(&0.0));
    }

    #[test]
    fn query_vector_is_replaced_per_call() {
        let mut analyzer = TfIdfAnalyzer::new(&corpus()).unwrap();
        analyzer.compute_relevance(&words("cat"), "a").unwrap();
        analyzer.compute_relevance(&words("dog"), "a").unwrap();
        assert!(!analyzer.query_vector().contains_key("cat"));
        assert!(analyzer.query_vector().contains_key("dog"));
    }

    #[test]
    fn relevance_is_bit_identical_for_long_queries() {
        let mut analyzer = TfIdfAnalyzer::new(&corpus()).unwrap();
        let query = words(
            "the cat sat on mat dog log cats and dogs \
             mat log the sat on cat dogs cats and dog zebra",
        );
        for uri in ["a", "b", "c"] {
            let first = analyzer.compute_relevance(&query, uri).unwrap().to_bits();
            for _ in 0..50 {
                analyzer.compute_relevance(&words("cat"), uri).unwrap();
                let again = analyzer.compute_relevance(&query, uri).unwrap();
                assert_eq!(again.to_bits(), first, "uri {}", uri);
            }
        }
    }

    #[test]
    fn unknown_uri_is_key_not_found() {
        let mut analyzer = TfIdfAnalyzer::new(&corpus()).unwrap();
        assert_eq!(
            analyzer.compute_relevance(&words("cat"), "zzz"),
            Err(Error::KeyNotFound)
        );
        assert!(analyzer.query_vector().is_empty());
    }
}
