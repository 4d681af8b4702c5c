use std::borrow::Borrow;
use std::hash::Hash;

use tracing::{debug, info};

use crate::analyzer::webpage::Corpus;
use crate::config::PageRankConfig;
use crate::error::Result;
use crate::utils::datastruct::map::ChainedHashMap;
use crate::utils::datastruct::set::ChainedHashSet;

/// Adjacency list restricted to pages inside the corpus.
type LinkGraph<U> = ChainedHashMap<U, ChainedHashSet<U>>;

/// PageRankAnalyzer
/// コーパス内のリンク構造から各ページのPageRankを反復計算する
///
/// The link graph only lives for the duration of the constructor; afterwards
/// the analyzer holds nothing but the final rank table.
#[derive(Debug, Clone)]
pub struct PageRankAnalyzer<U = String> {
    page_ranks: ChainedHashMap<U, f64>,
    iterations: usize,
    converged: bool,
}

impl<U> PageRankAnalyzer<U>
where
    U: Eq + Hash + Clone,
{
    /// # Arguments
    /// * `pages` - 対象のページ集合
    /// * `decay` - リンクを辿る確率 (damping factor)
    /// * `epsilon` - 全ページのランク変化量がこれ未満になったら停止
    /// * `limit` - 反復回数の上限
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - decay / epsilon が範囲外
    pub fn new(pages: &Corpus<U>, decay: f64, epsilon: f64, limit: usize) -> Result<Self> {
        Self::with_config(pages, &PageRankConfig::new(decay, epsilon, limit))
    }

    pub fn with_config(pages: &Corpus<U>, config: &PageRankConfig) -> Result<Self> {
        config.validate()?;
        let graph = Self::make_graph(pages);
        let (page_ranks, iterations, converged) = Self::make_page_ranks(&graph, config)?;

        info!(
            pages = page_ranks.len(),
            iterations,
            converged,
            "page rank analyzer ready"
        );

        Ok(PageRankAnalyzer {
            page_ranks,
            iterations,
            converged,
        })
    }

    /// 自己リンクとコーパス外へのリンクを除いたグラフを作る
    fn make_graph(pages: &Corpus<U>) -> LinkGraph<U> {
        let mut graph: LinkGraph<U> = pages
            .iter()
            .map(|page| (page.uri().clone(), ChainedHashSet::new()))
            .collect();

        for page in pages {
            let uri = page.uri();
            let out_links: ChainedHashSet<U> = page
                .links()
                .iter()
                .filter(|link| *link != uri && graph.contains_key(*link))
                .cloned()
                .collect();
            graph.put(uri.clone(), out_links);
        }
        graph
    }

    fn make_page_ranks(
        graph: &LinkGraph<U>,
        config: &PageRankConfig,
    ) -> Result<(ChainedHashMap<U, f64>, usize, bool)> {
        let page_count = graph.len();
        if page_count == 0 {
            return Ok((ChainedHashMap::new(), 0, true));
        }
        let n = page_count as f64;
        let decay = config.decay;

        let mut ranks: ChainedHashMap<U, f64> =
            graph.keys().map(|uri| (uri.clone(), 1.0 / n)).collect();

        for iteration in 1..=config.limit {
            let mut next: ChainedHashMap<U, f64> =
                graph.keys().map(|uri| (uri.clone(), 0.0)).collect();

            // sink の分は全ページに均等に配るので合算してから足す
            let mut sink_share = 0.0;
            for (uri, out_links) in graph {
                let rank = *ranks.get(uri)?;
                if out_links.is_empty() {
                    sink_share += decay * rank / n;
                } else {
                    let share = decay * rank / out_links.len() as f64;
                    for target in out_links {
                        *next.get_mut(target)? += share;
                    }
                }
            }

            let uniform = (1.0 - decay) / n + sink_share;
            let mut max_delta = 0.0f64;
            for (uri, rank) in next.iter_mut() {
                *rank += uniform;
                max_delta = max_delta.max((*rank - *ranks.get(uri)?).abs());
            }
            debug!(iteration, max_delta, "page rank iteration");

            ranks = next;
            if max_delta < config.epsilon {
                return Ok((ranks, iteration, true));
            }
        }

        Ok((ranks, config.limit, false))
    }
}

impl<U> PageRankAnalyzer<U> {
    pub fn page_ranks(&self) -> &ChainedHashMap<U, f64> {
        &self.page_ranks
    }

    /// Iterations actually run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the run stopped on `epsilon` rather than on `limit`.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl<U> PageRankAnalyzer<U>
where
    U: Eq + Hash,
{
    /// # Errors
    /// * `Error::KeyNotFound` - `uri` がコーパスに無い
    pub fn compute_page_rank<Q>(&self, uri: &Q) -> Result<f64>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.page_ranks.get(uri).copied()
    }
}
