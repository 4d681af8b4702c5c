use std::hash::{BuildHasher, Hash};

use num::Float;

use crate::utils::datastruct::map::ChainedHashMap;

/// L2ノルム
///
/// # Arguments
/// * `values` - ベクトルの成分
///
/// # Returns
/// * `N` - `sqrt(Σ v²)`、空なら0
#[inline]
pub fn l2_norm<'a, N, I>(values: I) -> N
where
    N: Float + 'a,
    I: IntoIterator<Item = &'a N>,
{
    values
        .into_iter()
        .fold(N::zero(), |acc, &v| acc + v * v)
        .sqrt()
}

/// 疎ベクトル同士のドット積
/// `lhs` の成分だけを走査し、`rhs` に無い成分は0として扱う
///
/// 加算は `lhs` の走査順に行われる。順序を固定したいときは
/// `lhs` に並びの決まった `(key, value)` 列を渡す
#[inline]
pub fn sparse_dot<'a, K, N, I, S>(lhs: I, rhs: &ChainedHashMap<K, N, S>) -> N
where
    K: Eq + Hash + 'a,
    N: Float + 'a,
    I: IntoIterator<Item = (&'a K, &'a N)>,
    S: BuildHasher,
{
    lhs.into_iter().fold(N::zero(), |acc, (key, &l)| match rhs.get(key) {
        Ok(&r) => acc + l * r,
        Err(_) => acc,
    })
}

/// Cosine similarity from a precomputed dot product and both norms.
/// A zero norm on either side gives zero.
#[inline]
pub fn cosine<N>(dot: N, lhs_norm: N, rhs_norm: N) -> N
where
    N: Float,
{
    if lhs_norm.is_zero() || rhs_norm.is_zero() {
        return N::zero();
    }
    dot / (lhs_norm * rhs_norm)
}
