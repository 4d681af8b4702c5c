use std::borrow::Borrow;

/// PairStore
/// 連続領域に (key, value) を並べるだけの小さな辞書
/// `ChainedHashMap` の1バケット分を保持する
///
/// Lookups scan linearly and compare keys by value.
/// Pairs keep insertion order until a removal moves the last pair into the hole.
#[derive(Clone, Debug)]
pub struct PairStore<K, V> {
    pairs: Vec<(K, V)>,
}

impl<K, V> Default for PairStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PairStore<K, V> {
    pub fn new() -> Self {
        PairStore { pairs: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.pairs.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, (K, V)> {
        self.pairs.iter_mut()
    }

    /// push without a lookup
    /// 呼び出し側がkeyの一意性を保証すること (rehash用)
    #[inline]
    pub(crate) fn push_unique(&mut self, key: K, value: V) {
        self.pairs.push((key, value));
    }
}

impl<K, V> PairStore<K, V>
where
    K: Eq,
{
    #[inline]
    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.pairs.iter().position(|(k, _)| k.borrow() == key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).map(|idx| &self.pairs[idx].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).map(move |idx| &mut self.pairs[idx].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).is_some()
    }

    /// Insert or overwrite.
    ///
    /// # Returns
    /// * `Option<V>` - 上書きされた値 (新規keyならNone)
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.pairs[idx].1, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Remove the pair for `key`, moving the last pair into its slot.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).map(|idx| self.pairs.swap_remove(idx).1)
    }
}

impl<K, V> IntoIterator for PairStore<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a PairStore<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
