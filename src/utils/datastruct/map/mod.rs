pub mod pair;
pub mod serde;

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use tracing::trace;

use crate::config::{INITIAL_TABLE_SIZE, MAX_LOAD_FACTOR};
use crate::error::{Error, Result};

pub use pair::PairStore;

/// ChainedHashMap
/// チェイン法のHashMap
/// 各バケットは空か `PairStore` を1つ持つ
///
/// A key lives in bucket `hash(key) % table_size`.
/// The table doubles (and every pair is rehashed) when, after an insertion,
/// `len / table_size` exceeds `MAX_LOAD_FACTOR`.
///
/// Iteration order is bucket-major, then insertion order within a bucket.
/// It is stable only while the map is not mutated.
///
/// `len` は全バケットの長さの合計と常に一致する
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = ahash::RandomState> {
    buckets: Vec<Option<PairStore<K, V>>>,
    len: usize,
    hash_builder: S,
}

/// hash util
/// resize中は self を借用できないので関数として切り出す
#[inline]
fn bucket_of<Q, S>(hash_builder: &S, key: &Q, table_size: usize) -> usize
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    (hash_builder.hash_one(key) % table_size as u64) as usize
}

fn empty_buckets<K, V>(table_size: usize) -> Vec<Option<PairStore<K, V>>> {
    std::iter::repeat_with(|| None).take(table_size).collect()
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        ChainedHashMap {
            buckets: empty_buckets(INITIAL_TABLE_SIZE),
            len: 0,
            hash_builder,
        }
    }

    pub fn new() -> Self
    where
        S: Default,
    {
        Self::with_hasher(S::default())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets currently allocated.
    #[inline]
    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every pair, keeping the current table size.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|bucket| *bucket = None);
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: Default::default(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            current: Default::default(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        bucket_of(&self.hash_builder, key, self.buckets.len())
    }

    /// Look up the value mapped to `key`.
    ///
    /// # Errors
    /// * `Error::KeyNotFound` - keyが存在しない
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .as_ref()
            .and_then(|bucket| bucket.get(key))
            .ok_or(Error::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .as_mut()
            .and_then(|bucket| bucket.get_mut(key))
            .ok_or(Error::KeyNotFound)
    }

    /// `get` that falls back to `default` for an absent key.
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .as_ref()
            .is_some_and(|bucket| bucket.contains_key(key))
    }

    /// Insert or overwrite the value for `key`.
    /// May resize the table after a new key was added.
    ///
    /// # Returns
    /// * `Option<V>` - 上書き前の値
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key);
        let old_value = self.buckets[idx]
            .get_or_insert_with(PairStore::new)
            .put(key, value);
        if old_value.is_none() {
            self.len += 1;
            if self.len / self.buckets.len() > MAX_LOAD_FACTOR {
                self.resize();
            }
        }
        old_value
    }

    /// Remove `key` and return the value it mapped to.
    ///
    /// # Errors
    /// * `Error::KeyNotFound` - keyが存在しない
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        let bucket = self.buckets[idx].as_mut().ok_or(Error::KeyNotFound)?;
        let value = bucket.remove(key).ok_or(Error::KeyNotFound)?;
        if bucket.is_empty() {
            self.buckets[idx] = None;
        }
        self.len -= 1;
        Ok(value)
    }

    /// テーブルを倍にして全pairを再配置する
    /// pairはmoveするのでcloneは発生しない
    fn resize(&mut self) {
        let new_size = self.buckets.len() * 2;
        trace!(
            from = self.buckets.len(),
            to = new_size,
            len = self.len,
            "resizing chained hash map"
        );
        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_size));
        for bucket in old_buckets.into_iter().flatten() {
            for (key, value) in bucket {
                let idx = bucket_of(&self.hash_builder, &key, new_size);
                self.buckets[idx]
                    .get_or_insert_with(PairStore::new)
                    .push_unique(key, value);
            }
        }
    }
}

impl<K, V, S> Default for ChainedHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Debug for ChainedHashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// 順序は比較しない
impl<K, V, S> PartialEq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_ok_and(|v| v == value))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Option<PairStore<K, V>>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            if let Some(bucket) = self.buckets.next()? {
                self.current = bucket.iter();
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

pub struct IterMut<'a, K, V> {
    buckets: std::slice::IterMut<'a, Option<PairStore<K, V>>>,
    current: std::slice::IterMut<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.remaining -= 1;
                return Some((&*key, value));
            }
            if let Some(bucket) = self.buckets.next()? {
                self.current = bucket.iter_mut();
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<Option<PairStore<K, V>>>,
    current: std::vec::IntoIter<(K, V)>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.current.next() {
                self.remaining -= 1;
                return Some(pair);
            }
            if let Some(bucket) = self.buckets.next()? {
                self.current = bucket.into_iter();
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            current: Vec::new().into_iter(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
