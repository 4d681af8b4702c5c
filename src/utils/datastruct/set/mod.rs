use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use serde::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::{Error, Result};
use crate::utils::datastruct::map::{self, ChainedHashMap};

/// ChainedHashSet
/// `ChainedHashMap<T, ()>` の薄いラッパー
/// 値は存在マーカーとしてのみ使い、読まない
#[derive(Clone)]
pub struct ChainedHashSet<T, S = ahash::RandomState> {
    map: ChainedHashMap<T, (), S>,
}

impl<T, S> ChainedHashSet<T, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        ChainedHashSet {
            map: ChainedHashMap::with_hasher(hash_builder),
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
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

impl<T, S> ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Add `item` unless it is already present.
    ///
    /// # Returns
    /// * `bool` - 新しく追加されたらtrue
    pub fn add(&mut self, item: T) -> bool {
        if self.map.contains_key(&item) {
            return false;
        }
        self.map.put(item, ());
        true
    }

    /// # Errors
    /// * `Error::ElementNotFound` - itemが存在しない
    pub fn remove<Q>(&mut self, item: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(item).map_err(|_| Error::ElementNotFound)
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(item)
    }
}

impl<T, S> Default for ChainedHashSet<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Debug for ChainedHashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, S> Eq for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> FromIterator<T> for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

pub struct Iter<'a, T> {
    inner: map::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(item, _)| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

pub struct IntoIter<T> {
    inner: map::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(item, _)| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, S> IntoIterator for ChainedHashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a ChainedHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> Serialize for ChainedHashSet<T, S>
where
    T: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct ChainedHashSetVisitor<T, S> {
    _marker: PhantomData<fn() -> ChainedHashSet<T, S>>,
}

impl<'de, T, S> Visitor<'de> for ChainedHashSetVisitor<T, S>
where
    T: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    type Value = ChainedHashSet<T, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = ChainedHashSet::new();
        while let Some(item) = seq.next_element()? {
            set.add(item);
        }
        Ok(set)
    }
}

impl<'de, T, S> Deserialize<'de> for ChainedHashSet<T, S>
where
    T: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(ChainedHashSetVisitor {
            _marker: PhantomData,
        })
    }
}
