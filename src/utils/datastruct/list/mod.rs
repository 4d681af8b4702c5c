use std::fmt::{self, Debug};
use std::marker::PhantomData;

use serde::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::{Error, Result};
use crate::utils::datastruct::arena::{Arena, ArenaSlot};

/// DoubleLinkedList
/// 双方向連結リスト
/// ノードは `Arena` に置き、前後のリンクは `ArenaSlot` で持つ
///
/// Both ends are O(1). Indexed access walks from whichever end is nearer,
/// so it costs `O(min(index, len - index))`.
/// Insertion and deletion relink neighbours; no element is moved.
#[derive(Clone)]
pub struct DoubleLinkedList<T> {
    nodes: Arena<Node<T>>,
    front: Option<ArenaSlot>,
    back: Option<ArenaSlot>,
    len: usize,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<ArenaSlot>,
    next: Option<ArenaSlot>,
}

impl<T> Default for DoubleLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoubleLinkedList<T> {
    pub fn new() -> Self {
        DoubleLinkedList {
            nodes: Arena::new(),
            front: None,
            back: None,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Option<&T> {
        self.front.map(|slot| &self.nodes[slot].value)
    }

    pub fn back(&self) -> Option<&T> {
        self.back.map(|slot| &self.nodes[slot].value)
    }

    /// Append `item` at the back.
    pub fn add(&mut self, item: T) {
        let slot = self.nodes.alloc(Node {
            value: item,
            prev: self.back,
            next: None,
        });
        match self.back {
            Some(back) => self.nodes[back].next = Some(slot),
            None => self.front = Some(slot),
        }
        self.back = Some(slot);
        self.len += 1;
    }

    /// Pop the back element.
    ///
    /// # Errors
    /// * `Error::EmptyContainer` - リストが空
    pub fn remove(&mut self) -> Result<T> {
        let back = self.back.ok_or(Error::EmptyContainer)?;
        Ok(self.unlink(back))
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let slot = self.checked_slot(index)?;
        Ok(&self.nodes[slot].value)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let slot = self.checked_slot(index)?;
        Ok(&mut self.nodes[slot].value)
    }

    /// Replace the element at `index`.
    ///
    /// # Returns
    /// * `T` - 置き換えられた元の要素
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let slot = self.checked_slot(index)?;
        Ok(std::mem::replace(&mut self.nodes[slot].value, item))
    }

    /// Insert `item` so that it ends up at `index`.
    /// `index == len` appends.
    ///
    /// # Errors
    /// * `Error::IndexOutOfRange` - `index > len`
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index == self.len {
            self.add(item);
            return Ok(());
        }
        let next = self.checked_slot(index)?;
        let prev = self.nodes[next].prev;
        let slot = self.nodes.alloc(Node {
            value: item,
            prev,
            next: Some(next),
        });
        self.nodes[next].prev = Some(slot);
        match prev {
            Some(prev) => self.nodes[prev].next = Some(slot),
            None => self.front = Some(slot),
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    /// * `Error::EmptyContainer` - リストが空
    /// * `Error::IndexOutOfRange` - `index >= len`
    pub fn delete(&mut self, index: usize) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let slot = self.checked_slot(index)?;
        Ok(self.unlink(slot))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.front = None;
        self.back = None;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            head: self.front,
            tail: self.back,
            remaining: self.len,
        }
    }

    /// 近い方の端から辿る
    /// 範囲外ならNone
    fn slot_at(&self, index: usize) -> Option<ArenaSlot> {
        if index >= self.len {
            return None;
        }
        if index < self.len / 2 {
            let mut slot = self.front?;
            for _ in 0..index {
                slot = self.nodes[slot].next?;
            }
            Some(slot)
        } else {
            let mut slot = self.back?;
            for _ in index + 1..self.len {
                slot = self.nodes[slot].prev?;
            }
            Some(slot)
        }
    }

    #[inline]
    fn checked_slot(&self, index: usize) -> Result<ArenaSlot> {
        self.slot_at(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// ノードを鎖から外して値を返す
    /// slot は生きているノードであること
    fn unlink(&mut self, slot: ArenaSlot) -> T {
        let Node { value, prev, next } = self.nodes.remove(slot);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.front = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.back = prev,
        }
        self.len -= 1;
        value
    }
}

impl<T> DoubleLinkedList<T>
where
    T: PartialEq,
{
    /// Index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|value| value == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}

impl<T> Debug for DoubleLinkedList<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for DoubleLinkedList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for DoubleLinkedList<T> where T: Eq {}

impl<T> FromIterator<T> for DoubleLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoubleLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

pub struct Iter<'a, T> {
    list: &'a DoubleLinkedList<T>,
    head: Option<ArenaSlot>,
    tail: Option<ArenaSlot>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.head?];
        self.head = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.tail?];
        self.tail = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

pub struct IntoIter<T> {
    list: DoubleLinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let front = self.list.front?;
        Some(self.list.unlink(front))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for DoubleLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a DoubleLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Serialize for DoubleLinkedList<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct DoubleLinkedListVisitor<T> {
    _marker: PhantomData<fn() -> DoubleLinkedList<T>>,
}

impl<'de, T> Visitor<'de> for DoubleLinkedListVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = DoubleLinkedList<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut list = DoubleLinkedList::new();
        while let Some(item) = seq.next_element()? {
            list.add(item);
        }
        Ok(list)
    }
}

impl<'de, T> Deserialize<'de> for DoubleLinkedList<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(DoubleLinkedListVisitor {
            _marker: PhantomData,
        })
    }
}
