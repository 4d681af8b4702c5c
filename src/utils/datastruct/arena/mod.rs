use std::ops::{Index, IndexMut};

/// Arena
/// 世代付きスロットでノードを管理するプール
/// 解放されたスロットは free_list から再利用される
///
/// A slot handed out by `alloc` stays valid until `dealloc`; afterwards its
/// generation no longer matches and lookups through it fail.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    pool: Vec<Entry<T>>,
    free_list: Vec<usize>,
    live: usize,
}

#[derive(Debug, Clone)]
enum Entry<T> {
    None {
        before_gen_id: u32,
    },
    Some {
        value: T,
        gen_id: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaSlot {
    idx: u32,
    gen_id: u32,
}

impl ArenaSlot {
    fn new(index: usize, gen_id: u32) -> Self {
        Self {
            idx: index as u32,
            gen_id,
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            pool: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn alloc(&mut self, value: T) -> ArenaSlot {
        self.live += 1;
        if let Some(free_idx) = self.free_list.pop() {
            let entry = &mut self.pool[free_idx];
            let gen_id = match entry {
                Entry::None { before_gen_id } => before_gen_id.wrapping_add(1),
                // free_listに入っているのは空きスロットだけ
                Entry::Some { .. } => unreachable!("free list points at an occupied slot"),
            };
            *entry = Entry::Some { value, gen_id };
            ArenaSlot::new(free_idx, gen_id)
        } else {
            self.pool.push(Entry::Some { value, gen_id: 0 });
            ArenaSlot::new(self.pool.len() - 1, 0)
        }
    }

    /// Free `slot` and hand its value back.
    /// A stale or already freed slot yields `None` and changes nothing.
    pub fn dealloc(&mut self, slot: ArenaSlot) -> Option<T> {
        let entry = self.pool.get_mut(slot.idx as usize)?;
        let before_gen_id = match &*entry {
            Entry::Some { gen_id, .. } if *gen_id == slot.gen_id => *gen_id,
            _ => return None,
        };
        match std::mem::replace(entry, Entry::None { before_gen_id }) {
            Entry::Some { value, .. } => {
                self.free_list.push(slot.idx as usize);
                self.live -= 1;
                Some(value)
            }
            Entry::None { .. } => None,
        }
    }

    /// `dealloc` for a slot the caller knows is live.
    /// Panics on a stale slot.
    pub fn remove(&mut self, slot: ArenaSlot) -> T {
        match self.dealloc(slot) {
            Some(value) => value,
            None => panic!("stale arena slot {:?}", slot),
        }
    }

    pub fn get(&self, slot: ArenaSlot) -> Option<&T> {
        match self.pool.get(slot.idx as usize)? {
            Entry::Some { value, gen_id } if *gen_id == slot.gen_id => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, slot: ArenaSlot) -> Option<&mut T> {
        match self.pool.get_mut(slot.idx as usize)? {
            Entry::Some { value, gen_id } if *gen_id == slot.gen_id => Some(value),
            _ => None,
        }
    }

    /// Free every slot. Generations are kept, so slots from before the
    /// clear stay stale after their index is reused.
    pub fn clear(&mut self) {
        for entry in self.pool.iter_mut() {
            if let Entry::Some { gen_id, .. } = *entry {
                *entry = Entry::None { before_gen_id: gen_id };
            }
        }
        // 小さい index から再利用する
        self.free_list = (0..self.pool.len()).rev().collect();
        self.live = 0;
    }
}

/// Panics on a stale slot.
impl<T> Index<ArenaSlot> for Arena<T> {
    type Output = T;

    fn index(&self, slot: ArenaSlot) -> &T {
        match self.get(slot) {
            Some(value) => value,
            None => panic!("stale arena slot {:?}", slot),
        }
    }
}

impl<T> IndexMut<ArenaSlot> for Arena<T> {
    fn index_mut(&mut self, slot: ArenaSlot) -> &mut T {
        match self.get_mut(slot) {
            Some(value) => value,
            None => panic!("stale arena slot {:?}", slot),
        }
    }
}
