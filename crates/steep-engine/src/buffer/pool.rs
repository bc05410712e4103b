use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed index into a [`Pool`].
pub struct Handle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: usize) -> Self {
        Self { index: index as u32, _marker: PhantomData }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Copy for Handle<T> {}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = std::any::type_name::<T>();
        let short = full.rsplit("::").next().unwrap_or(full);
        write!(f, "{short}#{}", self.index)
    }
}

/// Slot storage with index reuse.
///
/// Removing an entry frees its slot; touching a freed handle panics.
#[derive(Debug)]
pub struct Pool<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    pub fn insert(&mut self, value: T) -> Handle<T> {
        match self.free.pop() {
            Some(i) => {
                self.slots[i] = Some(value);
                Handle::new(i)
            }
            None => {
                self.slots.push(Some(value));
                Handle::new(self.slots.len() - 1)
            }
        }
    }

    pub fn remove(&mut self, handle: Handle<T>) -> T {
        let value = self.slot_mut(handle).take();
        match value {
            Some(v) => {
                self.free.push(handle.index());
                v
            }
            None => panic!("{handle:?} used after free"),
        }
    }

    pub fn get(&self, handle: Handle<T>) -> &T {
        match self.slots.get(handle.index()) {
            Some(Some(v)) => v,
            _ => panic!("{handle:?} used after free"),
        }
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> &mut T {
        match self.slot_mut(handle) {
            Some(v) => v,
            None => panic!("{handle:?} used after free"),
        }
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        matches!(self.slots.get(handle.index()), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the pool, yielding every live entry.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.free.clear();
        self.slots.drain(..).flatten()
    }

    fn slot_mut(&mut self, handle: Handle<T>) -> &mut Option<T> {
        match self.slots.get_mut(handle.index()) {
            Some(slot) => slot,
            None => panic!("{handle:?} does not belong to this pool"),
        }
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
