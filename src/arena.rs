//! Handle-indexed slot allocator.

use std::mem;
use std::ops::{Index, IndexMut};

/// A stable index into an `Arena<T>`.
///
/// A handle remains valid until the object it refers to is freed. The slot may then be handed out
/// again by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(usize);

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A growable allocator for a single type of object.
///
/// Objects are addressed by `Handle`s instead of references, so structures with many links
/// between objects (such as the levels of a skiplist) can be rewired freely without any unsafe
/// code. Freed slots are kept in an intrusive free list and reused before the underlying `Vec`
/// grows again.
///
/// # Examples
///
/// ```
/// use skiplist_multiset::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist_multiset::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.free_head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle(self.slots.len() - 1)
            },
            Some(handle) => {
                match mem::replace(&mut self.slots[handle.0], Slot::Occupied(value)) {
                    Slot::Vacant(next_free) => self.free_head = next_free,
                    Slot::Occupied(_) => panic!("Error: free list points at an occupied slot."),
                }
                handle
            },
        }
    }

    /// Frees an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not refer to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist_multiset::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        if let Slot::Vacant(_) = self.slots[handle.0] {
            panic!("Error: attempting to free vacant slot.");
        }
        let next_free = self.free_head.replace(handle);
        match mem::replace(&mut self.slots[handle.0], Slot::Vacant(next_free)) {
            Slot::Occupied(value) => {
                self.len -= 1;
                value
            },
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object, or `None` if the handle is not live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object, or `None` if the handle is not live.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object in the arena. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
