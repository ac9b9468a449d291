use crate::arena::{Arena, Handle};
use crate::skiplist::config::SkipListConfig;
use crate::skiplist::node::{Node, Slot};
use rand::{Rng, SeedableRng, XorShiftRng};
use std::collections::HashSet;
use std::fmt;
use std::iter::FromIterator;

/// An ordered, duplicate-preserving sequence implemented by a skiplist.
///
/// A skiplist is a probabilistic data structure that allows for binary search tree operations by
/// maintaining a linked hierarchy of subsequences. Level 0 is a sorted linked list of every
/// element. Each level above it is an "express lane" that holds roughly `probability` times as
/// many elements as the level below, so searching, insertion, and deletion take expected
/// logarithmic time without any rebalancing.
///
/// Equal elements are never coalesced: every insertion builds its own tower of nodes, and
/// `remove` deletes exactly one tower. Empty levels are trimmed from the top after every removal.
///
/// Nodes and elements live in arenas and are linked by handles. Every level is bounded by a head
/// sentinel and ends at a tail sentinel shared by all levels. Head sentinels are chained downward
/// only.
///
/// The list is not synchronized. Sharing it between threads requires an external lock around
/// every sequence of calls, and mutating it while an iterator is alive is prevented by the
/// borrow checker.
///
/// # Examples
/// ```
/// use skiplist_multiset::skiplist::SkipList;
///
/// let mut list = SkipList::new();
/// list.insert(3);
/// list.insert(1);
/// list.insert(3);
///
/// assert!(list.contains(&3));
/// assert_eq!(list.count(&3), 2);
/// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &3, &3]);
///
/// assert_eq!(list.remove(&3), Some(3));
/// assert_eq!(list.remove(&2), None);
/// assert_eq!(list.len(), 2);
/// ```
pub struct SkipList<T> {
    nodes: Arena<Node>,
    values: Arena<T>,
    // head sentinel of the top level
    head: Handle,
    // head sentinel of level 0
    bottom: Handle,
    tail: Handle,
    height: usize,
    rng: XorShiftRng,
    config: SkipListConfig,
}

impl<T> SkipList<T> {
    fn successor(&self, node: Handle) -> Handle {
        match self.nodes[node].next {
            Some(next) => next,
            None => panic!("Error: the tail sentinel has no successor."),
        }
    }

    fn key(&self, node: Handle) -> Option<&T> {
        match self.nodes[node].slot {
            Slot::Data(value) => Some(&self.values[value]),
            Slot::Head | Slot::Tail => None,
        }
    }

    /// Returns the number of levels above level 0.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let list: SkipList<u32> = SkipList::new();
    /// assert_eq!(list.height(), 0);
    /// ```
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the configuration the list was built with.
    pub fn config(&self) -> &SkipListConfig {
        &self.config
    }

    /// Returns `true` if the list is empty.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let list: SkipList<u32> = SkipList::new();
    /// assert!(list.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.successor(self.bottom) == self.tail
    }

    /// Returns the number of elements in the list, counting duplicates. The length is not cached,
    /// so this walks level 0.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(1);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns the minimum element of the list. Returns `None` if the list is empty.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(3);
    /// list.insert(1);
    /// assert_eq!(list.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.key(self.successor(self.bottom))
    }

    /// Returns the maximum element of the list. Returns `None` if the list is empty.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(3);
    /// list.insert(1);
    /// assert_eq!(list.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        let mut curr_node = self.head;
        loop {
            while self.key(self.successor(curr_node)).is_some() {
                curr_node = self.successor(curr_node);
            }
            match self.nodes[curr_node].down {
                Some(down) => curr_node = down,
                None => return self.key(curr_node),
            }
        }
    }

    /// Returns an iterator over level 0 of the list. The iterator yields every element in
    /// non-decreasing order, including duplicates.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(2);
    /// list.insert(1);
    ///
    /// let mut iterator = list.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter {
            list: self,
            curr_node: self.successor(self.bottom),
        }
    }
}

impl<T: Ord> SkipList<T> {
    /// Constructs a new, empty `SkipList<T>` with the default configuration.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let list: SkipList<u32> = SkipList::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(SkipListConfig::default())
    }

    /// Constructs a new, empty `SkipList<T>` with a particular configuration.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::{SkipList, SkipListConfig};
    ///
    /// let config = SkipListConfig::new(0.25, 16, Some([1, 1, 1, 1])).unwrap();
    /// let list: SkipList<u32> = SkipList::with_config(config);
    /// assert_eq!(list.config().get_max_height(), 16);
    /// ```
    pub fn with_config(config: SkipListConfig) -> Self {
        let mut nodes = Arena::new();
        let tail = nodes.allocate(Node::tail());
        let head = nodes.allocate(Node::head(tail, None));
        SkipList {
            nodes,
            values: Arena::new(),
            head,
            bottom: head,
            tail,
            height: 0,
            rng: config.build_rng(),
            config,
        }
    }

    fn gen_random_height(&mut self) -> usize {
        let mut height = 0;
        while height < self.config.get_max_height()
            && self.rng.next_f64() < self.config.get_probability()
        {
            height += 1;
        }
        height
    }

    // Moves right from `node` while the successor holds an element accepted by `advance`.
    fn walk<F>(&self, mut node: Handle, mut advance: F) -> Handle
    where
        F: FnMut(&T) -> bool,
    {
        loop {
            let next_node = self.successor(node);
            match self.key(next_node) {
                Some(key) if advance(key) => node = next_node,
                _ => return node,
            }
        }
    }

    // Stacks new head sentinels until the list is `new_height` levels tall. Returns the new heads
    // from the lowest to the highest.
    fn grow(&mut self, new_height: usize) -> Vec<Handle> {
        debug!("growing skiplist from height {} to {}", self.height, new_height);
        let mut heads = Vec::with_capacity(new_height - self.height);
        while self.height < new_height {
            let head = Node::head(self.tail, Some(self.head));
            self.head = self.nodes.allocate(head);
            heads.push(self.head);
            self.height += 1;
        }
        heads
    }

    // Discards top levels whose head sentinel points straight at the tail.
    fn guillotine(&mut self) {
        let old_height = self.height;
        while self.height > 0 && self.successor(self.head) == self.tail {
            let top_head = self.head;
            let top = self.nodes.free(top_head);
            match top.down {
                Some(down) => self.head = down,
                None => panic!("Error: head sentinel above level 0 has no down link."),
            }
            self.height -= 1;
        }
        if self.height < old_height {
            debug!("trimmed skiplist from height {} to {}", old_height, self.height);
        }
    }

    /// Inserts an element into the list. Equal elements are kept side by side; the position of
    /// the new element within a run of equal elements is unspecified.
    ///
    /// Every comparison happens before the list is modified, so a panicking `Ord` implementation
    /// leaves the list unchanged.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(1);
    /// assert_eq!(list.count(&1), 2);
    /// ```
    pub fn insert(&mut self, value: T) {
        let new_height = self.gen_random_height();
        trace!("inserting tower of height {}", new_height);

        // rightmost node not greater than `value` on every level the tower spans, top first
        let mut last_nodes = Vec::with_capacity(new_height + 1);
        let mut curr_node = self.head;
        let mut curr_height = self.height;
        loop {
            curr_node = self.walk(curr_node, |key| key <= &value);
            if curr_height <= new_height {
                last_nodes.push(curr_node);
            }
            match self.nodes[curr_node].down {
                Some(down) => {
                    curr_node = down;
                    curr_height -= 1;
                },
                None => break,
            }
        }

        last_nodes.reverse();
        if new_height > self.height {
            let heads = self.grow(new_height);
            last_nodes.extend(heads);
        }

        let value = self.values.allocate(value);
        let mut below = None;
        for last_node in last_nodes {
            let next_node = self.successor(last_node);
            let new_node = self.nodes.allocate(Node::data(value, next_node, below));
            self.nodes[last_node].next = Some(new_node);
            below = Some(new_node);
        }
    }

    /// Checks if an element exists in the list.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// assert!(!list.contains(&0));
    /// assert!(list.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let mut curr_node = self.head;
        loop {
            curr_node = self.walk(curr_node, |key| key < value);
            if self.key(self.successor(curr_node)) == Some(value) {
                return true;
            }
            match self.nodes[curr_node].down {
                Some(down) => curr_node = down,
                None => return false,
            }
        }
    }

    /// Returns the number of elements equal to `value`.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(2);
    /// list.insert(2);
    /// assert_eq!(list.count(&2), 2);
    /// assert_eq!(list.count(&3), 0);
    /// ```
    pub fn count(&self, value: &T) -> usize {
        let mut curr_node = self.head;
        loop {
            curr_node = self.walk(curr_node, |key| key < value);
            match self.nodes[curr_node].down {
                Some(down) => curr_node = down,
                None => break,
            }
        }
        let run = Iter {
            list: self,
            curr_node: self.successor(curr_node),
        };
        run.take_while(|key| *key == value).count()
    }

    /// Removes one element equal to `value` from the list and returns it. Returns `None`, leaving
    /// the list untouched, if no such element exists. Levels left empty by the removal are
    /// trimmed.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(1);
    /// assert_eq!(list.remove(&1), Some(1));
    /// assert_eq!(list.count(&1), 1);
    /// assert_eq!(list.remove(&0), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        // the tower is identified by the element handle of the first match on the highest level
        // that holds one
        let mut tower = None;
        let mut last_nodes = Vec::new();
        let mut curr_node = self.head;
        loop {
            curr_node = self.walk(curr_node, |key| key < value);
            if let Some(target) = tower {
                // step over equal elements that belong to other towers
                while let Slot::Data(next_value) = self.nodes[self.successor(curr_node)].slot {
                    if next_value == target {
                        break;
                    }
                    curr_node = self.successor(curr_node);
                }
            }

            if let Slot::Data(next_value) = self.nodes[self.successor(curr_node)].slot {
                if tower.is_none() && self.values[next_value] == *value {
                    tower = Some(next_value);
                }
                if tower == Some(next_value) {
                    last_nodes.push(curr_node);
                }
            }

            match self.nodes[curr_node].down {
                Some(down) => curr_node = down,
                None => break,
            }
        }

        let target = tower?;
        for last_node in last_nodes {
            let node = self.successor(last_node);
            let removed = self.nodes.free(node);
            self.nodes[last_node].next = removed.next;
        }
        self.guillotine();
        Some(self.values.free(target))
    }

    /// Retains only the elements accepted by `keep`. `keep` is called once per element, in
    /// ascending order, and every call happens before the list is modified, so a panic inside
    /// `keep` leaves the list unchanged. Levels left empty are trimmed.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list: SkipList<u32> = vec![1, 2, 2, 3, 4].into_iter().collect();
    /// list.retain(|value| value % 2 == 0);
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&2, &2, &4]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut doomed = HashSet::new();
        let mut curr_node = self.successor(self.bottom);
        while let Slot::Data(value) = self.nodes[curr_node].slot {
            if !keep(&self.values[value]) {
                doomed.insert(value);
            }
            curr_node = self.successor(curr_node);
        }
        if doomed.is_empty() {
            return;
        }

        let mut curr_head = Some(self.head);
        while let Some(head) = curr_head {
            let mut prev_node = head;
            loop {
                let next_node = self.successor(prev_node);
                match self.nodes[next_node].slot {
                    Slot::Data(value) if doomed.contains(&value) => {
                        let removed = self.nodes.free(next_node);
                        self.nodes[prev_node].next = removed.next;
                    },
                    Slot::Data(_) => prev_node = next_node,
                    Slot::Head | Slot::Tail => break,
                }
            }
            curr_head = self.nodes[head].down;
        }
        for value in doomed {
            self.values.free(value);
        }
        self.guillotine();
    }

    /// Clears the list, removing all elements. The configuration and the state of the height
    /// generator are kept.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(2);
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.height(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        let tail = self.nodes.allocate(Node::tail());
        self.tail = tail;
        self.head = self.nodes.allocate(Node::head(tail, None));
        self.bottom = self.head;
        self.height = 0;
    }

    /// Panics if any structural invariant of the list does not hold. Intended for tests; the
    /// check walks the entire structure.
    ///
    /// The invariants are: the head stack is `height + 1` sentinels tall and ends at level 0;
    /// the top level is non-empty unless the list is only level 0; every level is sorted and ends
    /// at the tail; every level is a subsequence of the level below it, with each node's down link
    /// pointing at the node of the same tower; every element belongs to exactly one level 0 node;
    /// and no node or element is leaked.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let mut heads = Vec::new();
        let mut curr_head = Some(self.head);
        while let Some(head) = curr_head {
            assert_eq!(self.nodes[head].slot, Slot::Head, "head stack contains a non-head node");
            heads.push(head);
            curr_head = self.nodes[head].down;
        }
        assert_eq!(heads.len(), self.height + 1, "head stack does not match the height");
        assert_eq!(heads.last(), Some(&self.bottom), "head stack does not end at level 0");
        if self.height > 0 {
            assert_ne!(self.successor(self.head), self.tail, "top level is empty");
        }

        // element handles of every level, from level 0 upward
        let mut levels: Vec<Vec<Handle>> = Vec::with_capacity(heads.len());
        for (index, &head) in heads.iter().enumerate().rev() {
            let level = self.height - index;
            let mut towers = Vec::new();
            let mut prev_key: Option<&T> = None;
            let mut curr_node = self.successor(head);
            loop {
                let node = &self.nodes[curr_node];
                match node.slot {
                    Slot::Tail => {
                        assert_eq!(curr_node, self.tail, "level {} ends at a foreign tail", level);
                        break;
                    },
                    Slot::Head => panic!("head sentinel inside level {}", level),
                    Slot::Data(value) => {
                        let key = &self.values[value];
                        if let Some(prev_key) = prev_key {
                            assert!(prev_key <= key, "level {} is not sorted", level);
                        }
                        prev_key = Some(key);
                        match node.down {
                            Some(down) => {
                                assert!(level > 0, "level 0 node has a down link");
                                assert_eq!(
                                    self.nodes[down].slot,
                                    Slot::Data(value),
                                    "down link on level {} leaves its tower",
                                    level,
                                );
                            },
                            None => assert_eq!(level, 0, "node on level {} has no down link", level),
                        }
                        towers.push(value);
                        curr_node = self.successor(curr_node);
                    },
                }
            }
            levels.push(towers);
        }

        for level in 1..levels.len() {
            let mut below = levels[level - 1].iter();
            for tower in &levels[level] {
                assert!(
                    below.any(|other| other == tower),
                    "level {} is not a subsequence of level {}",
                    level,
                    level - 1,
                );
            }
        }

        let unique: HashSet<&Handle> = levels[0].iter().collect();
        assert_eq!(unique.len(), levels[0].len(), "an element has two level 0 nodes");
        assert_eq!(levels[0].len(), self.values.len(), "element arena holds unlinked elements");
        let node_count: usize = levels.iter().map(Vec::len).sum::<usize>() + heads.len() + 1;
        assert_eq!(node_count, self.nodes.len(), "node arena holds unlinked nodes");
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<T: Ord> Extend<T> for SkipList<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> IntoIterator for SkipList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let curr_node = self.successor(self.bottom);
        IntoIter {
            list: self,
            curr_node,
        }
    }
}

impl<'a, T: 'a> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SkipList<T>`.
///
/// This iterator traverses level 0 of the list in ascending order and yields owned elements.
pub struct IntoIter<T> {
    list: SkipList<T>,
    curr_node: Handle,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.list.nodes[self.curr_node].slot {
            Slot::Data(value) => {
                self.curr_node = self.list.successor(self.curr_node);
                Some(self.list.values.free(value))
            },
            Slot::Head | Slot::Tail => None,
        }
    }
}

/// An iterator for `SkipList<T>`.
///
/// This iterator traverses level 0 of the list in ascending order and yields immutable
/// references. A new pass may be started at any time by calling `SkipList::iter` again.
pub struct Iter<'a, T: 'a> {
    list: &'a SkipList<T>,
    curr_node: Handle,
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        match list.nodes[self.curr_node].slot {
            Slot::Data(value) => {
                self.curr_node = list.successor(self.curr_node);
                Some(&list.values[value])
            },
            Slot::Head | Slot::Tail => None,
        }
    }
}

/// The clone draws its tower heights from a generator forked off the source's, so the two lists
/// do not grow identical shapes. Cloning a seeded list is still reproducible.
impl<T: Clone> Clone for SkipList<T> {
    fn clone(&self) -> Self {
        let mut rng = self.rng.clone();
        let mut seed = [0; 4];
        for word in &mut seed {
            *word = rng.next_u32().wrapping_mul(0x9e37_79b9).rotate_left(16);
        }
        if seed == [0; 4] {
            seed[0] = 1;
        }
        SkipList {
            nodes: self.nodes.clone(),
            values: self.values.clone(),
            head: self.head,
            bottom: self.bottom,
            tail: self.tail,
            height: self.height,
            rng: XorShiftRng::from_seed(seed),
            config: self.config.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders one line per level, from the top level down to level 0, as
/// `head -> v1 -> v2 -> ... -> tail`. The rendering is meant for diagnostics only.
impl<T: fmt::Display> fmt::Display for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut curr_head = Some(self.head);
        while let Some(head) = curr_head {
            write!(f, "head")?;
            let mut curr_node = self.successor(head);
            while let Some(key) = self.key(curr_node) {
                write!(f, " -> {}", key)?;
                curr_node = self.successor(curr_node);
            }
            write!(f, " -> tail")?;

            curr_head = self.nodes[head].down;
            if curr_head.is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SkipList;
    use crate::skiplist::SkipListConfig;
    use rand::Rng;
    use std::panic::{self, AssertUnwindSafe};

    fn seeded(seed: [u32; 4]) -> SkipList<u32> {
        SkipList::with_config(SkipListConfig::default().seed(seed).unwrap())
    }

    #[test]
    fn test_len_empty() {
        let list: SkipList<u32> = SkipList::new();
        assert_eq!(list.len(), 0);
        assert_eq!(list.height(), 0);
        list.assert_invariants();
    }

    #[test]
    fn test_is_empty() {
        let list: SkipList<u32> = SkipList::new();
        assert!(list.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let list: SkipList<u32> = SkipList::new();
        assert_eq!(list.min(), None);
        assert_eq!(list.max(), None);
    }

    #[test]
    fn test_contains_empty() {
        let list: SkipList<u32> = SkipList::new();
        assert!(!list.contains(&1));
        assert_eq!(list.count(&1), 0);
    }

    #[test]
    fn test_insert() {
        let mut list = SkipList::new();
        list.insert(1);
        assert!(list.contains(&1));
        assert!(!list.is_empty());
        list.assert_invariants();
    }

    #[test]
    fn test_insert_duplicates() {
        let mut list = seeded([1, 2, 3, 4]);
        for _ in 0..50 {
            list.insert(7);
        }
        list.insert(3);
        list.insert(9);
        list.assert_invariants();

        assert_eq!(list.count(&7), 50);
        assert_eq!(list.count(&3), 1);
        assert_eq!(list.len(), 52);
        assert_eq!(list.min(), Some(&3));
        assert_eq!(list.max(), Some(&9));
    }

    #[test]
    fn test_remove() {
        let mut list = SkipList::new();
        list.insert(1);
        assert_eq!(list.remove(&1), Some(1));
        assert!(!list.contains(&1));
        assert!(list.is_empty());
        list.assert_invariants();
    }

    #[test]
    fn test_remove_missing() {
        let mut list = SkipList::new();
        list.insert(1);
        list.insert(3);
        assert_eq!(list.remove(&2), None);
        assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
        list.assert_invariants();
    }

    #[test]
    fn test_remove_one_of_many() {
        let mut list = seeded([4, 3, 2, 1]);
        for value in &[5, 5, 5, 2, 8] {
            list.insert(*value);
        }
        assert_eq!(list.remove(&5), Some(5));
        assert_eq!(list.count(&5), 2);
        list.assert_invariants();
        assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&2, &5, &5, &8]);
    }

    #[test]
    fn test_remove_duplicates_keeps_towers_intact() {
        for seed in 1..20 {
            let mut list = seeded([seed, 1, 1, 1]);
            for value in 0..200 {
                list.insert(value % 4);
            }
            for value in 0..200 {
                assert_eq!(list.remove(&(value % 4)), Some(value % 4));
                list.assert_invariants();
            }
            assert!(list.is_empty());
        }
    }

    #[test]
    fn test_guillotine_to_level_zero() {
        let mut list = seeded([1, 1, 1, 1]);
        for value in 0..100 {
            list.insert(value);
        }
        assert!(list.height() > 0);
        for value in 0..100 {
            list.remove(&value);
            list.assert_invariants();
        }
        assert_eq!(list.height(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_max_height_caps_growth() {
        let config = SkipListConfig::new(0.99, 2, Some([1, 1, 1, 1])).unwrap();
        let mut list = SkipList::with_config(config);
        for value in 0..100 {
            list.insert(value);
        }
        assert!(list.height() <= 2);
        list.assert_invariants();
    }

    #[test]
    fn test_clear() {
        let mut list = seeded([1, 1, 1, 1]);
        for value in 0..10 {
            list.insert(value);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.height(), 0);
        list.assert_invariants();

        list.insert(1);
        assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1]);
        list.assert_invariants();
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut list = SkipList::new();
        list.insert(2);
        list.insert(1);
        list.insert(2);

        let first_pass: Vec<&u32> = list.iter().collect();
        let second_pass: Vec<&u32> = list.iter().collect();
        assert_eq!(first_pass, vec![&1, &2, &2]);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_into_iter() {
        let mut list = SkipList::new();
        list.insert(1);
        list.insert(5);
        list.insert(3);
        list.insert(3);

        assert_eq!(list.into_iter().collect::<Vec<u32>>(), vec![1, 3, 3, 5]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut list: SkipList<u32> = (0..20).collect();
        let copy = list.clone();
        list.remove(&3);
        list.insert(100);

        copy.assert_invariants();
        assert_eq!(copy.len(), 20);
        assert!(copy.contains(&3));
        assert!(!copy.contains(&100));
    }

    #[test]
    fn test_clone_forks_height_generator() {
        let mut list: SkipList<u32> = seeded([1, 1, 1, 1]);
        list.insert(1);
        let mut copy = list.clone();
        let mut other_copy = list.clone();

        let source: Vec<u32> = (0..8).map(|_| list.rng.next_u32()).collect();
        let forked: Vec<u32> = (0..8).map(|_| copy.rng.next_u32()).collect();
        let other_forked: Vec<u32> = (0..8).map(|_| other_copy.rng.next_u32()).collect();
        assert_ne!(source, forked);
        assert_eq!(forked, other_forked);
    }

    #[test]
    fn test_retain() {
        let mut list = seeded([1, 1, 1, 1]);
        for value in 0..100 {
            list.insert(value % 10);
        }
        list.retain(|value| *value >= 5);
        list.assert_invariants();
        assert_eq!(list.len(), 50);
        assert_eq!(list.min(), Some(&5));

        list.retain(|_| false);
        list.assert_invariants();
        assert!(list.is_empty());
        assert_eq!(list.height(), 0);
    }

    #[test]
    fn test_retain_panic_leaves_list_unchanged() {
        let mut list = seeded([1, 1, 1, 1]);
        for value in 0..20 {
            list.insert(value);
        }
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            list.retain(|value| {
                assert!(*value != 10, "rejecting {}", value);
                value % 2 == 0
            })
        }));
        assert!(result.is_err());
        list.assert_invariants();
        assert_eq!(list.iter().cloned().collect::<Vec<u32>>(), (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_display_empty() {
        let list: SkipList<u32> = SkipList::new();
        assert_eq!(list.to_string(), "head -> tail");
    }

    #[test]
    fn test_display() {
        let mut list = seeded([1, 1, 1, 1]);
        for value in &[3, 1, 2] {
            list.insert(*value);
        }

        let rendered = list.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), list.height() + 1);
        assert_eq!(lines[lines.len() - 1], "head -> 1 -> 2 -> 3 -> tail");
        for line in lines {
            assert!(line.starts_with("head"));
            assert!(line.ends_with(" -> tail"));
        }
    }

    #[test]
    fn test_debug() {
        let list: SkipList<u32> = vec![2, 1, 2].into_iter().collect();
        assert_eq!(format!("{:?}", list), "[1, 2, 2]");
    }
}
