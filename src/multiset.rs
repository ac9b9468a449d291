//! Ordered collection of elements that may occur more than once.

use crate::skiplist::{IntoIter as ListIntoIter, Iter, SkipList, SkipListConfig};
use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, Peekable};
use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, Sub, SubAssign};

/// An ordered multiset implemented by a skiplist.
///
/// A multiset is a set in which an element may occur more than once; `{1, 1, 2}` and `{1, 2}`
/// are different multisets. The number of occurrences of an element is its multiplicity. Elements
/// are kept in ascending order, so iteration, equality, and the set-algebra operations are
/// sorted merges over the bottom level of the underlying skiplist.
///
/// The element count is not cached: `len` walks the collection.
///
/// # Examples
/// ```
/// use skiplist_multiset::MultiSet;
///
/// let mut set: MultiSet<u32> = vec![1, 2, 3, 3].into_iter().collect();
/// assert_eq!(set.count(&3), 2);
/// assert!(set.contains(&1));
///
/// set.remove(&3);
/// assert_eq!(set.to_string(), "MultiSet([1, 2, 3])");
///
/// let other: MultiSet<u32> = vec![3, 4].into_iter().collect();
/// assert_eq!((&set & &other).to_string(), "MultiSet([3])");
/// assert_eq!((&set - &other).to_string(), "MultiSet([1, 2])");
/// assert_eq!((&set + &other).to_string(), "MultiSet([1, 2, 3, 3, 4])");
/// ```
#[derive(Clone)]
pub struct MultiSet<T> {
    list: SkipList<T>,
}

impl<T> MultiSet<T> {
    /// Returns the number of elements in the multiset, counting every occurrence.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let set: MultiSet<u32> = vec![1, 2, 3, 3, 4, 5].into_iter().collect();
    /// assert_eq!(set.len(), 6);
    /// ```
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the multiset is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns an iterator over the multiset. The iterator yields every occurrence of every
    /// element in ascending order.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let set: MultiSet<u32> = vec![2, 1, 2].into_iter().collect();
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &2]);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        self.list.iter()
    }

    /// Returns the skiplist backing the multiset.
    pub fn as_skiplist(&self) -> &SkipList<T> {
        &self.list
    }
}

impl<T: Ord> MultiSet<T> {
    /// Constructs a new, empty `MultiSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let set: MultiSet<u32> = MultiSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        MultiSet {
            list: SkipList::new(),
        }
    }

    /// Constructs a new, empty `MultiSet<T>` whose skiplist uses a particular configuration.
    pub fn with_config(config: SkipListConfig) -> Self {
        MultiSet {
            list: SkipList::with_config(config),
        }
    }

    /// Inserts one occurrence of an element.
    pub fn insert(&mut self, value: T) {
        self.list.insert(value);
    }

    /// Removes one occurrence of an element and returns it. Returns `None` if the element is not
    /// in the multiset.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let mut set: MultiSet<u32> = vec![1, 4, 4].into_iter().collect();
    /// assert_eq!(set.remove(&4), Some(4));
    /// assert_eq!(set.remove(&5), None);
    /// assert_eq!(set.count(&4), 1);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.list.remove(value)
    }

    /// Checks if an element occurs at least once.
    pub fn contains(&self, value: &T) -> bool {
        self.list.contains(value)
    }

    /// Returns the multiplicity of an element, which is zero if it does not occur.
    pub fn count(&self, value: &T) -> usize {
        self.list.count(value)
    }

    /// Clears the multiset, removing all elements.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Returns a lazy iterator over the multiset intersection of `self` and `other`. An element
    /// is yielded as many times as the smaller of its two multiplicities.
    pub fn iter_intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, T> {
        Intersection {
            left: self.iter().peekable(),
            right: other.iter().peekable(),
        }
    }

    /// Returns a lazy iterator over the multiset difference of `self` and `other`. Every
    /// occurrence in `other` cancels at most one equal occurrence in `self`.
    pub fn iter_difference<'a>(&'a self, other: &'a Self) -> Difference<'a, T> {
        Difference {
            left: self.iter().peekable(),
            right: other.iter().peekable(),
        }
    }

    /// Removes one occurrence from `self` for every occurrence in `other`. Elements of `other`
    /// that are missing from `self` are ignored.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let mut n: MultiSet<u32> = vec![1, 2, 2, 3].into_iter().collect();
    /// let m: MultiSet<u32> = vec![2, 3, 9].into_iter().collect();
    /// n.difference_in_place(&m);
    /// assert_eq!(n.to_string(), "MultiSet([1, 2])");
    /// ```
    pub fn difference_in_place(&mut self, other: &Self) {
        for value in other {
            self.list.remove(value);
        }
    }

    /// Keeps only the occurrences of `self` that are matched by an occurrence in `other`.
    ///
    /// The matches are decided before any occurrence is removed, so a panicking `Ord`
    /// implementation leaves `self` unchanged.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let mut n: MultiSet<u32> = vec![1, 2, 3, 3].into_iter().collect();
    /// let m: MultiSet<u32> = vec![4, 5, 3, 3].into_iter().collect();
    /// n.intersection_in_place(&m);
    /// assert_eq!(n.to_string(), "MultiSet([3, 3])");
    /// ```
    pub fn intersection_in_place(&mut self, other: &Self) {
        let mut right = other.iter().peekable();
        self.list.retain(|value| loop {
            match right.peek().map(|next| (*next).cmp(value)) {
                Some(Ordering::Less) => {
                    right.next();
                },
                Some(Ordering::Equal) => {
                    right.next();
                    return true;
                },
                Some(Ordering::Greater) | None => return false,
            }
        });
    }

    /// Returns `true` if `self` and `other` have no element in common.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let n: MultiSet<u32> = vec![1, 2].into_iter().collect();
    /// let m: MultiSet<u32> = vec![3, 4].into_iter().collect();
    /// assert!(n.is_disjoint(&m));
    /// ```
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter_intersection(other).next().is_none()
    }

    /// Returns `true` if every element occurs in `other` at least as many times as in `self`.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let n: MultiSet<u32> = vec![2, 2, 2].into_iter().collect();
    /// let m: MultiSet<u32> = vec![1, 2, 3].into_iter().collect();
    /// assert!(!n.is_subset(&m));
    /// assert!(n <= n);
    /// ```
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter_difference(other).next().is_none()
    }

    /// Returns `true` if every element occurs in `self` at least as many times as in `other`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }
}

impl<T: Ord + Clone> MultiSet<T> {
    /// Inserts one occurrence into `self` for every occurrence in `other`.
    pub fn union_in_place(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        for value in other {
            self.list.insert(value.clone());
        }
    }

    /// Returns the multiset union of `self` and `other`, where the multiplicities of the two
    /// multisets add up. Neither operand is modified. The `+` operator is implemented to take
    /// the union of two multisets.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let n: MultiSet<u32> = vec![1, 2].into_iter().collect();
    /// let m: MultiSet<u32> = vec![2, 3].into_iter().collect();
    /// assert_eq!(n.union(&m).to_string(), "MultiSet([1, 2, 2, 3])");
    /// assert_eq!(n.len(), 2);
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        let mut ret = self.clone();
        ret.union_in_place(other);
        ret
    }

    /// Returns the multiset intersection of `self` and `other`. Neither operand is modified. The
    /// `&` operator is implemented to take the intersection of two multisets.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let n: MultiSet<u32> = vec![1, 2, 3, 3].into_iter().collect();
    /// let m: MultiSet<u32> = vec![4, 5, 3, 3].into_iter().collect();
    /// assert_eq!(n.intersection(&m).to_string(), "MultiSet([3, 3])");
    /// ```
    pub fn intersection(&self, other: &Self) -> Self {
        let mut ret = MultiSet::with_config(self.list.config().clone());
        ret.extend(self.iter_intersection(other).cloned());
        ret
    }

    /// Returns the multiset difference of `self` and `other`. Neither operand is modified. The
    /// `-` operator is implemented to take the difference of two multisets.
    ///
    /// # Examples
    /// ```
    /// use skiplist_multiset::MultiSet;
    ///
    /// let n: MultiSet<u32> = vec![1, 2, 3, 4].into_iter().collect();
    /// let m: MultiSet<u32> = vec![4, 3, 2, 1, 9, 9, 9].into_iter().collect();
    /// assert!(n.difference(&m).is_empty());
    /// assert_eq!(n.len(), 4);
    /// ```
    pub fn difference(&self, other: &Self) -> Self {
        let mut ret = self.clone();
        ret.difference_in_place(other);
        ret
    }
}

/// A lazy iterator over the intersection of two multisets, in ascending order.
pub struct Intersection<'a, T: 'a> {
    left: Peekable<Iter<'a, T>>,
    right: Peekable<Iter<'a, T>>,
}

impl<'a, T: 'a + Ord> Iterator for Intersection<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ordering = match (self.left.peek(), self.right.peek()) {
                (Some(left), Some(right)) => left.cmp(right),
                _ => return None,
            };
            match ordering {
                Ordering::Less => {
                    self.left.next();
                },
                Ordering::Greater => {
                    self.right.next();
                },
                Ordering::Equal => {
                    self.right.next();
                    return self.left.next();
                },
            }
        }
    }
}

/// A lazy iterator over the difference of two multisets, in ascending order.
pub struct Difference<'a, T: 'a> {
    left: Peekable<Iter<'a, T>>,
    right: Peekable<Iter<'a, T>>,
}

impl<'a, T: 'a + Ord> Iterator for Difference<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        'left: loop {
            let left = self.left.next()?;
            loop {
                match self.right.peek().map(|right| (*right).cmp(left)) {
                    Some(Ordering::Less) => {
                        self.right.next();
                    },
                    Some(Ordering::Equal) => {
                        self.right.next();
                        continue 'left;
                    },
                    Some(Ordering::Greater) | None => return Some(left),
                }
            }
        }
    }
}

impl<T: Ord> Default for MultiSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for MultiSet<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = MultiSet::new();
        set.extend(iter);
        set
    }
}

/// Inserts every element of the iterator in order. If an `Ord` implementation panics, the
/// elements before the failing one remain inserted.
impl<T: Ord> Extend<T> for MultiSet<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.list.extend(iter);
    }
}

impl<T> IntoIterator for MultiSet<T> {
    type Item = T;
    type IntoIter = ListIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a, T: 'a> IntoIterator for &'a MultiSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> PartialEq for MultiSet<T> {
    fn eq(&self, other: &MultiSet<T>) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => self.iter().eq(other.iter()),
        }
    }
}

impl<T: Ord> Eq for MultiSet<T> {}

/// Multisets are partially ordered by inclusion: `a <= b` holds if `a` is a sub-multiset of `b`.
impl<T: Ord> PartialOrd for MultiSet<T> {
    fn partial_cmp(&self, other: &MultiSet<T>) -> Option<Ordering> {
        match (self.is_subset(other), other.is_subset(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl<'a, 'b, T: Ord + Clone> Add<&'b MultiSet<T>> for &'a MultiSet<T> {
    type Output = MultiSet<T>;

    fn add(self, other: &'b MultiSet<T>) -> MultiSet<T> {
        self.union(other)
    }
}

impl<'a, 'b, T: Ord + Clone> Sub<&'b MultiSet<T>> for &'a MultiSet<T> {
    type Output = MultiSet<T>;

    fn sub(self, other: &'b MultiSet<T>) -> MultiSet<T> {
        self.difference(other)
    }
}

impl<'a, 'b, T: Ord + Clone> BitAnd<&'b MultiSet<T>> for &'a MultiSet<T> {
    type Output = MultiSet<T>;

    fn bitand(self, other: &'b MultiSet<T>) -> MultiSet<T> {
        self.intersection(other)
    }
}

impl<'a, T: Ord + Clone> AddAssign<&'a MultiSet<T>> for MultiSet<T> {
    fn add_assign(&mut self, other: &'a MultiSet<T>) {
        self.union_in_place(other);
    }
}

impl<'a, T: Ord> SubAssign<&'a MultiSet<T>> for MultiSet<T> {
    fn sub_assign(&mut self, other: &'a MultiSet<T>) {
        self.difference_in_place(other);
    }
}

impl<'a, T: Ord> BitAndAssign<&'a MultiSet<T>> for MultiSet<T> {
    fn bitand_assign(&mut self, other: &'a MultiSet<T>) {
        self.intersection_in_place(other);
    }
}

impl<T: fmt::Display> fmt::Display for MultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MultiSet([")?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "])")
    }
}

impl<T: fmt::Debug> fmt::Debug for MultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MultiSet(")?;
        f.debug_list().entries(self.iter()).finish()?;
        write!(f, ")")
    }
}
