//! Buffer: contiguous storage of same-size elements with granular growth.
//!
//! Capacity grows in multiples of [`GROWTH_GRANULARITY`] and never shrinks
//! except through [`Buffer::clear`], which releases the allocation. Positional
//! insert and remove shift the tail of the buffer by one slot.

use crate::error::BufferError;
use crate::ladder::{round_capacity, GROWTH_GRANULARITY};
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Index, IndexMut};

pub struct Buffer<T> {
    data: Vec<T>,
    // Logical capacity; `data` always has at least this much room.
    capacity: usize,
}

impl<T> Buffer<T> {
    /// An empty, unallocated buffer.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    #[track_caller]
    pub fn with_capacity(n: usize) -> Self {
        let mut b = Self::new();
        b.reserve(n);
        b
    }

    /// Logical element count.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`len`](Self::len) for callers written against the sequence contract.
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated element count; always a multiple of 4.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size in bytes of one element.
    #[inline]
    pub const fn element_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    /// Ensure room for at least `n` elements. No-op when `n <= capacity`.
    ///
    /// Panics when the rounded capacity does not fit in a `usize`.
    #[track_caller]
    pub fn reserve(&mut self, n: usize) {
        if n <= self.capacity {
            return;
        }
        let Some(target) = round_capacity(n) else {
            fatal(BufferError::CapacityOverflow { requested: n })
        };
        debug_assert_eq!(target % GROWTH_GRANULARITY, 0);
        self.data.reserve_exact(target - self.data.len());
        self.capacity = target;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Element at `index`. Panics when `index >= len`.
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        match self.data.get(index) {
            Some(v) => v,
            None => fatal(self.out_of_range(index)),
        }
    }

    /// Overwrite the element at `index`, returning the previous value.
    pub fn try_set(&mut self, index: usize, value: T) -> Result<T, BufferError> {
        let err = self.out_of_range(index);
        match self.data.get_mut(index) {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(err),
        }
    }

    /// Overwrite the element at `index`. Panics when `index >= len`.
    #[track_caller]
    pub fn set(&mut self, index: usize, value: T) -> T {
        match self.try_set(index, value) {
            Ok(old) => old,
            Err(e) => fatal(e),
        }
    }

    /// Append `value` and return the index it was written at.
    #[track_caller]
    pub fn add(&mut self, value: T) -> usize {
        let index = self.data.len();
        self.reserve(index + 1);
        self.data.push(value);
        index
    }

    /// Insert `value` at `index`, shifting `[index, len)` up by one.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), BufferError> {
        let len = self.data.len();
        if index > len {
            return Err(BufferError::IndexOutOfRange { index, len });
        }
        self.reserve(len + 1);
        self.data.insert(index, value);
        Ok(())
    }

    /// Insert `value` at `index`. Panics when `index > len`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(e) = self.try_insert(index, value) {
            fatal(e)
        }
    }

    /// Remove the element at `index`, shifting `(index, len)` down by one.
    pub fn try_remove(&mut self, index: usize) -> Result<T, BufferError> {
        if index >= self.data.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.data.remove(index))
    }

    /// Remove the element at `index`. Panics when `index >= len`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        match self.try_remove(index) {
            Ok(v) => v,
            Err(e) => fatal(e),
        }
    }

    /// Exchange two elements. Panics when either index is out of range.
    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        let len = self.data.len();
        for index in [a, b] {
            if index >= len {
                fatal(BufferError::IndexOutOfRange { index, len });
            }
        }
        self.data.swap(a, b);
    }

    /// Drop every element and release the allocation.
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.capacity = 0;
    }

    /// Reorder `[0, len)` by `compare`. Equal elements may be reordered.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.data.sort_unstable_by(compare);
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.data.sort_unstable();
    }

    /// Index of the first element equal to `value`.
    pub fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|v| v == value)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    fn out_of_range(&self, index: usize) -> BufferError {
        BufferError::IndexOutOfRange {
            index,
            len: self.data.len(),
        }
    }
}

#[cold]
#[track_caller]
fn fatal(e: BufferError) -> ! {
    panic!("{e}")
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T> IndexMut<usize> for Buffer<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let err = self.out_of_range(index);
        match self.data.get_mut(index) {
            Some(v) => v,
            None => fatal(err),
        }
    }
}

impl<T> Extend<T> for Buffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len().saturating_add(lower));
        for v in iter {
            self.add(v);
        }
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut b = Buffer::new();
        b.extend(iter);
        b
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Buffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
