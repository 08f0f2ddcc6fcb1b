//! Resizable array with explicit capacity policy and element destructors.
//!
//! # Growth
//!
//! Capacity is always a power of two, never below [`MIN_CAPACITY`]. When an
//! insertion needs `n` more slots than the current capacity holds, capacity
//! doubles until it fits and the buffer is reallocated once. Requests above
//! [`MAX_CAPACITY`] fail without touching the container. Capacity never
//! shrinks implicitly.
//!
//! # Shifting
//!
//! Insertion at position `p` moves the block `[p, size)` one slot later;
//! removal at `p` moves `[p + 1, size)` one slot earlier. Both are single
//! overlapping block moves, not element swaps.
//!
//! # Ownership
//!
//! An optional [`Destructor`] receives every element that is erased, popped,
//! cleared, or still present when the array is destroyed. Extraction moves the
//! element to the caller instead, and the destructor is not invoked for it.

use std::cmp::Ordering;
use std::fmt;

/// Smallest capacity any array is created with.
pub const MIN_CAPACITY: usize = 16;

/// Hard ceiling on capacity: `2^(usize::BITS - 8)` elements.
pub const MAX_CAPACITY: usize = 1 << (usize::BITS - 8);

/// Per-element destructor. Called exactly once for each destroyed element.
pub type Destructor<T> = Box<dyn FnMut(T)>;

/// Errors reported by [`DynArray`] operations.
///
/// A failed operation leaves the array exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynArrayError {
    /// Requested capacity exceeds [`MAX_CAPACITY`].
    CapacityExceeded {
        /// Number of slots that were needed.
        requested: usize,
    },
    /// The allocator could not provide the grown buffer.
    AllocationFailed {
        /// Capacity that was being allocated.
        requested: usize,
    },
    /// The operation needs at least one element.
    Empty,
    /// Index outside the valid range for the operation.
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Array size at the time of the call.
        size: usize,
    },
}

impl fmt::Display for DynArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { requested } => write!(
                f,
                "requested capacity {requested} exceeds maximum {MAX_CAPACITY}"
            ),
            Self::AllocationFailed { requested } => {
                write!(f, "failed to allocate capacity for {requested} elements")
            }
            Self::Empty => write!(f, "array is empty"),
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "index {index} out of bounds for array of size {size}")
            }
        }
    }
}

impl std::error::Error for DynArrayError {}

/// A resizable array of `T` with power-of-two growth and optional destructor.
///
/// # Example
///
/// ```
/// use u_procsched::collections::DynArray;
///
/// let mut array = DynArray::new();
/// array.push_back(2).unwrap();
/// array.push_front(1).unwrap();
/// array.insert(2, 3).unwrap();
///
/// assert_eq!(array.as_slice(), &[1, 2, 3]);
/// assert_eq!(array.capacity(), 16);
/// assert_eq!(array.extract_front(), Ok(1));
/// ```
pub struct DynArray<T> {
    data: Vec<T>,
    capacity: usize,
    destructor: Option<Destructor<T>>,
}

impl<T> DynArray<T> {
    /// Creates an empty array with [`MIN_CAPACITY`] and no destructor.
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(MIN_CAPACITY),
            capacity: MIN_CAPACITY,
            destructor: None,
        }
    }

    /// Creates an empty array able to hold at least `capacity` elements.
    ///
    /// The actual capacity is the smallest power of two that is
    /// `>= max(MIN_CAPACITY, capacity)`.
    pub fn create(
        capacity: usize,
        destructor: Option<Destructor<T>>,
    ) -> Result<Self, DynArrayError> {
        if capacity > MAX_CAPACITY {
            return Err(DynArrayError::CapacityExceeded {
                requested: capacity,
            });
        }

        let actual = capacity.max(MIN_CAPACITY).next_power_of_two();
        let mut data = Vec::new();
        data.try_reserve_exact(actual)
            .map_err(|_| DynArrayError::AllocationFailed { requested: actual })?;

        Ok(Self {
            data,
            capacity: actual,
            destructor,
        })
    }

    /// Number of stored elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current capacity (always a power of two).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Whether a destructor is installed.
    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }

    /// First element, or `None` when empty.
    pub fn front(&self) -> Option<&T> {
        self.data.first()
    }

    /// Mutable first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.data.first_mut()
    }

    /// Last element, or `None` when empty.
    pub fn back(&self) -> Option<&T> {
        self.data.last()
    }

    /// Mutable last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.data.last_mut()
    }

    /// Element at `index`, or `None` outside `[0, size)`.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Mutable element at `index`.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Elements in order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the elements.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates front to back.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterates front to back, mutably.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Ensures room for `additional` more elements, growing by doubling.
    ///
    /// # Errors
    /// `CapacityExceeded` if the result would pass [`MAX_CAPACITY`],
    /// `AllocationFailed` if reallocation fails. The array is unchanged
    /// on error.
    pub fn reserve(&mut self, additional: usize) -> Result<(), DynArrayError> {
        let size = self.data.len();
        let needed = size
            .checked_add(additional)
            .ok_or(DynArrayError::CapacityExceeded {
                requested: usize::MAX,
            })?;

        if self.capacity >= needed {
            return Ok(());
        }
        if needed > MAX_CAPACITY {
            return Err(DynArrayError::CapacityExceeded { requested: needed });
        }

        let mut new_capacity = self.capacity << 1;
        while new_capacity < needed {
            new_capacity <<= 1;
        }

        self.data
            .try_reserve_exact(new_capacity - size)
            .map_err(|_| DynArrayError::AllocationFailed {
                requested: new_capacity,
            })?;

        log::trace!(
            "dyn_array: grew capacity {} -> {}",
            self.capacity,
            new_capacity
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Inserts `value` at the front, shifting every element one slot later.
    pub fn push_front(&mut self, value: T) -> Result<(), DynArrayError> {
        self.insert(0, value)
    }

    /// Appends `value` at the back.
    pub fn push_back(&mut self, value: T) -> Result<(), DynArrayError> {
        self.reserve(1)?;
        self.data.push(value);
        Ok(())
    }

    /// Inserts `value` at `index`, shifting `[index, size)` one slot later.
    ///
    /// `index == size` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        let size = self.data.len();
        if index > size {
            return Err(DynArrayError::IndexOutOfBounds { index, size });
        }
        self.reserve(1)?;
        self.data.insert(index, value);
        Ok(())
    }

    /// Removes and destructs the first element.
    pub fn pop_front(&mut self) -> Result<(), DynArrayError> {
        self.erase(0)
    }

    /// Removes and destructs the last element.
    pub fn pop_back(&mut self) -> Result<(), DynArrayError> {
        let value = self.data.pop().ok_or(DynArrayError::Empty)?;
        self.destruct(value);
        Ok(())
    }

    /// Removes and destructs the element at `index`, closing the gap.
    pub fn erase(&mut self, index: usize) -> Result<(), DynArrayError> {
        let value = self.extract(index)?;
        self.destruct(value);
        Ok(())
    }

    /// Moves the first element out without destructing it.
    pub fn extract_front(&mut self) -> Result<T, DynArrayError> {
        self.extract(0)
    }

    /// Moves the last element out without destructing it.
    pub fn extract_back(&mut self) -> Result<T, DynArrayError> {
        self.data.pop().ok_or(DynArrayError::Empty)
    }

    /// Moves the element at `index` out without destructing it.
    ///
    /// Later elements shift one slot earlier.
    pub fn extract(&mut self, index: usize) -> Result<T, DynArrayError> {
        let size = self.data.len();
        if size == 0 {
            return Err(DynArrayError::Empty);
        }
        if index >= size {
            return Err(DynArrayError::IndexOutOfBounds { index, size });
        }
        Ok(self.data.remove(index))
    }

    /// Destructs and removes every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        match self.destructor.as_mut() {
            Some(destructor) => self.data.drain(..).for_each(|value| destructor(value)),
            None => self.data.clear(),
        }
    }

    /// Sorts in place with a three-way comparator. Not stable.
    pub fn sort<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.data.sort_unstable_by(compare);
    }

    /// Inserts `value` after every element that compares strictly less.
    ///
    /// The array must already be sorted by `compare`; otherwise the
    /// insertion position is unspecified.
    pub fn insert_sorted<F>(&mut self, value: T, mut compare: F) -> Result<(), DynArrayError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let position = self
            .data
            .iter()
            .position(|existing| compare(&value, existing) != Ordering::Greater)
            .unwrap_or(self.data.len());
        self.insert(position, value)
    }

    /// Applies `f` to every element in index order.
    pub fn for_each<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.data.iter_mut().for_each(f);
    }

    /// Moves every element out without destructing them.
    pub fn into_vec(mut self) -> Vec<T> {
        std::mem::take(&mut self.data)
    }

    /// Destructs all remaining elements and releases the buffer.
    ///
    /// Equivalent to dropping the array.
    pub fn destroy(self) {
        drop(self);
    }

    fn destruct(&mut self, value: T) {
        if let Some(destructor) = self.destructor.as_mut() {
            destructor(value);
        }
    }
}

impl<T: Clone> DynArray<T> {
    /// Creates an array holding a copy of `items`.
    ///
    /// The caller keeps ownership of the source slice.
    pub fn import(items: &[T], destructor: Option<Destructor<T>>) -> Result<Self, DynArrayError> {
        let mut array = Self::create(items.len(), destructor)?;
        array.data.extend_from_slice(items);
        Ok(array)
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("size", &self.data.len())
            .field("capacity", &self.capacity)
            .field("destructor", &self.destructor.is_some())
            .field("data", &self.data)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
