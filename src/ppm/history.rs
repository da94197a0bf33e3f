//! Bounded window of the most recently coded literals.

use std::collections::VecDeque;

use super::ModelOrder;

/// The last `N` literals, oldest first.
///
/// Only literals are ever pushed; the end marker terminates a stream and is
/// never part of a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    symbols: VecDeque<u8>,
    capacity: usize,
}

impl History {
    pub fn new(order: ModelOrder) -> Self {
        let capacity = order.history_len();
        Self {
            symbols: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a literal, evicting the oldest one when full. A zero-capacity
    /// history (orders -1 and 0) stays empty.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        if self.capacity == 0 {
            return;
        }
        if self.symbols.len() == self.capacity {
            self.symbols.pop_front();
        }
        self.symbols.push_back(byte);
    }

    /// The trailing `len` symbols, oldest to newest.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`History::len`].
    #[inline]
    pub fn suffix(&self, len: usize) -> impl Iterator<Item = u8> + '_ {
        let start = self.symbols.len() - len;
        self.symbols.range(start..).copied()
    }

    /// Whole window, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.symbols.iter().copied()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}
