//! Frequency tables consumed by the arithmetic coder.

use super::{ESCAPE_SYMBOL, SYMBOL_LIMIT};

/// Largest total a context table may reach before its counts are halved.
///
/// Well below the coder's `MAX_TOTAL`, so every table stays codable. The
/// policy is shared by the encoder and the decoder.
pub const MAX_CONTEXT_TOTAL: u32 = 1 << 16;

/// Cumulative distribution over symbol indices `0..symbol_limit()`.
///
/// Cumulative bounds are taken in increasing symbol order; the encoder and the
/// decoder must see the same table to stay in sync.
pub trait FrequencyTable {
    /// Number of symbol slots.
    fn symbol_limit(&self) -> u32;

    /// Count of a single symbol (0 when it has never been seen).
    fn get(&self, symbol: u32) -> u32;

    /// Sum of all counts.
    fn total(&self) -> u32;

    /// Cumulative `(low, high)` bounds of a symbol. Zero width when its
    /// count is 0.
    fn interval(&self, symbol: u32) -> (u32, u32);

    /// Find the symbol whose interval contains `value`, returned together
    /// with its bounds. `None` when `value >= total()`.
    fn locate(&self, value: u32) -> Option<(u32, u32, u32)>;
}

/// Adaptive table of one context node.
///
/// Stored sparsely: most high-order contexts only ever see a handful of
/// symbols. Entries are kept sorted by symbol and never hold a zero count.
#[derive(Debug, Clone)]
pub struct ContextFrequencies {
    entries: Vec<(u16, u32)>,
    total: u32,
}

impl ContextFrequencies {
    /// A fresh context: only the escape slot, with count 1.
    pub fn new() -> Self {
        Self {
            entries: vec![(ESCAPE_SYMBOL as u16, 1)],
            total: 1,
        }
    }

    /// Number of distinct symbols (escape included) with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Increment the count of `symbol`, halving the table first if the
    /// increment would exceed [`MAX_CONTEXT_TOTAL`].
    pub fn increment(&mut self, symbol: u32) {
        debug_assert!(symbol < SYMBOL_LIMIT);
        if self.total >= MAX_CONTEXT_TOTAL {
            self.halve();
        }

        let key = symbol as u16;
        match self.entries.binary_search_by_key(&key, |&(s, _)| s) {
            Ok(i) => self.entries[i].1 += 1,
            Err(i) => self.entries.insert(i, (key, 1)),
        }
        self.total += 1;
    }

    fn halve(&mut self) {
        let before = self.total;
        let mut total = 0;
        for entry in &mut self.entries {
            entry.1 = (entry.1 + 1) >> 1;
            total += entry.1;
        }
        self.total = total;
        tracing::debug!(before, after = total, "rescaled context frequencies");
    }
}

impl Default for ContextFrequencies {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable for ContextFrequencies {
    fn symbol_limit(&self) -> u32 {
        SYMBOL_LIMIT
    }

    fn get(&self, symbol: u32) -> u32 {
        self.entries
            .binary_search_by_key(&(symbol as u16), |&(s, _)| s)
            .map(|i| self.entries[i].1)
            .unwrap_or(0)
    }

    fn total(&self) -> u32 {
        self.total
    }

    fn interval(&self, symbol: u32) -> (u32, u32) {
        let mut low = 0;
        for &(s, count) in &self.entries {
            let s = u32::from(s);
            if s == symbol {
                return (low, low + count);
            }
            if s > symbol {
                break;
            }
            low += count;
        }
        (low, low)
    }

    fn locate(&self, value: u32) -> Option<(u32, u32, u32)> {
        let mut low = 0;
        for &(s, count) in &self.entries {
            let high = low + count;
            if value < high {
                return Some((u32::from(s), low, high));
            }
            low = high;
        }
        None
    }
}

/// Fixed uniform table used at order -1: every slot has count 1.
#[derive(Debug, Clone, Copy)]
pub struct FlatFrequencies {
    limit: u32,
}

impl FlatFrequencies {
    pub fn new(limit: u32) -> Self {
        assert!(limit > 0, "flat table needs at least one symbol");
        Self { limit }
    }
}

impl Default for FlatFrequencies {
    fn default() -> Self {
        Self::new(SYMBOL_LIMIT)
    }
}

impl FrequencyTable for FlatFrequencies {
    fn symbol_limit(&self) -> u32 {
        self.limit
    }

    fn get(&self, symbol: u32) -> u32 {
        u32::from(symbol < self.limit)
    }

    fn total(&self) -> u32 {
        self.limit
    }

    fn interval(&self, symbol: u32) -> (u32, u32) {
        if symbol < self.limit {
            (symbol, symbol + 1)
        } else {
            (self.limit, self.limit)
        }
    }

    fn locate(&self, value: u32) -> Option<(u32, u32, u32)> {
        (value < self.limit).then_some((value, value, value + 1))
    }
}
