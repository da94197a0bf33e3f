//! Shared PPM model: symbols, model order, frequency tables, the context trie
//! and the arithmetic coder state used by both directions.
//!
//! ## Alphabet
//!
//! | Index | Context tables | Order -1 table |
//! |-------|----------------|----------------|
//! | `0..=255` | literal byte | literal byte |
//! | `256` | escape ([`ESCAPE_SYMBOL`]) | end marker ([`END_OF_STREAM`]) |
//!
//! The order -1 table has no escape slot, which is what bounds the escape
//! cascade: every symbol is resolved after at most `N + 2` table lookups.

mod frequency;
mod history;
mod model;
pub(crate) mod range_coder;

pub use frequency::{ContextFrequencies, FlatFrequencies, FrequencyTable, MAX_CONTEXT_TOTAL};
pub use history::History;
pub use model::{ContextModel, NodeId};

use std::fmt;
use std::str::FromStr;

use crate::error::{PpmError, Result};

/// Number of slots in every frequency table (256 literals plus one).
pub const SYMBOL_LIMIT: u32 = 257;

/// Slot reserved in every context table (orders >= 0) for the escape symbol.
pub const ESCAPE_SYMBOL: u32 = 256;

/// Slot of the order -1 table that marks the end of the stream.
pub const END_OF_STREAM: u32 = 256;

/// Highest supported model order.
pub const MAX_ORDER: i32 = 16;

/// Lowest supported model order (context-free coding).
pub const MIN_ORDER: i32 = -1;

/// A decoded or encoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A literal byte.
    Literal(u8),
    /// The end-of-stream marker. Never written to the output.
    EndOfStream,
}

impl Symbol {
    /// Table index of this symbol.
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            Self::Literal(b) => u32::from(b),
            Self::EndOfStream => END_OF_STREAM,
        }
    }

    /// Map an order -1 table index back to a symbol.
    #[inline]
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0..=255 => Some(Self::Literal(index as u8)),
            END_OF_STREAM => Some(Self::EndOfStream),
            _ => None,
        }
    }
}

/// Model order agreed out-of-band between producer and consumer.
///
/// Order `-1` codes every byte with a flat distribution, order `0` uses a
/// single adaptive table, order `N` conditions on up to `N` previous bytes.
/// The stream carries no header, so decoding with a different order than the
/// one used to compress silently produces garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelOrder(i32);

impl ModelOrder {
    /// Order used by the command line tools when none is given.
    pub const DEFAULT: Self = Self(3);

    /// Validate an order in `MIN_ORDER..=MAX_ORDER`.
    ///
    /// The model has no memory limit and can add up to `N` trie nodes per
    /// input byte, so the upper bound keeps a single session's memory within
    /// a fixed multiple of its input.
    pub fn new(order: i32) -> Result<Self> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(PpmError::InvalidModelOrder(order));
        }
        Ok(Self(order))
    }

    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }

    /// Number of history bytes this order keeps (0 for orders -1 and 0).
    #[inline]
    pub fn history_len(self) -> usize {
        self.0.max(0) as usize
    }

    /// Whether any adaptive context exists (order >= 0).
    #[inline]
    pub fn has_contexts(self) -> bool {
        self.0 >= 0
    }
}

impl Default for ModelOrder {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ModelOrder {
    type Error = PpmError;

    fn try_from(order: i32) -> Result<Self> {
        Self::new(order)
    }
}

impl FromStr for ModelOrder {
    type Err = PpmError;

    fn from_str(s: &str) -> Result<Self> {
        let order = s
            .trim()
            .parse::<i32>()
            .map_err(|_| PpmError::InvalidModelOrderText(s.to_string()))?;
        Self::new(order)
    }
}
