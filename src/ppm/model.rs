//! Adaptive context trie.
//!
//! Nodes live in a flat arena owned by [`ContextModel`]; everything outside
//! the model refers to them through [`NodeId`] handles. A node at depth `d`
//! is the order-`d` context reached from the root by following the trailing
//! `d` history bytes, oldest first.

use super::frequency::{ContextFrequencies, FlatFrequencies};
use super::{History, ModelOrder};

/// Index of a node in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    const ROOT: Self = Self(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One context: its statistics and outgoing edges.
#[derive(Debug, Clone)]
struct ContextNode {
    frequencies: ContextFrequencies,
    /// Sorted by edge symbol.
    children: Vec<(u8, NodeId)>,
}

impl ContextNode {
    fn new() -> Self {
        Self {
            frequencies: ContextFrequencies::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    fn child(&self, symbol: u8) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| self.children[i].1)
    }
}

/// PPM context model of a fixed order.
///
/// Grows for the lifetime of one coding session; there is no memory cap.
#[derive(Debug, Clone)]
pub struct ContextModel {
    order: ModelOrder,
    nodes: Vec<ContextNode>,
    order_minus_one: FlatFrequencies,
}

impl ContextModel {
    /// Create a model holding only the root context (none at order -1).
    pub fn new(order: ModelOrder) -> Self {
        let mut model = Self {
            order,
            nodes: Vec::new(),
            order_minus_one: FlatFrequencies::default(),
        };
        model.reset();
        model
    }

    /// Drop all learned statistics.
    pub fn reset(&mut self) {
        self.nodes.clear();
        if self.order.has_contexts() {
            self.nodes.push(ContextNode::new());
        }
    }

    #[inline]
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Number of context nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The order-0 context, absent for order -1 models.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId::ROOT)
    }

    /// Follow the edge labelled `symbol` out of `node`.
    #[inline]
    pub fn child(&self, node: NodeId, symbol: u8) -> Option<NodeId> {
        self.nodes[node.index()].child(symbol)
    }

    /// Walk from the root along `path`. `None` as soon as an edge is missing.
    pub fn find(&self, path: impl IntoIterator<Item = u8>) -> Option<NodeId> {
        path.into_iter()
            .try_fold(self.root()?, |node, symbol| self.child(node, symbol))
    }

    /// Statistics of a context.
    #[inline]
    pub fn frequencies(&self, node: NodeId) -> &ContextFrequencies {
        &self.nodes[node.index()].frequencies
    }

    /// Fixed order -1 table: 256 literals and the end marker, no escape.
    #[inline]
    pub fn order_minus_one(&self) -> &FlatFrequencies {
        &self.order_minus_one
    }

    /// Learn `symbol` after `history`.
    ///
    /// Credits the context of every order from 0 up to the history length,
    /// creating missing nodes on the way. `history` must be the window as it
    /// was *before* `symbol` was coded.
    pub fn increment(&mut self, history: &History, symbol: u8) {
        if !self.order.has_contexts() {
            return;
        }
        debug_assert!(history.len() <= self.order.history_len());

        let max = history.len().min(self.order.history_len());
        for order in 0..=max {
            let mut node = NodeId::ROOT;
            for edge in history.suffix(order) {
                node = self.child_or_insert(node, edge);
            }
            self.nodes[node.index()]
                .frequencies
                .increment(u32::from(symbol));
        }
    }

    fn child_or_insert(&mut self, node: NodeId, symbol: u8) -> NodeId {
        let children = &self.nodes[node.index()].children;
        match children.binary_search_by_key(&symbol, |&(s, _)| s) {
            Ok(i) => children[i].1,
            Err(i) => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(ContextNode::new());
                self.nodes[node.index()].children.insert(i, (symbol, id));
                id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppm::{FrequencyTable, ESCAPE_SYMBOL};

    fn model(n: i32) -> ContextModel {
        ContextModel::new(ModelOrder::new(n).unwrap())
    }

    #[test]
    fn test_order_minus_one_has_no_root() {
        let mut m = model(-1);
        assert!(m.root().is_none());
        assert!(m.find(std::iter::empty()).is_none());
        let history = History::new(m.order());
        m.increment(&history, b'x');
        assert_eq!(m.node_count(), 0);
        assert_eq!(m.order_minus_one().total(), 257);
    }

    #[test]
    fn test_root_starts_with_escape_only() {
        let m = model(2);
        let root = m.root().unwrap();
        assert_eq!(m.frequencies(root).total(), 1);
        assert_eq!(m.frequencies(root).get(ESCAPE_SYMBOL), 1);
        assert!(m.child(root, b'a').is_none());
    }

    #[test]
    fn test_increment_credits_every_suffix() {
        let mut m = model(2);
        let mut history = History::new(m.order());
        for b in b"ab" {
            m.increment(&history, *b);
            history.push(*b);
        }
        // history = "ab", learn 'c'
        m.increment(&history, b'c');

        let root = m.root().unwrap();
        assert_eq!(m.frequencies(root).get(b'c' as u32), 1);

        let b = m.find(*b"b").unwrap();
        assert_eq!(m.frequencies(b).get(b'c' as u32), 1);

        let ab = m.find(*b"ab").unwrap();
        assert_eq!(m.frequencies(ab).get(b'c' as u32), 1);
        assert_eq!(m.frequencies(ab).get(ESCAPE_SYMBOL), 1);

        // "a" was credited with 'b' on the previous step
        let a = m.find(*b"a").unwrap();
        assert_eq!(m.frequencies(a).get(b'b' as u32), 1);
        assert_eq!(m.frequencies(a).get(b'c' as u32), 0);
    }

    #[test]
    fn test_find_missing_path() {
        let mut m = model(3);
        let history = History::new(m.order());
        m.increment(&history, b'z');
        assert!(m.find(*b"z").is_none());
        assert_eq!(m.find(std::iter::empty()), m.root());
    }

    #[test]
    fn test_reset_discards_nodes() {
        let mut m = model(1);
        let mut history = History::new(m.order());
        for b in b"hello" {
            m.increment(&history, *b);
            history.push(*b);
        }
        assert!(m.node_count() > 1);
        m.reset();
        assert_eq!(m.node_count(), 1);
        assert_eq!(m.frequencies(m.root().unwrap()).total(), 1);
    }
}
