//! Keyed store of price-history snapshots

use crate::{MarketDataError, PriceSeries, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps a symbol to its most recently ingested price history.
///
/// Snapshots are shared immutably; a refresh swaps in new `Arc`s instead of
/// mutating series in place, so anyone still holding an old snapshot keeps a
/// consistent view.
#[derive(Debug, Clone, Default)]
pub struct PriceStore {
    snapshots: HashMap<String, Arc<PriceSeries>>,
}

impl PriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `series` under its own symbol, returning the snapshot it replaced
    pub fn insert(&mut self, series: PriceSeries) -> Option<Arc<PriceSeries>> {
        let symbol = series.symbol().to_string();
        self.snapshots.insert(symbol, Arc::new(series))
    }

    /// Replace the whole store with a fresh set of histories
    pub fn replace_all<I>(&mut self, series: I)
    where
        I: IntoIterator<Item = PriceSeries>,
    {
        self.snapshots = series
            .into_iter()
            .map(|s| (s.symbol().to_string(), Arc::new(s)))
            .collect();
    }

    pub fn get(&self, symbol: &str) -> Option<Arc<PriceSeries>> {
        self.snapshots.get(symbol).cloned()
    }

    /// Like [`PriceStore::get`] but fails for unknown symbols
    pub fn require(&self, symbol: &str) -> Result<Arc<PriceSeries>> {
        self.get(symbol)
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.snapshots.contains_key(symbol)
    }

    pub fn remove(&mut self, symbol: &str) -> Option<Arc<PriceSeries>> {
        self.snapshots.remove(symbol)
    }

    /// Stored symbols in sorted order
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.snapshots.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
