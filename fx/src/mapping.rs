//! Static table of supported conversions.

use std::collections::BTreeMap;

use fastexchange_common::{CurrencyKind, CurrencyPair};

/// Maps each supported pair to the path suffix its rate is served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMapping {
    routes: BTreeMap<CurrencyPair, String>,
}

impl PairMapping {
    /// An empty mapping.
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// Add or replace the route for a pair.
    pub fn with_route(mut self, from: CurrencyKind, to: CurrencyKind, path: impl Into<String>) -> Self {
        self.routes.insert(CurrencyPair::new(from, to), path.into());
        self
    }

    /// Path suffix for a pair, if supported.
    pub fn path_for(&self, pair: &CurrencyPair) -> Option<&str> {
        self.routes.get(pair).map(String::as_str)
    }

    pub fn contains(&self, pair: &CurrencyPair) -> bool {
        self.routes.contains_key(pair)
    }

    /// Supported pairs in a stable order.
    pub fn pairs(&self) -> Vec<CurrencyPair> {
        self.routes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for PairMapping {
    /// USD to EUR and back, as served by currency.me.uk.
    fn default() -> Self {
        Self::new()
            .with_route(CurrencyKind::Usd, CurrencyKind::Eur, "/usd/eur")
            .with_route(CurrencyKind::Eur, CurrencyKind::Usd, "/eur/usd")
    }
}
