//! Result container for merging and ordering search hits from several sources

use super::types::SearchResult;
use std::cmp::Ordering;

/// How merged results are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrder {
    /// Relevance weight descending, then newest first
    Relevance,
    /// Newest first only
    Recency,
    /// Keep the order the sources returned
    Source,
}

/// An ordered, truncated slice of results plus the pre-truncation count
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub total: usize,
    pub results: Vec<SearchResult>,
}

/// Container for aggregating search results from multiple entity sources
#[derive(Debug, Clone, Default)]
pub struct ResultContainer {
    results: Vec<SearchResult>,
}

impl ResultContainer {
    /// Create a new empty result container
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one result
    pub fn add_result(&mut self, result: impl Into<SearchResult>) {
        self.results.push(result.into());
    }

    /// Add every row of one source, in source order
    pub fn extend_results<T: Into<SearchResult>>(&mut self, rows: impl IntoIterator<Item = T>) {
        self.results.extend(rows.into_iter().map(Into::into));
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All results sorted by `order`; the sort is stable so exact ties keep
    /// insertion order
    pub fn into_ordered(mut self, order: ResultOrder) -> Vec<SearchResult> {
        match order {
            ResultOrder::Relevance => self.results.sort_by(by_relevance),
            ResultOrder::Recency => self.results.sort_by(by_recency),
            ResultOrder::Source => {}
        }
        self.results
    }

    /// The first `limit` results after ordering
    pub fn into_page(self, order: ResultOrder, limit: usize) -> ResultPage {
        let total = self.result_count();
        let mut results = self.into_ordered(order);
        results.truncate(limit);
        ResultPage { total, results }
    }
}

fn by_relevance(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.weight().cmp(&a.weight()).then_with(|| by_recency(a, b))
}

fn by_recency(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.created_at.cmp(&a.created_at)
}
