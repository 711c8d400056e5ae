//! The resource-agnostic query handed from the builder to the executor.

use super::soql;
use super::{Predicate, Query, SortClause};

/// Rows requested when the caller does not say otherwise.
pub const DEFAULT_LIMIT: u32 = 100;

/// Predicates, sort and pagination for one request.
///
/// Predicates are ANDed together in order.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuredQuery {
    pub predicates: Vec<Predicate>,
    /// Full-text search term, sent as `$q`.
    pub search: Option<String>,
    pub sort: Option<SortClause>,
    /// Always positive.
    pub limit: u32,
    pub offset: u64,
}

impl Default for StructuredQuery {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            search: None,
            sort: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl StructuredQuery {
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_sort(mut self, sort: SortClause) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// The compiled `$where` expression, if there are any predicates.
    pub fn where_clause(&self) -> Option<String> {
        soql::where_clause(&self.predicates)
    }
}

impl Query for StructuredQuery {
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(clause) = self.where_clause() {
            params.push(("$where".to_string(), clause));
        }
        if let Some(search) = &self.search {
            params.push(("$q".to_string(), search.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("$order".to_string(), sort.to_string()));
        }
        params.push(("$limit".to_string(), self.limit.to_string()));
        params.push(("$offset".to_string(), self.offset.to_string()));
        params
    }
}
