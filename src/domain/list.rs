//! List envelope returned by collection endpoints and the page of results
//! derived from it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, page_offset};

/// Parameters of one list fetch: committed search term and page window.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub search_term: String,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        page_offset(self.page, self.page_size)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// `{count, next, previous, results}` wrapper used by all list endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// One page of entities together with the total number of matches.
#[derive(Clone, Debug, PartialEq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> ListResult<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total_count: usize) -> Self {
        Self { items, total_count }
    }

    /// A result holding every item, as returned by unpaginated endpoints.
    #[must_use]
    pub fn complete(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self { items, total_count }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

impl<T> From<ListEnvelope<T>> for ListResult<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        Self {
            items: envelope.results,
            total_count: envelope.count,
        }
    }
}

/// Cuts the page described by `query` out of a fully fetched collection.
pub fn paginate_locally<T>(items: Vec<T>, query: &ListQuery) -> ListResult<T> {
    let total_count = items.len();
    let items = items
        .into_iter()
        .skip(query.offset())
        .take(query.limit())
        .collect();
    ListResult { items, total_count }
}

/// Decodes a list payload that may be an envelope, a bare array or an object
/// keyed by `collection_key` (the shifts endpoint answers with `{"shifts": [..]}`).
pub fn decode_list<T: DeserializeOwned>(
    value: Value,
    collection_key: Option<&str>,
) -> Result<ListResult<T>, serde_json::Error> {
    match value {
        Value::Array(_) => {
            let items: Vec<T> = serde_json::from_value(value)?;
            Ok(ListResult::complete(items))
        }
        Value::Object(ref map) if map.contains_key("results") => {
            let envelope: ListEnvelope<T> = serde_json::from_value(value)?;
            Ok(envelope.into())
        }
        Value::Object(mut map) => match collection_key.and_then(|key| map.remove(key)) {
            Some(inner) => decode_list(inner, None),
            None => {
                let envelope: ListEnvelope<T> = serde_json::from_value(Value::Object(map))?;
                Ok(envelope.into())
            }
        },
        other => {
            let envelope: ListEnvelope<T> = serde_json::from_value(other)?;
            Ok(envelope.into())
        }
    }
}
