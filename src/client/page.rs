//! Page types for paginated fetches
//!
//! One `Page` is the result of a single fetch call: the raw items plus the
//! pagination metadata the remote reported. The stop rules live here so the
//! fetch loop stays a plain offset increment.

use crate::types::JsonValue;

/// One page of raw items with pagination metadata
#[derive(Debug, Clone)]
pub struct Page {
    /// Raw items in remote order
    pub items: Vec<JsonValue>,
    /// Skip offset this page was fetched at
    pub offset: u32,
    /// Total record count if the remote reported one, else 0
    pub total: u64,
    /// Remote's has-more flag
    pub has_more: bool,
}

impl Page {
    /// Build a page from a response body
    ///
    /// A mapping is read as `{data|items, total, hasMore}`; a bare array is
    /// treated as the complete item set.
    pub fn from_response(body: JsonValue, offset: u32) -> Self {
        match body {
            JsonValue::Object(map) => {
                let items = map
                    .get("data")
                    .or_else(|| map.get("items"))
                    .and_then(JsonValue::as_array)
                    .cloned()
                    .unwrap_or_default();
                let total = map.get("total").and_then(JsonValue::as_u64).unwrap_or(0);
                let has_more = map
                    .get("hasMore")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false);
                Self {
                    items,
                    offset,
                    total,
                    has_more,
                }
            }
            JsonValue::Array(items) => {
                let total = items.len() as u64;
                Self {
                    items,
                    offset,
                    total,
                    has_more: false,
                }
            }
            _ => Self {
                items: Vec::new(),
                offset,
                total: 0,
                has_more: false,
            },
        }
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Decide whether this page is the last one for the given page size
    ///
    /// Last when the reported total is reached (`has_more` false and
    /// `offset + len >= total`), or when the batch came back short.
    pub fn is_last(&self, page_size: u32) -> bool {
        if !self.has_more && self.total > 0 {
            if u64::from(self.offset) + self.items.len() as u64 >= self.total {
                return true;
            }
        } else if self.items.len() < page_size as usize {
            return true;
        }
        false
    }
}
