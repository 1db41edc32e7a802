//! Pagination types
//!
//! The Relay-style page envelope, the request sent for each page, and the
//! bookkeeping the pager carries between pages.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// `pageInfo` of a Relay-style connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows; the only termination signal
    #[serde(default)]
    pub has_next_page: bool,
    /// Cursor of the last node in this page
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of a Relay-style connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Records in server order
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    /// Continuation info
    #[serde(default)]
    pub page_info: PageInfo,
    /// Informational only; may drift between pages
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Variables that position one page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Page size
    pub first: u32,
    /// Cursor to continue after; `None` starts from the beginning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Page size to request: the caller's limit, capped by the resource maximum
///
/// A missing or zero limit means "as many as the resource allows".
pub fn effective_page_size(max_page_size: u32, limit: Option<u64>) -> u32 {
    match limit {
        Some(limit) if limit > 0 => u64::from(max_page_size).min(limit) as u32,
        _ => max_page_size,
    }
}

/// Result of inspecting a page's `pageInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Request another page after this cursor
    Continue {
        /// Cursor for the next request
        cursor: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Decide whether to continue from a page's `pageInfo`
    ///
    /// `hasNextPage` with no cursor cannot be continued without restarting
    /// from the first page, so it ends the stream.
    pub fn from_page_info(page_info: &PageInfo) -> Self {
        if !page_info.has_next_page {
            return NextPage::Done;
        }
        match page_info.end_cursor.as_deref() {
            Some(cursor) if !cursor.is_empty() => NextPage::Continue {
                cursor: cursor.to_string(),
            },
            _ => {
                warn!("Server reported hasNextPage without an endCursor, stopping");
                NextPage::Done
            }
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Progress of one pagination run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Cursor for the next request
    pub cursor: Option<String>,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Records handed to the consumer so far
    pub records_yielded: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state resuming after a cursor
    pub fn with_cursor(cursor: Option<String>) -> Self {
        Self {
            cursor,
            ..Default::default()
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Apply the outcome of a fetched page
    pub fn advance(&mut self, next: NextPage) {
        self.pages_fetched += 1;
        match next {
            NextPage::Continue { cursor } => self.set_cursor(cursor),
            NextPage::Done => self.mark_done(),
        }
    }
}

/// Cooperative cancellation flag shared between a consumer and its pager
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// A fresh, unset signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the pager to stop before its next record
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
